use scheduler::SeasonPoints;
use serde::Deserialize;

const STATIC_COEFFICIENTS_JSON: &str = include_str!("../data/coefficients.json");

/// Known continental points of one team, oldest season first.
#[derive(Debug, Deserialize)]
pub struct CoefficientEntity {
    pub team_id: u32,
    pub seasons: SeasonPoints,
}

pub struct CoefficientLoader;

impl CoefficientLoader {
    pub fn load() -> Result<Vec<CoefficientEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_COEFFICIENTS_JSON)
    }
}
