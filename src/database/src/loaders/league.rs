use serde::Deserialize;

const STATIC_LEAGUES_JSON: &str = include_str!("../data/leagues.json");

#[derive(Debug, Deserialize)]
pub struct LeagueEntity {
    pub id: u32,
    pub name: String,
    pub country_id: u32,
}

pub struct LeagueLoader;

impl LeagueLoader {
    pub fn load() -> Result<Vec<LeagueEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_LEAGUES_JSON)
    }
}
