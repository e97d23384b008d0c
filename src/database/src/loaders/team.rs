use serde::Deserialize;

const STATIC_TEAMS_JSON: &str = include_str!("../data/teams.json");

#[derive(Debug, Deserialize)]
pub struct TeamEntity {
    pub id: u32,
    pub name: String,
    pub league_id: u32,
    pub reputation: f32,
    #[serde(default)]
    pub cup_banned: bool,
}

pub struct TeamLoader;

impl TeamLoader {
    pub fn load() -> Result<Vec<TeamEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_TEAMS_JSON)
    }
}
