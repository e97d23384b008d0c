use serde::Deserialize;

const STATIC_COUNTRIES_JSON: &str = include_str!("../data/countries.json");

#[derive(Debug, Deserialize)]
pub struct CountryEntity {
    pub id: u32,
    pub code: String,
    pub name: String,
    pub reputation: u16,
}

pub struct CountryLoader;

impl CountryLoader {
    pub fn load() -> Result<Vec<CountryEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_COUNTRIES_JSON)
    }
}
