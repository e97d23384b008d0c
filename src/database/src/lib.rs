mod generators;
mod loaders;

pub use generators::*;
pub use loaders::*;

use log::debug;
use scheduler::SchedulerSettings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("embedded data is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("team {id}: {reason}")]
    InvalidTeam { id: u32, reason: String },

    #[error("team {team_id} plays in unknown league {league_id}")]
    UnknownLeague { team_id: u32, league_id: u32 },
}

pub struct DatabaseEntity {
    pub countries: Vec<CountryEntity>,
    pub leagues: Vec<LeagueEntity>,
    pub teams: Vec<TeamEntity>,
    pub coefficients: Vec<CoefficientEntity>,
    pub settings: SchedulerSettings,
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> Result<DatabaseEntity, DatabaseError> {
        let database = DatabaseEntity {
            countries: CountryLoader::load()?,
            leagues: LeagueLoader::load()?,
            teams: TeamLoader::load()?,
            coefficients: CoefficientLoader::load()?,
            settings: SettingsLoader::load()?,
        };

        debug!(
            "database: {} countries, {} leagues, {} teams, {} coefficients",
            database.countries.len(),
            database.leagues.len(),
            database.teams.len(),
            database.coefficients.len()
        );

        Ok(database)
    }
}
