use crate::{DatabaseEntity, DatabaseError};
use log::info;
use scheduler::{HistoricalCoefficients, SchedulerSettings, Team};
use std::collections::HashMap;

pub struct CountryData {
    pub id: u32,
    pub code: String,
    pub name: String,
}

pub struct LeagueData {
    pub id: u32,
    pub name: String,
    pub country_id: u32,
    pub team_ids: Vec<u32>,
}

/// Everything a season's scheduling runs on.
pub struct SeasonData {
    pub countries: Vec<CountryData>,
    pub leagues: Vec<LeagueData>,
    pub teams: Vec<Team>,
    pub coefficients: HistoricalCoefficients,
    pub settings: SchedulerSettings,
}

impl SeasonData {
    pub fn country_teams(&self, country_id: u32) -> Vec<Team> {
        self.teams.iter().filter(|t| t.country_id == country_id).cloned().collect()
    }
}

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    pub fn generate(data: &DatabaseEntity) -> Result<SeasonData, DatabaseError> {
        let league_country: HashMap<u32, u32> = data.leagues.iter().map(|l| (l.id, l.country_id)).collect();

        let teams = data
            .teams
            .iter()
            .map(|team| {
                let country_id = *league_country.get(&team.league_id).ok_or(DatabaseError::UnknownLeague {
                    team_id: team.id,
                    league_id: team.league_id,
                })?;

                Team::builder()
                    .id(team.id)
                    .name(team.name.clone())
                    .reputation(team.reputation)
                    .league_id(team.league_id)
                    .country_id(country_id)
                    .cup_banned(team.cup_banned)
                    .build()
                    .map_err(|reason| DatabaseError::InvalidTeam { id: team.id, reason })
            })
            .collect::<Result<Vec<Team>, DatabaseError>>()?;

        let leagues = data
            .leagues
            .iter()
            .map(|league| LeagueData {
                id: league.id,
                name: league.name.clone(),
                country_id: league.country_id,
                team_ids: teams.iter().filter(|t| t.league_id == league.id).map(|t| t.id).collect(),
            })
            .collect();

        let countries = data
            .countries
            .iter()
            .map(|country| CountryData {
                id: country.id,
                code: country.code.clone(),
                name: country.name.clone(),
            })
            .collect();

        let coefficients = HistoricalCoefficients::new(
            data.coefficients.iter().map(|c| (c.team_id, c.seasons)).collect(),
        );

        info!("🗂️ season data generated: {} teams, {} known coefficients", teams.len(), coefficients.len());

        Ok(SeasonData {
            countries,
            leagues,
            teams,
            coefficients,
            settings: data.settings.clone(),
        })
    }
}
