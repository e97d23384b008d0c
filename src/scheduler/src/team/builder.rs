use crate::team::{Team, MAX_REPUTATION};

#[derive(Default)]
pub struct TeamBuilder {
    id: Option<u32>,
    name: Option<String>,
    reputation: Option<f32>,
    league_id: Option<u32>,
    country_id: Option<u32>,
    cup_banned: Option<bool>,
}

impl TeamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn reputation(mut self, reputation: f32) -> Self {
        self.reputation = Some(reputation);
        self
    }

    pub fn league_id(mut self, league_id: u32) -> Self {
        self.league_id = Some(league_id);
        self
    }

    pub fn country_id(mut self, country_id: u32) -> Self {
        self.country_id = Some(country_id);
        self
    }

    pub fn cup_banned(mut self, cup_banned: bool) -> Self {
        self.cup_banned = Some(cup_banned);
        self
    }

    pub fn build(self) -> Result<Team, String> {
        Ok(Team {
            id: self.id.ok_or("id is required")?,
            name: self.name.ok_or("name is required")?,
            reputation: self.reputation.unwrap_or(1.0).clamp(0.0, MAX_REPUTATION),
            league_id: self.league_id.unwrap_or_default(),
            country_id: self.country_id.unwrap_or_default(),
            cup_banned: self.cup_banned.unwrap_or(false),
        })
    }
}
