use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompetitionTier {
    ChampionsLeague,
    EuropaLeague,
    ConferenceLeague,
}

impl CompetitionTier {
    pub fn code(&self) -> &'static str {
        match self {
            CompetitionTier::ChampionsLeague => "CL",
            CompetitionTier::EuropaLeague => "EL",
            CompetitionTier::ConferenceLeague => "ECL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompetitionId {
    /// Domestic league, by league id
    League(u32),
    /// Domestic cup, by country id
    Cup(u32),
    Continental(CompetitionTier),
}

impl fmt::Display for CompetitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompetitionId::League(id) => write!(f, "L{}", id),
            CompetitionId::Cup(id) => write!(f, "C{}", id),
            CompetitionId::Continental(tier) => write!(f, "{}", tier.code()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyScore {
    pub home: u8,
    pub away: u8,
}

impl PenaltyScore {
    pub fn new(home: u8, away: u8) -> Self {
        PenaltyScore { home, away }
    }
}

/// A scheduled match. Created unplayed; the match simulation fills in the
/// result later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub round: u16,
    pub date: NaiveDate,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub played: bool,
    pub home_score: Option<u8>,
    pub away_score: Option<u8>,
    pub penalties: Option<PenaltyScore>,
    pub competition: CompetitionId,
}

impl Fixture {
    pub fn new(
        competition: CompetitionId,
        season_year: i32,
        round: u16,
        index: usize,
        date: NaiveDate,
        home_team_id: u32,
        away_team_id: u32,
    ) -> Self {
        Fixture {
            id: format!("{}-{}-{}-{}", competition, season_year, round, index + 1),
            round,
            date,
            home_team_id,
            away_team_id,
            played: false,
            home_score: None,
            away_score: None,
            penalties: None,
            competition,
        }
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn opponent_of(&self, team_id: u32) -> Option<u32> {
        if self.home_team_id == team_id {
            Some(self.away_team_id)
        } else if self.away_team_id == team_id {
            Some(self.home_team_id)
        } else {
            None
        }
    }

    /// Goals scored by `team_id` in this fixture, if it has been played.
    pub fn goals_for(&self, team_id: u32) -> Option<u8> {
        if !self.played {
            return None;
        }

        if self.home_team_id == team_id {
            self.home_score
        } else if self.away_team_id == team_id {
            self.away_score
        } else {
            None
        }
    }

    /// Records a result. Used by the match simulation and by tests.
    pub fn record_result(&mut self, home_score: u8, away_score: u8, penalties: Option<PenaltyScore>) {
        self.played = true;
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.penalties = penalties;
    }

    /// Winner decided on the pitch or by penalties; `None` when unplayed or
    /// still level without a shoot-out.
    pub fn decided_winner(&self) -> Option<u32> {
        if !self.played {
            return None;
        }

        let (home, away) = (self.home_score?, self.away_score?);

        if home != away {
            return Some(if home > away { self.home_team_id } else { self.away_team_id });
        }

        match self.penalties {
            Some(p) if p.home > p.away => Some(self.home_team_id),
            Some(p) if p.away > p.home => Some(self.away_team_id),
            _ => None,
        }
    }
}
