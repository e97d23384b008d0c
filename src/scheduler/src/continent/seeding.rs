use crate::team::Team;
use itertools::Itertools;
use log::debug;
use std::collections::HashMap;

pub const COEFFICIENT_SEASONS: usize = 4;
pub const POT_COUNT: usize = 4;

/// Per-season coefficient contributions, most recent season last.
pub type SeasonPoints = [f32; COEFFICIENT_SEASONS];

/// Source of the historical coefficient used to seed continental draws.
pub trait CoefficientProvider {
    fn season_points(&self, team: &Team) -> SeasonPoints;

    fn coefficient(&self, team: &Team) -> f32 {
        self.season_points(team).iter().sum()
    }
}

/// Stable pseudo-historical coefficients derived from reputation alone.
/// The same team always gets the same value, across runs too.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaCoefficients;

impl FormulaCoefficients {
    fn seed(team: &Team) -> f64 {
        team.id as f64 * 31.0 + (team.reputation as f64 * 100.0).round()
    }

    fn noise(seed: f64, season: usize) -> f64 {
        ((seed * 12.9898 + season as f64 * 78.233).sin().abs() * 43758.5453).fract()
    }
}

impl CoefficientProvider for FormulaCoefficients {
    fn season_points(&self, team: &Team) -> SeasonPoints {
        let seed = Self::seed(team);
        let reputation = team.reputation as f64;

        let mut points = [0.0; COEFFICIENT_SEASONS];
        for (season, value) in points.iter_mut().enumerate() {
            *value = (reputation * reputation * 2.2 + Self::noise(seed, season) * reputation * 3.0) as f32;
        }

        points
    }
}

/// Known per-season values with the formula as fallback for everyone else.
#[derive(Debug, Clone, Default)]
pub struct HistoricalCoefficients {
    table: HashMap<u32, SeasonPoints>,
    fallback: FormulaCoefficients,
}

impl HistoricalCoefficients {
    pub fn new(table: HashMap<u32, SeasonPoints>) -> Self {
        HistoricalCoefficients {
            table,
            fallback: FormulaCoefficients,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl CoefficientProvider for HistoricalCoefficients {
    fn season_points(&self, team: &Team) -> SeasonPoints {
        match self.table.get(&team.id) {
            Some(points) => *points,
            None => self.fallback.season_points(team),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pot {
    /// 1 = strongest
    pub number: u8,
    pub team_ids: Vec<u32>,
}

impl Pot {
    pub fn len(&self) -> usize {
        self.team_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.team_ids.is_empty()
    }
}

pub struct PotAssigner;

impl PotAssigner {
    /// Teams with their coefficient, strongest first.
    pub fn rank(teams: &[Team], provider: &dyn CoefficientProvider) -> Vec<(u32, f32)> {
        teams
            .iter()
            .map(|team| (team, provider.coefficient(team)))
            .sorted_by(|(a, ca), (b, cb)| {
                cb.total_cmp(ca)
                    .then_with(|| b.reputation.total_cmp(&a.reputation))
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|(team, coefficient)| (team.id, coefficient))
            .collect()
    }

    /// Slices the ranking into four pots of `ceil(n / 4)`; the last pot
    /// takes whatever remains and may be short or empty.
    pub fn assign(teams: &[Team], provider: &dyn CoefficientProvider) -> Vec<Pot> {
        let ranked = Self::rank(teams, provider);
        let pot_size = ranked.len().div_ceil(POT_COUNT);

        let pots: Vec<Pot> = (0..POT_COUNT)
            .map(|idx| {
                let from = (idx * pot_size).min(ranked.len());
                let to = ((idx + 1) * pot_size).min(ranked.len());

                Pot {
                    number: idx as u8 + 1,
                    team_ids: ranked[from..to].iter().map(|(id, _)| *id).collect(),
                }
            })
            .collect();

        debug!(
            "pots assigned: {}",
            pots.iter().map(|p| format!("#{}={}", p.number, p.len())).join(", ")
        );

        pots
    }
}
