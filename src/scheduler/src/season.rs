use crate::continent::{CoefficientProvider, LeaguePhaseSchedule};
use crate::error::Result;
use crate::fixture::{CompetitionId, CompetitionTier, Fixture};
use crate::knockout::{KnockoutBracket, KnockoutStage};
use crate::league::{RoundRobinGenerator, Schedule};
use crate::settings::{SchedulerSettings, SeasonWindow};
use crate::team::Team;
use crate::utils::Logging;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Entry point for one season: owns the random source so a fixed seed
/// reproduces every draw made through it.
pub struct SeasonScheduler {
    season_year: i32,
    settings: SchedulerSettings,
    seed: u64,
    rng: StdRng,
}

impl SeasonScheduler {
    pub fn new(season_year: i32, settings: SchedulerSettings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random::<u64>);

        info!("season {}/{} scheduler seeded with {}", season_year, season_year + 1, seed);

        SeasonScheduler {
            season_year,
            seed,
            rng: StdRng::seed_from_u64(seed),
            settings,
        }
    }

    pub fn season_year(&self) -> i32 {
        self.season_year
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn window(&self) -> SeasonWindow {
        self.settings.season.window(self.season_year)
    }

    pub fn league_schedule(&mut self, league_id: u32, team_ids: &[u32]) -> Result<Schedule> {
        let message = &format!("generate league {} schedule", league_id);

        Logging::estimate_result(
            || RoundRobinGenerator::generate(league_id, self.season_year, team_ids),
            message,
        )
    }

    pub fn league_phase(
        &mut self,
        tier: CompetitionTier,
        teams: &[Team],
        provider: &dyn CoefficientProvider,
    ) -> LeaguePhaseSchedule {
        let message = &format!("generate {} league phase", tier.code());

        Logging::estimate_result(
            || {
                LeaguePhaseSchedule::generate(
                    tier,
                    self.season_year,
                    teams,
                    provider,
                    &self.settings.pairing,
                    &mut self.rng,
                )
            },
            message,
        )
    }

    /// Stage a country's cup starts at, given its eligible field.
    pub fn cup_entry_stage(&self, country_id: u32, teams: &[Team]) -> Result<KnockoutStage> {
        self.bracket(CompetitionId::Cup(country_id)).cup_entry_stage(teams)
    }

    pub fn cup_round(
        &mut self,
        country_id: u32,
        stage: KnockoutStage,
        teams: &[Team],
        history: &[Fixture],
    ) -> Result<Vec<Fixture>> {
        let bracket = self.bracket(CompetitionId::Cup(country_id));
        let message = &format!("draw cup {} {}", country_id, stage);

        Logging::estimate_result(|| bracket.cup_round(stage, teams, history, &mut self.rng), message)
    }

    pub fn continental_knockout_round(
        &mut self,
        tier: CompetitionTier,
        stage: KnockoutStage,
        standings: &[u32],
        history: &[Fixture],
    ) -> Result<Vec<Fixture>> {
        let bracket = self.bracket(CompetitionId::Continental(tier));
        let message = &format!("draw {} {}", tier.code(), stage);

        Logging::estimate_result(
            || bracket.continental_round(stage, standings, history, &mut self.rng),
            message,
        )
    }

    fn bracket(&self, competition: CompetitionId) -> KnockoutBracket {
        KnockoutBracket::new(competition, self.season_year, self.window())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continent::FormulaCoefficients;
    use crate::error::ScheduleError;

    fn teams(count: u32) -> Vec<Team> {
        (1..=count)
            .map(|id| {
                Team::builder()
                    .id(id)
                    .name(format!("Side {}", id))
                    .reputation(5.0 - id as f32 * 0.1)
                    .build()
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn fixed_seed_reproduces_every_draw() {
        let run = || {
            let mut scheduler = SeasonScheduler::new(2025, SchedulerSettings::with_seed(77));
            let phase = scheduler.league_phase(CompetitionTier::EuropaLeague, &teams(32), &FormulaCoefficients);
            let cup = scheduler.cup_round(1, KnockoutStage::RoundOf32, &teams(32), &[]).unwrap();
            (phase.fixtures, cup)
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn season_covers_every_competition() {
        let mut scheduler = SeasonScheduler::new(2025, SchedulerSettings::with_seed(1));
        assert_eq!(scheduler.seed(), 1);

        let league = scheduler.league_schedule(1, &(1..=18).collect::<Vec<u32>>()).unwrap();
        assert_eq!(league.fixtures().count(), 306);

        let phase = scheduler.league_phase(CompetitionTier::ChampionsLeague, &teams(36), &FormulaCoefficients);
        assert_eq!(phase.pots.iter().map(|p| p.len()).sum::<usize>(), 36);
        assert!(phase.fixtures.iter().all(|f| scheduler.window().contains(f.date)));

        let entry = scheduler.cup_entry_stage(3, &teams(16)).unwrap();
        assert_eq!(entry, KnockoutStage::RoundOf16);

        let cup = scheduler.cup_round(3, entry, &teams(16), &[]).unwrap();
        assert_eq!(cup.len(), 8);
        assert!(cup.iter().all(|f| f.round == 101));
        assert!(cup.iter().all(|f| f.competition == CompetitionId::Cup(3)));

        assert!(matches!(
            scheduler.cup_round(3, KnockoutStage::RoundOf32, &teams(20), &[]),
            Err(ScheduleError::BracketSize { found: 20, .. })
        ));
    }

    #[test]
    fn continental_knockout_goes_through_scheduler() {
        let mut scheduler = SeasonScheduler::new(2025, SchedulerSettings::with_seed(5));
        let standings: Vec<u32> = (1..=36).collect();

        let playoff = scheduler
            .continental_knockout_round(CompetitionTier::ConferenceLeague, KnockoutStage::Playoff, &standings, &[])
            .unwrap();

        assert_eq!(playoff.len(), 16);
        assert!(playoff.iter().all(|f| f.id.starts_with("ECL-2025-")));
    }
}
