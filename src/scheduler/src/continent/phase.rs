use crate::calendar::{matchday_date, Calendar, CONTINENTAL_FIRST_ROUND};
use crate::continent::{CoefficientProvider, HomeAwayBalancer, PairingStrategy, Pot, PotAssigner, SwissPairingSolver};
use crate::fixture::{CompetitionId, CompetitionTier, Fixture};
use crate::settings::PairingSettings;
use crate::team::Team;
use log::info;
use rand::rngs::StdRng;

/// Swiss-style league phase of one continental competition.
#[derive(Debug, Clone)]
pub struct LeaguePhaseSchedule {
    pub tier: CompetitionTier,
    pub pots: Vec<Pot>,
    pub fixtures: Vec<Fixture>,
    /// Rounds were dealt out sequentially and may not be perfect matchings
    pub degraded: bool,
    pub attempts: u32,
    pub strategy: PairingStrategy,
}

impl LeaguePhaseSchedule {
    pub fn generate(
        tier: CompetitionTier,
        season_year: i32,
        teams: &[Team],
        provider: &dyn CoefficientProvider,
        settings: &PairingSettings,
        rng: &mut StdRng,
    ) -> Self {
        let pots = PotAssigner::assign(teams, provider);
        let pairing = SwissPairingSolver::new(settings).solve(&pots, rng);

        let calendar = Calendar::new(season_year);
        let competition = CompetitionId::Continental(tier);
        let balancer = HomeAwayBalancer::new(settings.max_home_fixtures());

        let rounds = pairing.by_round();
        let in_round_order: Vec<_> = rounds.iter().flatten().copied().collect();
        let mut venues = balancer.assign(&in_round_order).into_iter();

        let mut fixtures = Vec::with_capacity(in_round_order.len());

        for (idx, round_edges) in rounds.iter().enumerate() {
            let round = CONTINENTAL_FIRST_ROUND + idx as u16;
            let anchor = calendar.continental_round(round);

            for i in 0..round_edges.len() {
                let Some((home, away)) = venues.next() else {
                    break;
                };

                fixtures.push(Fixture::new(
                    competition,
                    season_year,
                    round,
                    i,
                    matchday_date(anchor, i, round_edges.len()),
                    home,
                    away,
                ));
            }
        }

        info!(
            "🏆 {} league phase {}: {} fixtures for {} teams ({:?}{})",
            tier.code(),
            season_year,
            fixtures.len(),
            teams.len(),
            pairing.strategy,
            if pairing.is_degraded() { ", degraded" } else { "" }
        );

        LeaguePhaseSchedule {
            tier,
            pots,
            degraded: pairing.is_degraded(),
            attempts: pairing.attempts,
            strategy: pairing.strategy,
            fixtures,
        }
    }

    pub fn team_fixtures(&self, team_id: u32) -> Vec<&Fixture> {
        self.fixtures.iter().filter(|f| f.involves(team_id)).collect()
    }
}
