use crate::error::{Result, ScheduleError};
use crate::fixture::Fixture;
use rand::rngs::StdRng;
use rand::RngExt;

/// A knockout tie: one fixture, or two legs with reversed venues.
#[derive(Debug, Clone, Copy)]
pub struct Tie<'f> {
    first_leg: &'f Fixture,
    second_leg: Option<&'f Fixture>,
}

impl<'f> Tie<'f> {
    pub fn new(first_leg: &'f Fixture, second_leg: &'f Fixture) -> Result<Self> {
        if second_leg.home_team_id != first_leg.away_team_id || second_leg.away_team_id != first_leg.home_team_id {
            return Err(ScheduleError::InvalidTie {
                first_leg: first_leg.id.clone(),
                second_leg: second_leg.id.clone(),
            });
        }

        Ok(Tie {
            first_leg,
            second_leg: Some(second_leg),
        })
    }

    pub fn single(fixture: &'f Fixture) -> Self {
        Tie {
            first_leg: fixture,
            second_leg: None,
        }
    }

    /// Home team of the first leg.
    pub fn first_team(&self) -> u32 {
        self.first_leg.home_team_id
    }

    pub fn second_team(&self) -> u32 {
        self.first_leg.away_team_id
    }

    pub fn is_played(&self) -> bool {
        self.first_leg.played && self.second_leg.is_none_or(|leg| leg.played)
    }

    /// `(first_team goals, second_team goals)` over all legs. Away goals
    /// carry no extra weight.
    pub fn aggregate(&self) -> Option<(u32, u32)> {
        if !self.is_played() {
            return None;
        }

        let (first, second) = (self.first_team(), self.second_team());
        let mut totals = (0u32, 0u32);

        for leg in std::iter::once(self.first_leg).chain(self.second_leg) {
            totals.0 += leg.goals_for(first)? as u32;
            totals.1 += leg.goals_for(second)? as u32;
        }

        Some(totals)
    }

    /// Aggregate, then the deciding leg's penalties, then a coin toss.
    /// `None` while any leg is unplayed.
    pub fn winner(&self, rng: &mut StdRng) -> Option<u32> {
        let (first, second) = self.aggregate()?;

        if first != second {
            return Some(if first > second { self.first_team() } else { self.second_team() });
        }

        // level on aggregate: only the shoot-out after the last leg counts
        let deciding = self.second_leg.unwrap_or(self.first_leg);
        match deciding.penalties {
            Some(p) if p.home > p.away => return Some(deciding.home_team_id),
            Some(p) if p.away > p.home => return Some(deciding.away_team_id),
            _ => {}
        }

        Some(if rng.random_range(0..2) == 0 {
            self.first_team()
        } else {
            self.second_team()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{CompetitionId, CompetitionTier, PenaltyScore};
    use chrono::NaiveDate;
    use rand::SeedableRng;

    const A: u32 = 1;
    const B: u32 = 2;

    fn leg(round: u16, home: u32, away: u32, score: Option<(u8, u8)>, penalties: Option<PenaltyScore>) -> Fixture {
        let mut fixture = Fixture::new(
            CompetitionId::Continental(CompetitionTier::EuropaLeague),
            2025,
            round,
            0,
            NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            home,
            away,
        );

        if let Some((h, a)) = score {
            fixture.record_result(h, a, penalties);
        }

        fixture
    }

    #[test]
    fn level_aggregate_goes_to_second_leg_penalties() {
        let first = leg(211, A, B, Some((2, 1)), None);
        let second = leg(212, B, A, Some((1, 0)), Some(PenaltyScore::new(3, 4)));

        let tie = Tie::new(&first, &second).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(tie.aggregate(), Some((2, 2)));
        assert_eq!(tie.winner(&mut rng), Some(A));
    }

    #[test]
    fn away_goals_do_not_count_double() {
        // 1-1 and 0-0: B scored away, still level
        let first = leg(213, A, B, Some((1, 1)), None);
        let second = leg(214, B, A, Some((0, 0)), Some(PenaltyScore::new(5, 3)));

        let tie = Tie::new(&first, &second).unwrap();
        assert_eq!(tie.aggregate(), Some((1, 1)));
        assert_eq!(tie.winner(&mut StdRng::seed_from_u64(1)), Some(B));
    }

    #[test]
    fn aggregate_winner_without_penalties() {
        let first = leg(209, A, B, Some((0, 3)), None);
        let second = leg(210, B, A, Some((0, 2)), None);

        let tie = Tie::new(&first, &second).unwrap();
        assert_eq!(tie.winner(&mut StdRng::seed_from_u64(1)), Some(B));
    }

    #[test]
    fn unresolved_level_tie_is_a_coin_toss_between_the_two() {
        let first = leg(215, A, B, Some((1, 1)), None);
        let second = leg(216, B, A, Some((2, 2)), None);
        let tie = Tie::new(&first, &second).unwrap();

        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..10 {
            let winner = tie.winner(&mut rng).unwrap();
            assert!(winner == A || winner == B);
        }
    }

    #[test]
    fn unplayed_leg_has_no_winner() {
        let first = leg(211, A, B, Some((2, 0)), None);
        let second = leg(212, B, A, None, None);

        let tie = Tie::new(&first, &second).unwrap();
        assert!(!tie.is_played());
        assert_eq!(tie.winner(&mut StdRng::seed_from_u64(1)), None);
    }

    #[test]
    fn legs_must_reverse_venues() {
        let first = leg(211, A, B, None, None);
        let second = leg(212, A, B, None, None);

        assert!(matches!(Tie::new(&first, &second), Err(ScheduleError::InvalidTie { .. })));
    }

    #[test]
    fn single_leg_uses_score_then_penalties() {
        let fixture = leg(104, A, B, Some((0, 0)), Some(PenaltyScore::new(4, 2)));
        assert_eq!(Tie::single(&fixture).winner(&mut StdRng::seed_from_u64(1)), Some(A));
    }
}
