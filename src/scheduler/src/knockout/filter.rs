use crate::fixture::{CompetitionId, Fixture};
use crate::settings::SeasonWindow;

/// Restricts fixture history to one competition in one season, so results
/// from earlier seasons never leak into a draw.
#[derive(Debug, Clone)]
pub struct SeasonFilter {
    competition: CompetitionId,
    window: SeasonWindow,
    rounds: Option<Vec<u16>>,
}

impl SeasonFilter {
    pub fn new(competition: CompetitionId, window: SeasonWindow) -> Self {
        SeasonFilter {
            competition,
            window,
            rounds: None,
        }
    }

    pub fn with_rounds(mut self, rounds: &[u16]) -> Self {
        self.rounds = Some(rounds.to_vec());
        self
    }

    pub fn matches(&self, fixture: &Fixture) -> bool {
        fixture.competition == self.competition
            && self.window.contains(fixture.date)
            && self.rounds.as_ref().is_none_or(|r| r.contains(&fixture.round))
    }

    pub fn apply<'f>(&self, fixtures: &'f [Fixture]) -> Vec<&'f Fixture> {
        fixtures.iter().filter(|f| self.matches(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SeasonSettings;
    use chrono::NaiveDate;

    fn fixture(competition: CompetitionId, season: i32, round: u16, date: NaiveDate) -> Fixture {
        Fixture::new(competition, season, round, 0, date, 1, 2)
    }

    #[test]
    fn previous_season_and_other_competitions_are_excluded() {
        let cup = CompetitionId::Cup(1);
        let filter = SeasonFilter::new(cup, SeasonSettings::default().window(2025));

        let history = vec![
            fixture(cup, 2024, 100, NaiveDate::from_ymd_opt(2024, 9, 25).unwrap()),
            fixture(cup, 2025, 100, NaiveDate::from_ymd_opt(2025, 9, 24).unwrap()),
            fixture(CompetitionId::Cup(2), 2025, 100, NaiveDate::from_ymd_opt(2025, 9, 24).unwrap()),
            fixture(CompetitionId::League(1), 2025, 5, NaiveDate::from_ymd_opt(2025, 9, 6).unwrap()),
            fixture(cup, 2025, 101, NaiveDate::from_ymd_opt(2025, 10, 29).unwrap()),
        ];

        let selected = filter.apply(&history);
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|f| f.id.starts_with("C1-2025")));

        let r32_only = filter.with_rounds(&[100]).apply(&history);
        assert_eq!(r32_only.len(), 1);
        assert_eq!(r32_only[0].round, 100);
    }
}
