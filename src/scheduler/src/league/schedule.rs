use crate::calendar::{matchday_date, Calendar};
use crate::error::{Result, ScheduleError};
use crate::fixture::{CompetitionId, Fixture};
use chrono::NaiveDate;
use log::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub tours: Vec<ScheduleTour>,
}

#[derive(Debug, Clone)]
pub struct ScheduleTour {
    /// League week, 1-based
    pub num: u16,
    pub items: Vec<Fixture>,
}

impl Schedule {
    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.tours.iter().flat_map(|t| &t.items)
    }

    pub fn into_fixtures(self) -> Vec<Fixture> {
        self.tours.into_iter().flat_map(|t| t.items).collect()
    }

    pub fn team_fixtures(&self, team_id: u32) -> Vec<&Fixture> {
        self.fixtures().filter(|f| f.involves(team_id)).collect()
    }

    pub fn get_matches_in_next_days(&self, date: NaiveDate, days: i64) -> Vec<&Fixture> {
        let until = date + chrono::Duration::days(days);

        self.fixtures()
            .filter(|f| f.date >= date && f.date < until)
            .collect()
    }
}

/// Double round-robin by the circle method.
pub struct RoundRobinGenerator;

impl RoundRobinGenerator {
    /// Home/away pairs per round: `2 * (n - 1)` rounds of `n / 2` pairs.
    /// The second half replays the first with venues swapped.
    pub fn pairings(team_ids: &[u32]) -> Result<Vec<Vec<(u32, u32)>>> {
        let teams_count = team_ids.len();

        if teams_count < 2 {
            return Err(ScheduleError::NotEnoughTeams(teams_count));
        }

        if teams_count % 2 != 0 {
            return Err(ScheduleError::OddTeamCount(teams_count));
        }

        let fixed = team_ids[0];
        let mut rotating: Vec<u32> = team_ids[1..].to_vec();
        let rotating_len = rotating.len();
        let middle = (rotating_len - 1) / 2;

        let mut first_half = Vec::with_capacity(rotating_len);

        for round in 0..rotating_len {
            let home_first = round % 2 == 0;
            let mut pairs = Vec::with_capacity(teams_count / 2);

            pairs.push(if home_first {
                (fixed, rotating[middle])
            } else {
                (rotating[middle], fixed)
            });

            for i in 0..middle {
                let (a, b) = (rotating[i], rotating[rotating_len - 1 - i]);
                pairs.push(if home_first { (a, b) } else { (b, a) });
            }

            first_half.push(pairs);
            rotating.rotate_right(1);
        }

        let second_half: Vec<Vec<(u32, u32)>> = first_half
            .iter()
            .map(|pairs| pairs.iter().map(|&(home, away)| (away, home)).collect())
            .collect();

        first_half.extend(second_half);

        Ok(first_half)
    }

    pub fn generate(league_id: u32, season_year: i32, team_ids: &[u32]) -> Result<Schedule> {
        let rounds = Self::pairings(team_ids)?;
        let total_weeks = rounds.len() as u16;

        let calendar = Calendar::new(season_year);
        let competition = CompetitionId::League(league_id);

        let tours = rounds
            .into_iter()
            .enumerate()
            .map(|(idx, pairs)| {
                let week = idx as u16 + 1;
                let anchor = calendar.league_week(week, total_weeks);
                let pairs_count = pairs.len();

                let items = pairs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (home, away))| {
                        Fixture::new(
                            competition,
                            season_year,
                            week,
                            i,
                            matchday_date(anchor, i, pairs_count),
                            home,
                            away,
                        )
                    })
                    .collect();

                debug!("league {} week {} anchored on {}", league_id, week, anchor);

                ScheduleTour { num: week, items }
            })
            .collect::<Vec<ScheduleTour>>();

        info!(
            "📅 league {}: {} weeks generated for {} teams",
            league_id,
            tours.len(),
            team_ids.len()
        );

        Ok(Schedule { tours })
    }
}
