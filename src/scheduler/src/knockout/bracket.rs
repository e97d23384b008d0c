use crate::calendar::{matchday_date, Calendar};
use crate::error::{Result, ScheduleError};
use crate::fixture::{CompetitionId, Fixture};
use crate::knockout::{KnockoutStage, SeasonFilter, Tie};
use crate::settings::SeasonWindow;
use crate::team::{by_reputation_desc, Team};
use itertools::Itertools;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// League-phase places that go straight to the round of 16.
pub const DIRECT_QUALIFIERS: usize = 8;
/// Last league-phase place that still reaches the play-off.
pub const PLAYOFF_LAST_PLACE: usize = 24;

/// Draws knockout stages of one competition in one season, one stage at
/// a time, from the fixture history passed in.
pub struct KnockoutBracket {
    competition: CompetitionId,
    season_year: i32,
    window: SeasonWindow,
    calendar: Calendar,
}

impl KnockoutBracket {
    pub fn new(competition: CompetitionId, season_year: i32, window: SeasonWindow) -> Self {
        KnockoutBracket {
            competition,
            season_year,
            window,
            calendar: Calendar::new(season_year),
        }
    }

    fn season_filter(&self) -> SeasonFilter {
        SeasonFilter::new(self.competition, self.window)
    }

    fn require_stage(&self, stage: KnockoutStage) -> Result<&'static [u16]> {
        match stage.rounds(self.competition) {
            [] => Err(ScheduleError::UnknownStage {
                stage: stage.to_string(),
                competition: self.competition.to_string(),
            }),
            rounds => Ok(rounds),
        }
    }

    /// Every eligible team, strongest first.
    pub fn entry_pool(&self, teams: &[Team]) -> Vec<u32> {
        teams
            .iter()
            .filter(|t| t.is_cup_eligible())
            .sorted_by(|a, b| by_reputation_desc(a, b))
            .map(|t| t.id)
            .collect()
    }

    /// The cup stage the whole eligible field enters at. Fields that do
    /// not halve cleanly down to a final are rejected up front.
    pub fn cup_entry_stage(&self, teams: &[Team]) -> Result<KnockoutStage> {
        let eligible = teams.iter().filter(|t| t.is_cup_eligible()).count();

        KnockoutStage::cup_entry(eligible).ok_or(ScheduleError::BracketSize {
            stage: KnockoutStage::RoundOf32.to_string(),
            found: eligible,
        })
    }

    /// Winners of a completed stage this season, in draw order.
    pub fn stage_winners(&self, stage: KnockoutStage, history: &[Fixture], rng: &mut StdRng) -> Result<Vec<u32>> {
        let rounds = self.require_stage(stage)?;
        let fixtures = self.season_filter().with_rounds(rounds).apply(history);

        if let Some(unplayed) = fixtures.iter().find(|f| !f.played) {
            return Err(ScheduleError::IncompleteRound { round: unplayed.round });
        }

        let ties = match rounds {
            [first, second] => {
                let (first_legs, second_legs): (Vec<&Fixture>, Vec<&Fixture>) =
                    fixtures.into_iter().partition(|f| f.round == *first);

                let orphans: Vec<&str> = second_legs
                    .iter()
                    .filter(|leg| {
                        !first_legs
                            .iter()
                            .any(|f| f.home_team_id == leg.away_team_id && f.away_team_id == leg.home_team_id)
                    })
                    .map(|leg| leg.id.as_str())
                    .collect();

                if !orphans.is_empty() {
                    warn!("{} {}: second legs without a first leg ignored: {}", self.competition, stage, orphans.join(", "));
                }

                first_legs
                    .into_iter()
                    .map(|leg| {
                        let return_leg = second_legs
                            .iter()
                            .find(|f| f.home_team_id == leg.away_team_id && f.away_team_id == leg.home_team_id)
                            .copied()
                            .ok_or(ScheduleError::IncompleteRound { round: *second })?;

                        Tie::new(leg, return_leg)
                    })
                    .collect::<Result<Vec<Tie>>>()?
            }
            _ => fixtures.into_iter().map(Tie::single).collect(),
        };

        ties.iter()
            .map(|tie| {
                tie.winner(rng).ok_or(ScheduleError::IncompleteRound {
                    round: rounds.last().copied().unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Domestic cup stage. The entry stage takes the whole eligible field,
    /// later stages the winners of the stage before. Every cup stage is
    /// one match.
    pub fn cup_round(
        &self,
        stage: KnockoutStage,
        teams: &[Team],
        history: &[Fixture],
        rng: &mut StdRng,
    ) -> Result<Vec<Fixture>> {
        self.require_stage(stage)?;

        let entry = self.cup_entry_stage(teams)?;

        let pool = if stage == entry {
            self.entry_pool(teams)
        } else if stage.comes_before(entry, self.competition) {
            return Err(ScheduleError::BracketSize {
                stage: stage.to_string(),
                found: self.entry_pool(teams).len(),
            });
        } else {
            let previous = stage.previous(self.competition).ok_or(ScheduleError::UnknownStage {
                stage: stage.to_string(),
                competition: self.competition.to_string(),
            })?;

            self.stage_winners(previous, history, rng)?
        };

        let pairs = Self::draw(stage, pool, rng)?;

        self.fixtures(stage, pairs, history)
    }

    /// Continental knockout stage, `standings` being the league-phase
    /// table as team ids, first place first.
    pub fn continental_round(
        &self,
        stage: KnockoutStage,
        standings: &[u32],
        history: &[Fixture],
        rng: &mut StdRng,
    ) -> Result<Vec<Fixture>> {
        self.require_stage(stage)?;

        let pairs = match stage {
            KnockoutStage::Playoff => {
                Self::require_standings(stage, standings, PLAYOFF_LAST_PLACE)?;

                // 9 v 24, 10 v 23, ...; the better place hosts the return leg
                (DIRECT_QUALIFIERS..PLAYOFF_LAST_PLACE)
                    .take((PLAYOFF_LAST_PLACE - DIRECT_QUALIFIERS) / 2)
                    .map(|place| (standings[PLAYOFF_LAST_PLACE - 1 - (place - DIRECT_QUALIFIERS)], standings[place]))
                    .collect()
            }
            KnockoutStage::RoundOf16 => {
                Self::require_standings(stage, standings, DIRECT_QUALIFIERS)?;

                let mut qualifiers = self.stage_winners(KnockoutStage::Playoff, history, rng)?;
                qualifiers.shuffle(rng);

                if qualifiers.len() != DIRECT_QUALIFIERS {
                    return Err(ScheduleError::QualifierCount {
                        stage: stage.to_string(),
                        expected: DIRECT_QUALIFIERS,
                        found: qualifiers.len(),
                    });
                }

                qualifiers.into_iter().zip(standings[..DIRECT_QUALIFIERS].iter().copied()).collect()
            }
            _ => {
                let previous = stage.previous(self.competition).ok_or(ScheduleError::UnknownStage {
                    stage: stage.to_string(),
                    competition: self.competition.to_string(),
                })?;

                let winners = self.stage_winners(previous, history, rng)?;
                Self::draw(stage, winners, rng)?
            }
        };

        self.fixtures(stage, pairs, history)
    }

    fn require_standings(stage: KnockoutStage, standings: &[u32], needed: usize) -> Result<()> {
        if standings.len() < needed {
            return Err(ScheduleError::MissingStandings {
                stage: stage.to_string(),
                needed,
                found: standings.len(),
            });
        }

        Ok(())
    }

    /// Open draw: shuffle and pair neighbours.
    fn draw(stage: KnockoutStage, mut pool: Vec<u32>, rng: &mut StdRng) -> Result<Vec<(u32, u32)>> {
        if pool.len() < 2 {
            return Err(ScheduleError::NotEnoughParticipants {
                stage: stage.to_string(),
                found: pool.len(),
            });
        }

        if pool.len() % 2 != 0 {
            return Err(ScheduleError::OddParticipantCount {
                stage: stage.to_string(),
                found: pool.len(),
            });
        }

        pool.shuffle(rng);

        debug!("{} draw: {}", stage, pool.iter().join(", "));

        Ok(pool.chunks(2).map(|pair| (pair[0], pair[1])).collect())
    }

    fn fixtures(&self, stage: KnockoutStage, pairs: Vec<(u32, u32)>, history: &[Fixture]) -> Result<Vec<Fixture>> {
        let fixtures = match self.require_stage(stage)? {
            [first, second] => self.two_legs(*first, *second, pairs),
            rounds => self.single_leg(rounds[0], pairs, history),
        };

        info!(
            "🏆 {} {} {}: {} fixtures drawn",
            self.competition,
            self.season_year,
            stage,
            fixtures.len()
        );

        Ok(fixtures)
    }

    /// The side with fewer home games in this competition this season
    /// hosts; the first drawn team otherwise.
    fn single_leg(&self, round: u16, pairs: Vec<(u32, u32)>, history: &[Fixture]) -> Vec<Fixture> {
        let mut home_games: HashMap<u32, usize> = HashMap::new();
        for fixture in self.season_filter().apply(history) {
            *home_games.entry(fixture.home_team_id).or_default() += 1;
        }

        let date = self.date(round);

        pairs
            .into_iter()
            .enumerate()
            .map(|(idx, (first, second))| {
                let first_home = home_games.get(&first).copied().unwrap_or(0);
                let second_home = home_games.get(&second).copied().unwrap_or(0);

                let (home, away) = if second_home < first_home { (second, first) } else { (first, second) };
                *home_games.entry(home).or_default() += 1;

                Fixture::new(self.competition, self.season_year, round, idx, date, home, away)
            })
            .collect()
    }

    fn two_legs(&self, first_round: u16, second_round: u16, pairs: Vec<(u32, u32)>) -> Vec<Fixture> {
        let first_date = self.date(first_round);
        let second_date = self.date(second_round);
        let count = pairs.len();

        let mut first_legs = Vec::with_capacity(count);
        let mut second_legs = Vec::with_capacity(count);

        for (idx, (home, away)) in pairs.into_iter().enumerate() {
            first_legs.push(Fixture::new(
                self.competition,
                self.season_year,
                first_round,
                idx,
                matchday_date(first_date, idx, count),
                home,
                away,
            ));
            second_legs.push(Fixture::new(
                self.competition,
                self.season_year,
                second_round,
                idx,
                matchday_date(second_date, idx, count),
                away,
                home,
            ));
        }

        first_legs.extend(second_legs);
        first_legs
    }

    fn date(&self, round: u16) -> chrono::NaiveDate {
        match self.competition {
            CompetitionId::Cup(_) => self.calendar.cup_round(round),
            _ => self.calendar.continental_round(round),
        }
    }
}
