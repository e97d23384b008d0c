use chrono::NaiveDate;
use log::warn;
use serde::Deserialize;

pub const DEFAULT_PAIRING_ROUNDS: u8 = 8;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;
pub const DEFAULT_SEARCH_NODE_BUDGET: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayMonthPeriod {
    pub from_day: u8,
    pub from_month: u8,

    pub to_day: u8,
    pub to_month: u8,
}

impl DayMonthPeriod {
    pub fn new(from_day: u8, from_month: u8, to_day: u8, to_month: u8) -> Self {
        DayMonthPeriod {
            from_day,
            from_month,
            to_day,
            to_month,
        }
    }
}

/// Closed date interval a season's fixtures must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SeasonWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeasonSettings {
    /// Starts in the season year, ends in the following year.
    pub period: DayMonthPeriod,
}

impl Default for SeasonSettings {
    fn default() -> Self {
        SeasonSettings {
            period: DayMonthPeriod::new(1, 7, 30, 6),
        }
    }
}

impl SeasonSettings {
    pub fn window(&self, season_year: i32) -> SeasonWindow {
        let period = &self.period;

        let start = NaiveDate::from_ymd_opt(season_year, period.from_month as u32, period.from_day as u32);
        let end = NaiveDate::from_ymd_opt(season_year + 1, period.to_month as u32, period.to_day as u32);

        match (start, end) {
            (Some(start), Some(end)) if start < end => SeasonWindow { start, end },
            _ => {
                warn!("invalid season period {:?}, falling back to Jul 1 - Jun 30", period);
                default_window(season_year)
            }
        }
    }
}

fn default_window(season_year: i32) -> SeasonWindow {
    let start = NaiveDate::from_ymd_opt(season_year, 7, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(season_year + 1, 6, 30).unwrap_or(NaiveDate::MAX);

    SeasonWindow { start, end }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PairingSettings {
    pub rounds: u8,
    /// Whole-schedule restarts before the solver gives up on random search
    pub max_attempts: u32,
    /// Search nodes allowed per attempt
    pub search_node_budget: u64,
}

impl Default for PairingSettings {
    fn default() -> Self {
        PairingSettings {
            rounds: DEFAULT_PAIRING_ROUNDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            search_node_budget: DEFAULT_SEARCH_NODE_BUDGET,
        }
    }
}

impl PairingSettings {
    pub fn max_home_fixtures(&self) -> usize {
        (self.rounds as usize).div_ceil(2)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Fixed seed for reproducible draws; random when absent
    pub seed: Option<u64>,
    pub pairing: PairingSettings,
    pub season: SeasonSettings,
}

impl SchedulerSettings {
    pub fn with_seed(seed: u64) -> Self {
        SchedulerSettings {
            seed: Some(seed),
            ..Default::default()
        }
    }
}
