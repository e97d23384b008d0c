pub mod calendar;
pub mod continent;
pub mod error;
pub mod fixture;
pub mod knockout;
pub mod league;
pub mod season;
pub mod settings;
pub mod team;
pub mod utils;

pub use continent::{
    CoefficientProvider, FormulaCoefficients, HistoricalCoefficients, LeaguePhaseSchedule, PairingStrategy, Pot,
    SeasonPoints,
};
pub use error::{Result, ScheduleError};
pub use fixture::{CompetitionId, CompetitionTier, Fixture, PenaltyScore};
pub use knockout::{KnockoutBracket, KnockoutStage, SeasonFilter, Tie};
pub use league::{RoundRobinGenerator, Schedule};
pub use season::SeasonScheduler;
pub use settings::{DayMonthPeriod, PairingSettings, SchedulerSettings, SeasonSettings};
pub use team::{Team, TeamBuilder};
pub use utils::*;
