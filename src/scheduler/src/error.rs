use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Configuration errors are fatal: no partial schedule is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("round-robin needs an even number of teams, got {0}")]
    OddTeamCount(usize),

    #[error("round-robin needs at least 2 teams, got {0}")]
    NotEnoughTeams(usize),

    #[error("{stage} needs at least 2 participants, got {found}")]
    NotEnoughParticipants { stage: String, found: usize },

    #[error("{stage} cannot pair an odd number of participants ({found})")]
    OddParticipantCount { stage: String, found: usize },

    #[error("round {round} still has unplayed fixtures")]
    IncompleteRound { round: u16 },

    #[error("legs {first_leg} and {second_leg} do not form a tie")]
    InvalidTie { first_leg: String, second_leg: String },

    #[error("{stage} is not a stage of {competition}")]
    UnknownStage { stage: String, competition: String },

    #[error("{stage} cannot start a cup of {found} eligible teams, the field must be 2, 4, 8, 16 or 32")]
    BracketSize { stage: String, found: usize },

    #[error("{stage} expects {expected} qualifiers, got {found}")]
    QualifierCount { stage: String, expected: usize, found: usize },

    #[error("{stage} needs {needed} ranked teams, standings hold {found}")]
    MissingStandings { stage: String, needed: usize, found: usize },
}
