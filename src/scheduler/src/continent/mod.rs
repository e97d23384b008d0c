mod balance;
mod pairing;
mod phase;
mod seeding;

pub use balance::*;
pub use pairing::*;
pub use phase::*;
pub use seeding::*;
