mod coefficient;
mod country;
mod league;
mod settings;
mod team;

pub use coefficient::*;
pub use country::*;
pub use league::*;
pub use settings::*;
pub use team::*;
