mod bracket;
mod filter;
mod stage;
mod tie;

pub use bracket::*;
pub use filter::*;
pub use stage::*;
pub use tie::*;
