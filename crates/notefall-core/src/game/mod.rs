mod enums;
mod judge;
mod state;
mod stats;

pub use enums::*;
pub use judge::*;
pub use state::*;
pub use stats::*;
