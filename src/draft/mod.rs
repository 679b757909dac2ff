// Draft mechanics: snake-order arithmetic and the session state machine.

pub mod order;
pub mod session;

pub use order::team_on_clock;
pub use session::{DraftError, DraftSession};
