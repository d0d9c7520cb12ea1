pub mod driver;
pub mod state;

pub use driver::{ColorIntent, CountdownDriver, CountdownPhase, CountdownUpdate, IDLE_TIME_TEXT};
pub use state::{CountdownState, CountdownStatus};
