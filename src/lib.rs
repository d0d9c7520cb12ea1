pub mod calc;
pub mod countdown;
pub mod duration;
pub mod format;
pub mod store;

pub use calc::{calculate, CalcError, CalcMode, CalcRequest, CalcResult};
pub use countdown::{
    ColorIntent, CountdownDriver, CountdownPhase, CountdownState, CountdownStatus, CountdownUpdate,
};
pub use duration::{
    apply_offset, classify_difference, difference_of, to_millis, DeltaClass, DurationInput, Sign,
};
pub use format::{format_compact, format_fixed, format_instant};
pub use store::{FormState, FormStore};
