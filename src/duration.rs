use serde::{Deserialize, Serialize};

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Sign {
    Positive,
    Negative,
}

impl Default for Sign {
    fn default() -> Self {
        Sign::Positive
    }
}

impl Sign {
    pub fn multiplier(self) -> i64 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }
}

/// Raw duration fields as the host hands them over. Empty inputs map to 0
/// on the host side; negative values are clamped to 0 here.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DurationInput {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DurationInput {
    pub fn new(days: i64, hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn is_zero(&self) -> bool {
        to_millis(*self, Sign::Positive) == 0
    }
}

/// Relation of a target instant to a start instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DeltaClass {
    Before,
    After,
    Same,
}

/// Signed millisecond count for a duration input.
pub fn to_millis(input: DurationInput, sign: Sign) -> i64 {
    let days = input.days.max(0);
    let hours = input.hours.max(0);
    let minutes = input.minutes.max(0);
    let seconds = input.seconds.max(0);

    let total = (((days * 24 + hours) * 60 + minutes) * 60 + seconds) * MS_PER_SECOND;
    total * sign.multiplier()
}

/// Shift an epoch-ms instant by a signed offset.
pub fn apply_offset(base_ms: i64, offset_ms: i64) -> i64 {
    base_ms + offset_ms
}

/// Signed difference between two epoch-ms instants. Positive means the
/// target lies after the start.
pub fn difference_of(start_ms: i64, target_ms: i64) -> i64 {
    target_ms - start_ms
}

pub fn classify_difference(delta_ms: i64) -> DeltaClass {
    match delta_ms {
        0 => DeltaClass::Same,
        d if d > 0 => DeltaClass::After,
        _ => DeltaClass::Before,
    }
}
