use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duration::{
    apply_offset, classify_difference, difference_of, to_millis, DeltaClass, DurationInput, Sign,
};
use crate::format::{format_compact, format_instant};

/// User-input errors. Both abort the current attempt; the host re-prompts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("a start time is required")]
    MissingStartTime,
    #[error("a target time is required")]
    MissingTargetTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CalcMode {
    Duration,
    DateDiff,
}

impl Default for CalcMode {
    fn default() -> Self {
        CalcMode::Duration
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcRequest {
    pub mode: CalcMode,
    pub start_ms: Option<i64>,
    pub target_ms: Option<i64>,
    pub input: DurationInput,
    pub sign: Sign,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalcResult {
    pub main_text: String,
    pub sub_text: String,
    /// Set when the computed instant lies ahead of the start, so the host
    /// can hand it to the countdown driver.
    pub countdown_target_ms: Option<i64>,
}

/// Run one calculation. Duration mode shifts the start by the signed input;
/// date-diff mode classifies and renders the start/target gap.
pub fn calculate(request: &CalcRequest) -> Result<CalcResult, CalcError> {
    let start_ms = request.start_ms.ok_or(CalcError::MissingStartTime)?;

    match request.mode {
        CalcMode::Duration => {
            let offset_ms = to_millis(request.input, request.sign);
            let result_ms = apply_offset(start_ms, offset_ms);
            let op = match request.sign {
                Sign::Positive => '+',
                Sign::Negative => '-',
            };
            Ok(CalcResult {
                main_text: format_instant(result_ms),
                sub_text: format!("( start time {op} {} )", format_compact(offset_ms.abs())),
                countdown_target_ms: (result_ms > start_ms).then_some(result_ms),
            })
        }
        CalcMode::DateDiff => {
            let target_ms = request.target_ms.ok_or(CalcError::MissingTargetTime)?;
            let delta_ms = difference_of(start_ms, target_ms);
            let relation = match classify_difference(delta_ms) {
                DeltaClass::After => "later than the start time",
                DeltaClass::Before => "earlier than the start time",
                DeltaClass::Same => "same time",
            };
            Ok(CalcResult {
                main_text: format_compact(delta_ms.abs()),
                sub_text: format!("( {relation} )"),
                countdown_target_ms: (delta_ms > 0).then_some(target_ms),
            })
        }
    }
}
