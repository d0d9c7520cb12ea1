use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CountdownStatus {
    Idle,
    Running,
}

impl Default for CountdownStatus {
    fn default() -> Self {
        CountdownStatus::Idle
    }
}

/// Session state for the live countdown. One session at a time; starting a
/// new one replaces this wholesale.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountdownState {
    pub status: CountdownStatus,
    pub target_ms: Option<i64>,
}

impl CountdownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.status == CountdownStatus::Running
    }

    pub fn begin(&mut self, target_ms: i64) {
        *self = Self {
            status: CountdownStatus::Running,
            target_ms: Some(target_ms),
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
