use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::calc::CalcMode;
use crate::duration::{DurationInput, Sign};

/// Raw form state as last entered, plus the last countdown target. Rendered
/// result text is never persisted; hosts recompute from these values on load.
/// Every field defaults, so any subset may be missing from an older file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub mode: CalcMode,
    pub sign: Sign,
    pub input: DurationInput,
    pub start_ms: Option<i64>,
    pub target_ms: Option<i64>,
    pub countdown_target_ms: Option<i64>,
}

pub struct FormStore {
    path: PathBuf,
    data: RwLock<FormState>,
}

impl FormStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read form state from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            FormState::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn form(&self) -> FormState {
        self.data.read().unwrap().clone()
    }

    pub fn update(&self, form: FormState) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = form;
            self.persist(&guard)?;
        }
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        self.update(FormState::default())
    }

    fn persist(&self, data: &FormState) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write form state to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::CalcMode;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FormStore::new(dir.path().join("form.json")).unwrap();
        assert_eq!(store.form(), FormState::default());
    }

    #[test]
    fn update_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");

        let saved = FormState {
            mode: CalcMode::DateDiff,
            sign: Sign::Negative,
            input: DurationInput::new(1, 2, 3, 4),
            start_ms: Some(1_704_067_200_000),
            target_ms: Some(1_704_153_600_000),
            countdown_target_ms: Some(1_704_153_600_000),
        };

        let store = FormStore::new(path.clone()).unwrap();
        store.update(saved.clone()).unwrap();

        let reloaded = FormStore::new(path).unwrap();
        assert_eq!(reloaded.form(), saved);
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        fs::write(&path, "{not json").unwrap();

        let store = FormStore::new(path).unwrap();
        assert_eq!(store.form(), FormState::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        fs::write(&path, r#"{"mode":"dateDiff","startMs":1000}"#).unwrap();

        let store = FormStore::new(path).unwrap();
        let form = store.form();
        assert_eq!(form.mode, CalcMode::DateDiff);
        assert_eq!(form.start_ms, Some(1000));
        assert_eq!(form.sign, Sign::Positive);
        assert_eq!(form.input, DurationInput::default());
        assert_eq!(form.countdown_target_ms, None);
    }

    #[test]
    fn reset_clears_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");

        let store = FormStore::new(path.clone()).unwrap();
        store
            .update(FormState {
                start_ms: Some(5),
                ..FormState::default()
            })
            .unwrap();
        store.reset().unwrap();

        let reloaded = FormStore::new(path).unwrap();
        assert_eq!(reloaded.form(), FormState::default());
    }
}
