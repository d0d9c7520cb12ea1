use std::{sync::Arc, time::Duration};

use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use tokio::{
    sync::{mpsc::UnboundedSender, Mutex},
    task::JoinHandle,
    time,
};

use super::state::CountdownState;
use crate::format::format_fixed;

/// Placeholder shown after `stop()` clears the display.
pub const IDLE_TIME_TEXT: &str = "--:--:--";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CountdownPhase {
    Remaining,
    Passed,
    Idle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ColorIntent {
    Neutral,
    Warning,
}

impl CountdownPhase {
    pub fn label(self) -> &'static str {
        match self {
            CountdownPhase::Remaining => "Time remaining",
            CountdownPhase::Passed => "Target passed",
            CountdownPhase::Idle => "",
        }
    }

    pub fn intent(self) -> ColorIntent {
        match self {
            CountdownPhase::Passed => ColorIntent::Warning,
            CountdownPhase::Remaining | CountdownPhase::Idle => ColorIntent::Neutral,
        }
    }
}

/// One display refresh: rendered once synchronously at `start()` and then
/// once per tick until the driver stops.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountdownUpdate {
    pub phase: CountdownPhase,
    pub label: String,
    pub intent: ColorIntent,
    pub time_text: String,
    pub target_ms: Option<i64>,
}

impl CountdownUpdate {
    /// Render the target instant against a given now. The phase flips at the
    /// first render where `now_ms >= target_ms`.
    pub fn at(target_ms: i64, now_ms: i64) -> Self {
        let delta_ms = target_ms - now_ms;
        let phase = if delta_ms >= 0 {
            CountdownPhase::Remaining
        } else {
            CountdownPhase::Passed
        };
        Self {
            phase,
            label: phase.label().to_string(),
            intent: phase.intent(),
            time_text: format_fixed(delta_ms.abs()),
            target_ms: Some(target_ms),
        }
    }

    pub fn idle() -> Self {
        Self {
            phase: CountdownPhase::Idle,
            label: String::new(),
            intent: ColorIntent::Neutral,
            time_text: IDLE_TIME_TEXT.to_string(),
            target_ms: None,
        }
    }
}

/// Drives the 1 Hz countdown against a fixed target instant. Holds at most
/// one ticker task; starting again replaces and aborts the previous one.
#[derive(Clone)]
pub struct CountdownDriver {
    state: Arc<Mutex<CountdownState>>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    updates: UnboundedSender<CountdownUpdate>,
    tick_interval: Duration,
}

impl CountdownDriver {
    pub fn new(updates: UnboundedSender<CountdownUpdate>) -> Self {
        Self {
            state: Arc::new(Mutex::new(CountdownState::new())),
            ticker: Arc::new(Mutex::new(None)),
            updates,
            tick_interval: Duration::from_secs(1),
        }
    }

    pub async fn state(&self) -> CountdownState {
        *self.state.lock().await
    }

    /// Begin counting toward `target_ms`. Any running session is cancelled
    /// first, then one update is emitted before the first scheduled tick.
    pub async fn start(&self, target_ms: i64) {
        self.cancel_ticker().await;

        {
            let mut state = self.state.lock().await;
            if state.is_running() {
                info!("superseding active countdown with target {target_ms}");
            }
            state.begin(target_ms);
        }

        // Immediate render; the first interval tick lands a second later.
        // A failed send means the receiver is gone, so a ticker would have
        // nothing to render for.
        if self
            .updates
            .send(CountdownUpdate::at(target_ms, Utc::now().timestamp_millis()))
            .is_err()
        {
            self.state.lock().await.clear();
            return;
        }

        self.spawn_ticker(target_ms).await;
    }

    /// Cancel any running session and emit the cleared placeholder.
    pub async fn stop(&self) {
        self.state.lock().await.clear();
        self.cancel_ticker().await;
        let _ = self.updates.send(CountdownUpdate::idle());
        info!("countdown stopped");
    }

    async fn spawn_ticker(&self, target_ms: i64) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let updates = self.updates.clone();
        let tick_interval = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            // The zeroth tick resolves immediately; start() already rendered
            // that instant.
            interval.tick().await;
            loop {
                interval.tick().await;

                {
                    let guard = state.lock().await;
                    if !guard.is_running() {
                        break;
                    }
                }

                let update = CountdownUpdate::at(target_ms, Utc::now().timestamp_millis());
                if updates.send(update).is_err() {
                    // Receiver went away; nothing left to render for.
                    break;
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }

    #[cfg(test)]
    async fn has_ticker(&self) -> bool {
        self.ticker.lock().await.is_some()
    }
}
