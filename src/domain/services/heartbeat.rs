#[cfg(test)]
#[path = "heartbeat_test.rs"]
mod tests;

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::domain::models::StoreBox;

/// Seconds between liveness writes once the gate has opened.
pub const BEAT_SECS: u64 = 30;

/// Owns the liveness timer. Restarting aborts the previous timer first, so
/// two beats never run against the same session at once.
#[derive(Default)]
pub struct Heartbeat {
    handle: Option<JoinHandle<()>>,
}

impl Heartbeat {
    pub fn start(&mut self, store: StoreBox, session_id: &str) {
        self.start_with_period(store, session_id, Duration::from_secs(BEAT_SECS));
    }

    pub fn start_with_period(&mut self, store: StoreBox, session_id: &str, period: Duration) {
        self.stop();

        let session_id = session_id.to_string();
        self.handle = Some(tokio::spawn(async move {
            // The first tick fires immediately.
            let mut interval = time::interval(period);
            loop {
                interval.tick().await;
                if let Err(err) = store.touch_session(&session_id, Utc::now()).await {
                    tracing::warn!(error = ?err, session_id, "heartbeat write failed");
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        match &self.handle {
            Some(handle) => return !handle.is_finished(),
            None => return false,
        }
    }
}
