#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;

use chrono::Utc;

use crate::domain::models::StoreBox;

/// Seconds a session may stay untouched before a new visitor can claim it.
pub const STALE_AFTER_SECS: i64 = 40;

pub struct SessionGate {}

impl SessionGate {
    /// Decides whether the chat view may be revealed. A session that was
    /// seen within the stale window belongs to someone else; a stale one is
    /// claimed by rewriting its timestamp. Every failure keeps the gate
    /// closed, logged but never retried.
    pub async fn check_and_update(store: &StoreBox, session_id: &str) -> bool {
        let record_res = store.fetch_session(session_id).await;
        if let Err(err) = record_res {
            tracing::error!(error = ?err, session_id, "session lookup failed");
            return false;
        }

        let last_seen = match record_res.unwrap() {
            Some(record) => match record.last_seen {
                Some(last_seen) => last_seen,
                None => {
                    tracing::warn!(session_id, "session record has no last_seen");
                    return false;
                }
            },
            None => {
                tracing::warn!(session_id, "session record not found");
                return false;
            }
        };

        let now = Utc::now();
        let age_ms = (now - last_seen).num_milliseconds();
        if age_ms <= STALE_AFTER_SECS * 1000 {
            tracing::info!(age_ms, "session still fresh, keeping the waiting view");
            return false;
        }

        if let Err(err) = store.touch_session(session_id, now).await {
            tracing::error!(error = ?err, session_id, "failed to claim stale session");
            return false;
        }

        tracing::info!(age_ms, "session was stale and has been claimed");
        return true;
    }
}
