use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::Event;
use super::NewMessageRecord;
use super::SessionRecord;

/// Handle for a running change-feed reader. Dropping the handle leaves the
/// reader running for the life of the process; `cancel` tears it down.
pub struct Subscription {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn new(token: CancellationToken, handle: JoinHandle<()>) -> Subscription {
        return Subscription { token, handle };
    }

    pub fn is_active(&self) -> bool {
        return !self.handle.is_finished();
    }

    pub fn cancel(self) {
        self.token.cancel();
        self.handle.abort();
    }
}

#[async_trait]
pub trait ChatStore {
    /// Fetches the session row by identifier. A missing row is not an
    /// error.
    async fn fetch_session(&self, id: &str) -> Result<Option<SessionRecord>>;

    /// Rewrites the session's last-activity timestamp.
    async fn touch_session(&self, id: &str, seen_at: DateTime<Utc>) -> Result<()>;

    /// Inserts a conversation row and returns the store-assigned
    /// identifier when the store echoes it back.
    async fn insert_message(&self, row: NewMessageRecord) -> Result<Option<String>>;

    /// Deletes every conversation row.
    async fn delete_messages(&self) -> Result<()>;

    /// Opens the change feed for conversation rows, forwarding update
    /// events into the app event channel until cancelled or the feed
    /// closes.
    async fn subscribe(&self, tx: &mpsc::UnboundedSender<Event>) -> Result<Subscription>;
}

pub type StoreBox = Arc<dyn ChatStore + Send + Sync>;
