use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time;

use super::Heartbeat;
use crate::domain::models::ChatStore;
use crate::domain::models::Event;
use crate::domain::models::NewMessageRecord;
use crate::domain::models::SessionRecord;
use crate::domain::models::StoreBox;
use crate::domain::models::Subscription;

#[derive(Default)]
struct CountingStore {
    touches: AtomicUsize,
}

#[async_trait]
impl ChatStore for CountingStore {
    async fn fetch_session(&self, _id: &str) -> Result<Option<SessionRecord>> {
        bail!("not used by the heartbeat");
    }

    async fn touch_session(&self, _id: &str, _seen_at: DateTime<Utc>) -> Result<()> {
        self.touches.fetch_add(1, Ordering::SeqCst);
        return Ok(());
    }

    async fn insert_message(&self, _row: NewMessageRecord) -> Result<Option<String>> {
        bail!("not used by the heartbeat");
    }

    async fn delete_messages(&self) -> Result<()> {
        bail!("not used by the heartbeat");
    }

    async fn subscribe(&self, _tx: &mpsc::UnboundedSender<Event>) -> Result<Subscription> {
        bail!("not used by the heartbeat");
    }
}

#[tokio::test]
async fn it_beats_immediately_and_then_periodically() {
    let counting = Arc::new(CountingStore::default());
    let store: StoreBox = counting.clone();

    let mut heartbeat = Heartbeat::default();
    heartbeat.start_with_period(store, "abc", Duration::from_millis(10));

    time::sleep(Duration::from_millis(55)).await;
    assert!(counting.touches.load(Ordering::SeqCst) >= 3);
    assert!(heartbeat.is_running());
}

#[tokio::test]
async fn it_stops_beating_on_stop() {
    let counting = Arc::new(CountingStore::default());
    let store: StoreBox = counting.clone();

    let mut heartbeat = Heartbeat::default();
    heartbeat.start_with_period(store, "abc", Duration::from_millis(10));
    time::sleep(Duration::from_millis(25)).await;
    heartbeat.stop();

    let after_stop = counting.touches.load(Ordering::SeqCst);
    time::sleep(Duration::from_millis(30)).await;
    assert_eq!(counting.touches.load(Ordering::SeqCst), after_stop);
    assert!(!heartbeat.is_running());
}

#[tokio::test]
async fn it_replaces_the_timer_on_restart() {
    let counting = Arc::new(CountingStore::default());
    let store: StoreBox = counting.clone();

    let mut heartbeat = Heartbeat::default();
    heartbeat.start_with_period(store.clone(), "abc", Duration::from_secs(3600));
    heartbeat.start_with_period(store, "abc", Duration::from_secs(3600));

    time::sleep(Duration::from_millis(25)).await;
    // At most one immediate beat per start call, and only one timer left
    // running. The first timer may be aborted before its first beat lands.
    assert!(counting.touches.load(Ordering::SeqCst) <= 2);
    assert!(heartbeat.is_running());
}

#[tokio::test]
async fn it_tolerates_stop_without_start() {
    let mut heartbeat = Heartbeat::default();
    heartbeat.stop();
    heartbeat.stop();
    assert!(!heartbeat.is_running());
}
