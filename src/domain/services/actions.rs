#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::Heartbeat;
use super::SessionGate;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::NewMessageRecord;
use crate::domain::models::StoreBox;

pub const GREETING: &str = "Hey there! What can I do for you?";

/// Placeholder tag used when the store did not hand back a row identifier.
/// Such a placeholder is rendered but will never resolve.
pub const PENDING_TAG: &str = "pending";

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        store: StoreBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let session_id = Config::get(ConfigKey::SessionID);

        if !SessionGate::check_and_update(&store, &session_id).await {
            tx.send(Event::GateDenied())?;
            // The waiting view stays up until the process is torn down. Park
            // here so the UI keeps running.
            while rx.recv().await.is_some() {}
            return Ok(());
        }

        let mut heartbeat = Heartbeat::default();
        heartbeat.start(store.clone(), &session_id);
        tx.send(Event::GateOpened())?;

        Self::reset_conversation(&store, &tx).await?;

        let _subscription = match store.subscribe(&tx).await {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                tracing::error!(error = ?err, "could not open the update feed");
                None
            }
        };

        loop {
            let action = rx.recv().await;
            if action.is_none() {
                break;
            }

            match action.unwrap() {
                Action::SubmitQuestion(text) => {
                    Self::submit_question(&store, &tx, &text).await?;
                }
            }
        }

        return Ok(());
    }

    async fn reset_conversation(store: &StoreBox, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
        if let Err(err) = store.delete_messages().await {
            tracing::error!(error = ?err, "failed to clear the previous conversation");
        }

        if let Err(err) = store.insert_message(NewMessageRecord::greeting(GREETING)).await {
            tracing::error!(error = ?err, "failed to persist the greeting");
        }

        tx.send(Event::ConversationReady(Message::new(Author::Bot, GREETING)))?;
        return Ok(());
    }

    async fn submit_question(
        store: &StoreBox,
        tx: &mpsc::UnboundedSender<Event>,
        text: &str,
    ) -> Result<()> {
        // Blank submissions never reach the store.
        if text.trim().is_empty() {
            return Ok(());
        }

        let tag = match store.insert_message(NewMessageRecord::question(text)).await {
            Ok(Some(record_id)) => record_id,
            Ok(None) => {
                tracing::warn!("insert did not return a row identifier");
                PENDING_TAG.to_string()
            }
            Err(err) => {
                tracing::error!(error = ?err, "failed to persist the question");
                PENDING_TAG.to_string()
            }
        };

        tx.send(Event::AnswerPending(tag))?;
        return Ok(());
    }
}
