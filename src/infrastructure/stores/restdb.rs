#[cfg(test)]
#[path = "restdb_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use futures::stream::TryStreamExt;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatStore;
use crate::domain::models::Event;
use crate::domain::models::MessageRecord;
use crate::domain::models::MessageUpdate;
use crate::domain::models::NewMessageRecord;
use crate::domain::models::SessionRecord;
use crate::domain::models::Subscription;

const SESSIONS_TABLE: &str = "chatbot_sessions";
const MESSAGES_TABLE: &str = "conversation_messages";

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TouchRequest {
    last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChangeLine {
    #[serde(default)]
    event: String,
    record: MessageRecord,
}

pub struct RestDb {
    url: String,
    api_key: String,
}

impl Default for RestDb {
    fn default() -> RestDb {
        return RestDb {
            url: Config::get(ConfigKey::StoreURL),
            api_key: Config::get(ConfigKey::StoreKey),
        };
    }
}

impl RestDb {
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder =
            reqwest::Client::new().request(method, format!("{url}{path}", url = self.url));

        if !self.api_key.is_empty() {
            builder = builder
                .header("apikey", &self.api_key)
                .bearer_auth(&self.api_key);
        }

        return builder;
    }
}

#[async_trait]
impl ChatStore for RestDb {
    #[allow(clippy::implicit_return)]
    async fn fetch_session(&self, id: &str) -> Result<Option<SessionRecord>> {
        let res = self
            .request(reqwest::Method::GET, &format!("/rest/v1/{SESSIONS_TABLE}"))
            .query(&[
                ("id", format!("eq.{id}")),
                ("select", "id,last_seen".to_string()),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            bail!(format!(
                "session lookup failed with status {status}",
                status = res.status().as_u16()
            ));
        }

        let rows = res.json::<Vec<SessionRecord>>().await?;
        return Ok(rows.into_iter().next());
    }

    #[allow(clippy::implicit_return)]
    async fn touch_session(&self, id: &str, seen_at: DateTime<Utc>) -> Result<()> {
        let res = self
            .request(reqwest::Method::PATCH, &format!("/rest/v1/{SESSIONS_TABLE}"))
            .query(&[("id", format!("eq.{id}"))])
            .json(&TouchRequest { last_seen: seen_at })
            .send()
            .await?;

        if !res.status().is_success() {
            bail!(format!(
                "session update failed with status {status}",
                status = res.status().as_u16()
            ));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn insert_message(&self, row: NewMessageRecord) -> Result<Option<String>> {
        let res = self
            .request(reqwest::Method::POST, &format!("/rest/v1/{MESSAGES_TABLE}"))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;

        if !res.status().is_success() {
            bail!(format!(
                "message insert failed with status {status}",
                status = res.status().as_u16()
            ));
        }

        let rows = res.json::<Vec<MessageRecord>>().await?;
        match rows.into_iter().next() {
            Some(record) => return Ok(record.id),
            None => return Ok(None),
        }
    }

    #[allow(clippy::implicit_return)]
    async fn delete_messages(&self) -> Result<()> {
        let res = self
            .request(
                reqwest::Method::DELETE,
                &format!("/rest/v1/{MESSAGES_TABLE}"),
            )
            .query(&[("id", "not.is.null")])
            .send()
            .await?;

        if !res.status().is_success() {
            bail!(format!(
                "message delete failed with status {status}",
                status = res.status().as_u16()
            ));
        }

        return Ok(());
    }

    /// Opens the newline-delimited JSON change feed and forwards UPDATE
    /// events until the feed closes, the UI goes away, or the handle is
    /// cancelled.
    #[allow(clippy::implicit_return)]
    async fn subscribe(&self, tx: &mpsc::UnboundedSender<Event>) -> Result<Subscription> {
        let res = self
            .request(
                reqwest::Method::GET,
                &format!("/realtime/v1/{MESSAGES_TABLE}"),
            )
            .query(&[("event", "eq.UPDATE")])
            .send()
            .await?;

        if !res.status().is_success() {
            bail!(format!(
                "subscribe failed with status {status}",
                status = res.status().as_u16()
            ));
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let token = CancellationToken::new();
        let reader_token = token.clone();
        let reader_tx = tx.clone();

        let handle = tokio::spawn(async move {
            loop {
                let line_res = tokio::select! {
                    _ = reader_token.cancelled() => break,
                    line_res = lines_reader.next_line() => line_res,
                };

                let line = match line_res {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) => {
                        tracing::warn!(error = ?err, "update feed closed unexpectedly");
                        break;
                    }
                };

                if line.trim().is_empty() {
                    continue;
                }

                let change = match serde_json::from_str::<ChangeLine>(&line) {
                    Ok(change) => change,
                    Err(err) => {
                        tracing::debug!(error = ?err, "skipping unparseable change line");
                        continue;
                    }
                };

                if change.event != "UPDATE" {
                    continue;
                }

                let record_id = match change.record.id {
                    Some(record_id) => record_id,
                    None => continue,
                };

                let update = MessageUpdate {
                    id: record_id,
                    answer: change.record.answer,
                    answered: change.record.answered,
                    status: change.record.status,
                };

                if reader_tx.send(Event::AnswerReceived(update)).is_err() {
                    break;
                }
            }
        });

        return Ok(Subscription::new(token, handle));
    }
}
