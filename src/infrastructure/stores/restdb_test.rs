use anyhow::bail;
use anyhow::Result;
use chrono::TimeZone;
use chrono::Utc;
use mockito::Matcher;
use tokio::sync::mpsc;

use super::ChangeLine;
use super::RestDb;
use crate::domain::models::ChatStore;
use crate::domain::models::Event;
use crate::domain::models::MessageRecord;
use crate::domain::models::NewMessageRecord;

impl RestDb {
    fn with_url(url: String) -> RestDb {
        return RestDb {
            url,
            api_key: "test-key".to_string(),
        };
    }
}

#[tokio::test]
async fn it_fetches_a_session() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rest/v1/chatbot_sessions")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".to_string(), "eq.abc".to_string()),
            Matcher::UrlEncoded("select".to_string(), "id,last_seen".to_string()),
        ]))
        .match_header("apikey", "test-key")
        .with_status(200)
        .with_body(r#"[{"id": "abc", "last_seen": "2024-01-01T00:00:00Z"}]"#)
        .create();

    let store = RestDb::with_url(server.url());
    let session = store.fetch_session("abc").await?;

    mock.assert();
    let session = session.unwrap();
    assert_eq!(session.id, "abc".to_string());
    assert_eq!(
        session.last_seen,
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    );
    return Ok(());
}

#[tokio::test]
async fn it_returns_none_for_a_missing_session() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rest/v1/chatbot_sessions")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();

    let store = RestDb::with_url(server.url());
    let session = store.fetch_session("abc").await?;

    mock.assert();
    assert!(session.is_none());
    return Ok(());
}

#[tokio::test]
async fn it_fails_session_lookups_on_server_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rest/v1/chatbot_sessions")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    let store = RestDb::with_url(server.url());
    let res = store.fetch_session("abc").await;

    mock.assert();
    assert!(res.is_err());
}

#[tokio::test]
async fn it_touches_a_session() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PATCH", "/rest/v1/chatbot_sessions")
        .match_query(Matcher::UrlEncoded("id".to_string(), "eq.abc".to_string()))
        .match_body(Matcher::Regex("last_seen".to_string()))
        .with_status(204)
        .create();

    let store = RestDb::with_url(server.url());
    store.touch_session("abc", Utc::now()).await?;

    mock.assert();
    return Ok(());
}

#[tokio::test]
async fn it_inserts_a_message_and_returns_the_identifier() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/rest/v1/conversation_messages")
        .match_header("Prefer", "return=representation")
        .match_body(Matcher::PartialJsonString(
            r#"{"question": "What is Rust?", "answer": null, "answered": false, "status": "pending"}"#.to_string(),
        ))
        .with_status(201)
        .with_body(r#"[{"id": "row-1", "question": "What is Rust?", "answer": null, "answered": false, "status": "pending"}]"#)
        .create();

    let store = RestDb::with_url(server.url());
    let record_id = store
        .insert_message(NewMessageRecord::question("What is Rust?"))
        .await?;

    mock.assert();
    assert_eq!(record_id, Some("row-1".to_string()));
    return Ok(());
}

#[tokio::test]
async fn it_handles_inserts_without_an_identifier_echo() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/rest/v1/conversation_messages")
        .with_status(201)
        .with_body("[]")
        .create();

    let store = RestDb::with_url(server.url());
    let record_id = store
        .insert_message(NewMessageRecord::question("What is Rust?"))
        .await?;

    mock.assert();
    assert!(record_id.is_none());
    return Ok(());
}

#[tokio::test]
async fn it_deletes_all_messages() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", "/rest/v1/conversation_messages")
        .match_query(Matcher::UrlEncoded(
            "id".to_string(),
            "not.is.null".to_string(),
        ))
        .with_status(204)
        .create();

    let store = RestDb::with_url(server.url());
    store.delete_messages().await?;

    mock.assert();
    return Ok(());
}

#[tokio::test]
async fn it_forwards_update_events_from_the_change_feed() -> Result<()> {
    let insert_line = serde_json::to_string(&ChangeLine {
        event: "INSERT".to_string(),
        record: MessageRecord {
            id: Some("row-0".to_string()),
            question: Some("What is Rust?".to_string()),
            ..MessageRecord::default()
        },
    })?;
    let update_line = serde_json::to_string(&ChangeLine {
        event: "UPDATE".to_string(),
        record: MessageRecord {
            id: Some("row-1".to_string()),
            answer: Some("A systems language.".to_string()),
            answered: true,
            status: "answered".to_string(),
            ..MessageRecord::default()
        },
    })?;

    let body = [insert_line, "not json at all".to_string(), update_line].join("\n");

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/realtime/v1/conversation_messages")
        .match_query(Matcher::UrlEncoded(
            "event".to_string(),
            "eq.UPDATE".to_string(),
        ))
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let store = RestDb::with_url(server.url());
    let _subscription = store.subscribe(&tx).await?;

    mock.assert();

    // Insert events and garbage lines are dropped; the first thing through
    // the channel is the update.
    let update = match rx.recv().await.unwrap() {
        Event::AnswerReceived(update) => update,
        _ => bail!("Wrong event type from recv"),
    };

    assert_eq!(update.id, "row-1".to_string());
    assert_eq!(update.answer, Some("A systems language.".to_string()));
    assert!(update.answered);
    assert_eq!(update.status, "answered".to_string());
    return Ok(());
}

#[tokio::test]
async fn it_cancels_a_subscription() -> Result<()> {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/realtime/v1/conversation_messages")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("")
        .create();

    let (tx, _rx) = mpsc::unbounded_channel::<Event>();
    let store = RestDb::with_url(server.url());
    let subscription = store.subscribe(&tx).await?;
    subscription.cancel();
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_subscribe_on_server_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/realtime/v1/conversation_messages")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    let (tx, _rx) = mpsc::unbounded_channel::<Event>();
    let store = RestDb::with_url(server.url());
    let res = store.subscribe(&tx).await;

    mock.assert();
    assert!(res.is_err());
}
