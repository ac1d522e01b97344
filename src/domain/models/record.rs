use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Gate row keyed by a fixed identifier. `last_seen` doubles as the
/// freshness signal; last writer wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub last_seen: Option<DateTime<Utc>>,
}

/// Conversation row as the store returns it. The identifier is assigned at
/// insert time, and some deployments omit it from the representation echo.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub answered: bool,
    #[serde(default)]
    pub status: String,
}

/// Insert payload for a conversation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessageRecord {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub answered: bool,
    pub status: String,
}

impl NewMessageRecord {
    pub fn question(text: &str) -> NewMessageRecord {
        return NewMessageRecord {
            question: Some(text.to_string()),
            answer: None,
            answered: false,
            status: "pending".to_string(),
        };
    }

    // Greetings are written pre-answered so the backend never picks them up
    // as an open turn.
    pub fn greeting(text: &str) -> NewMessageRecord {
        return NewMessageRecord {
            question: None,
            answer: Some(text.to_string()),
            answered: true,
            status: "greeting".to_string(),
        };
    }
}

/// Update event delivered by the store's change feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageUpdate {
    pub id: String,
    pub answer: Option<String>,
    pub answered: bool,
    pub status: String,
}
