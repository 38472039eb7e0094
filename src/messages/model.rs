use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Fixed page size for the message list.
pub const PAGE_SIZE: i64 = 100;

/// A persisted chat message; also the payload carried by the broadcast topic.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: i64,
    pub content: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Incoming message fields, from the POST body's `message` object or from a
/// speak frame on the WebSocket. Fields are optional so that a missing field
/// reports a validation error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct NewMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl NewMessage {
    /// Presence check: absent, empty, or whitespace-only fields are blank.
    /// Returns the full list of failures; empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(&self.content) {
            errors.push("Content can't be blank".to_owned());
        }
        if is_blank(&self.username) {
            errors.push("Username can't be blank".to_owned());
        }
        errors
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// Inserts a row and returns it as stored, id and timestamp included.
pub async fn insert(
    db_pool: &SqlitePool,
    content: &str,
    username: &str,
) -> Result<ChatMessage, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO messages (content, username, created_at) VALUES (?, ?, ?) \
         RETURNING id, content, username, created_at",
    )
    .bind(content)
    .bind(username)
    .bind(Utc::now())
    .fetch_one(db_pool)
    .await
}

/// The most recent `PAGE_SIZE` messages, ascending by creation order.
///
/// Ordered by id: ids are assigned monotonically by the database, while
/// timestamps need not be unique.
pub async fn recent(db_pool: &SqlitePool) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let mut messages: Vec<ChatMessage> = sqlx::query_as(
        "SELECT id, content, username, created_at FROM messages ORDER BY id DESC LIMIT ?",
    )
    .bind(PAGE_SIZE)
    .fetch_all(db_pool)
    .await?;

    messages.reverse();
    Ok(messages)
}
