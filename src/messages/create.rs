use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tracing::info;

use crate::messages::model::{self, ChatMessage, NewMessage};
use crate::AppResult;

#[derive(Debug, Deserialize)]
pub(crate) struct MessageParams {
    message: NewMessage,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    State(tx): State<broadcast::Sender<ChatMessage>>,
    Json(MessageParams { message }): Json<MessageParams>,
) -> AppResult<Response> {
    let errors = message.validate();
    if !errors.is_empty() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": errors })),
        )
            .into_response());
    }

    let content = message.content.unwrap_or_default();
    let username = message.username.unwrap_or_default();
    let created = model::insert(&db_pool, &content, &username).await?;
    info!("message {} created by {}", created.id, created.username);

    // No subscribers is fine; the send result only counts receivers.
    let _ = tx.send(created.clone());

    Ok((StatusCode::CREATED, Json(created)).into_response())
}
