use axum::{
    debug_handler,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::messages::model::{self, ChatMessage, NewMessage};
use crate::AppResult;

/// The single broadcast topic, exposed as a WebSocket. Every connection
/// subscribes on upgrade and is fed each newly created message as a JSON
/// text frame. Inbound frames are speak requests: `{content, username}`
/// creates a message through the same path as `POST /messages`.
#[debug_handler(state = crate::AppState)]
pub async fn cable(
    State(db_pool): State<SqlitePool>,
    State(tx): State<broadcast::Sender<ChatMessage>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(async move |socket| {
        let mut rx = tx.subscribe();
        let (mut sender, mut receiver) = socket.split();
        info!("cable subscriber connected");

        let relay_task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(message) => {
                        let Ok(payload) = serde_json::to_string(&message) else {
                            continue;
                        };
                        if sender.send(payload.into()).await.is_err() {
                            break;
                        }
                    }
                    // A slow subscriber drops the missed messages, not its
                    // subscription; the client repairs from /messages.
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("cable subscriber lagged, skipped {skipped} messages");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        while let Some(Ok(frame)) = receiver.next().await {
            let Ok(speak) = serde_json::from_slice::<NewMessage>(&frame.into_data()) else {
                continue;
            };

            if let Err(err) = speak_message(&db_pool, &tx, speak).await {
                warn!("speak failed: {:?}", err.0);
            }
        }

        relay_task.abort();
        info!("cable subscriber disconnected");
    })
}

/// Persist-then-publish for a speak frame. Invalid frames are dropped
/// without an answer, matching the HTTP path's validation rules.
async fn speak_message(
    db_pool: &SqlitePool,
    tx: &broadcast::Sender<ChatMessage>,
    speak: NewMessage,
) -> AppResult<()> {
    let errors = speak.validate();
    if !errors.is_empty() {
        debug!("dropping invalid speak frame: {}", errors.join(", "));
        return Ok(());
    }

    let content = speak.content.unwrap_or_default();
    let username = speak.username.unwrap_or_default();
    let created = model::insert(db_pool, &content, &username).await?;
    info!("message {} created by {} via cable", created.id, created.username);

    let _ = tx.send(created);
    Ok(())
}
