use axum::{debug_handler, extract::State, Json};
use sqlx::SqlitePool;

use crate::messages::model::{self, ChatMessage};
use crate::AppResult;

#[debug_handler(state = crate::AppState)]
pub(crate) async fn index(
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<ChatMessage>>> {
    let messages = model::recent(&db_pool).await?;
    Ok(Json(messages))
}
