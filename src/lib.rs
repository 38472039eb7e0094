pub mod appresult;
pub mod cable;
pub mod db;
pub mod messages;
pub mod res;

pub use appresult::{AppError, AppResult};
pub use messages::model::ChatMessage;

use axum::{extract::FromRef, routing::get, Router};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Capacity of the broadcast topic. A subscriber that falls further behind
/// than this skips ahead (see `cable`); clients recover the backlog by
/// refetching `/messages`.
pub const BROADCAST_CAPACITY: usize = 100;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub tx: broadcast::Sender<ChatMessage>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self {
            db_pool,
            tx: broadcast::channel(BROADCAST_CAPACITY).0,
        }
    }
}

/// Assembles the full application router. `main` and the integration tests
/// both go through here so they exercise the same app.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(res::username_page))
        .route("/chat", get(res::chat_page))
        .route("/up", get(res::up))
        .route("/cable", get(cable::cable))
        .merge(messages::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
