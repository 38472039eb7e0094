// Shared helpers for the integration tests.

use std::str::FromStr;

use parley::{db, AppState};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// App state over a fresh in-memory database. A single connection keeps
/// every query in the test on the same in-memory instance.
pub async fn memory_state() -> AppState {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").expect("connect options");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory pool");
    db::init(&pool).await.expect("schema init");
    AppState::new(pool)
}
