mod create;
mod list;
pub mod model;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/messages", get(list::index).post(create::create))
}
