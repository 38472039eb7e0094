use axum::{debug_handler, http::StatusCode, response::{Html, IntoResponse}};

#[macro_export]
macro_rules! include_res {
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

/// Name-entry view. The page itself redirects to /chat when a display name
/// is already stored client-side.
#[debug_handler]
pub async fn username_page() -> impl IntoResponse {
    Html(include_res!(str, "/pages/username.html"))
}

/// Chat view. The page redirects back to / when no display name is stored.
#[debug_handler]
pub async fn chat_page() -> impl IntoResponse {
    Html(include_res!(str, "/pages/chat.html"))
}

/// Health probe.
#[debug_handler]
pub async fn up() -> impl IntoResponse {
    StatusCode::OK
}
