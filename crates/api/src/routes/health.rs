use axum::{routing::get, Router};

async fn ping() -> &'static str {
    "OK"
}

pub fn routes() -> Router {
    Router::new().route("/ping", get(ping))
}
