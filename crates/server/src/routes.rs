use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::auth::{self, ServerState};

pub mod cats;
pub mod toys;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "app": "catlog",
        "message": "catalog your cats, their toys, feedings, and photos"
    }))
}

async fn about() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "app": "catlog",
        "about": "a record-keeping service for pet owners"
    }))
}

/// Build the full application router: public pages, account flow, and the
/// protected cat/toy resources.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let public = Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/health", get(health));

    let accounts = Router::new()
        .route("/accounts/signup", post(auth::signup))
        .route("/accounts/login", post(auth::login))
        .route("/accounts/logout", post(auth::logout));

    let cats = Router::new()
        .route("/cats", get(cats::index).post(cats::create))
        .route("/cats/:id", get(cats::detail).put(cats::update).delete(cats::remove))
        .route("/cats/:id/feedings", post(cats::add_feeding))
        .route("/cats/:id/photos", post(cats::add_photo))
        .route("/cats/:id/toys/:toy_id", post(cats::assoc_toy).delete(cats::unassoc_toy));

    let toys = Router::new()
        .route("/toys", get(toys::index).post(toys::create))
        .route("/toys/:id", get(toys::detail).put(toys::update).delete(toys::remove));

    public
        .merge(accounts)
        .merge(cats)
        .merge(toys)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
