use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::api::HttpArticleClient;
use crate::http::{pages, proxy};
use crate::markdown::StyleRules;
use crate::resolve::RouteResolver;
use crate::store::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub resolver: RouteResolver,
    /// Raw access for the proxy surface.
    pub upstream: Arc<HttpArticleClient>,
    pub sessions: SessionRegistry,
    pub rules: Arc<StyleRules>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/article/{id}", get(pages::article))
        .route("/date/{date}", get(pages::date))
        .route("/api/article/{id}", get(proxy::article))
        .route("/api/date/{date}", get(proxy::date))
        .route("/api/latest", get(proxy::latest))
        .route("/api/navigation/departure", post(pages::departure))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
