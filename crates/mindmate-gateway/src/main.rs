//! MindMate API gateway — thin HTTP plumbing over the ensemble core.
//! Validates request bodies, holds the shared service, and maps the core's
//! only caller-facing error (empty input) to 422.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use mindmate_core::{
    ConversationWindow, EnsembleConfig, EnsembleError, EnsembleService, Speaker, Turn,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
struct AppState {
    service: Arc<EnsembleService>,
}

#[derive(Deserialize)]
struct TextRequest {
    text: String,
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    /// Prior turns, oldest first; only the newest five are retained.
    #[serde(default)]
    history: Vec<Turn>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EnsembleConfig::from_env();
    let client = reqwest::Client::builder()
        .build()
        .expect("build HTTP client");
    let state = AppState {
        service: Arc::new(EnsembleService::from_config(&client, &config)),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/moderate", post(moderate_handler))
        .route("/api/v1/mood", post(mood_handler))
        .route("/api/v1/chat", post(chat_handler))
        .with_state(state);

    let addr = std::env::var("MINDMATE_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".into());
    tracing::info!(target: "mindmate::gateway", %addr, "MindMate gateway listening");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind gateway address");
    axum::serve(listener, app).await.expect("serve gateway");
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

fn error_response(err: EnsembleError) -> Response {
    let status = match err {
        EnsembleError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
        // Backend errors are recovered inside the core; reaching here is a bug.
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

async fn moderate_handler(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Response {
    match state.service.moderate(&req.text).await {
        Ok(verdict) => Json(verdict).into_response(),
        Err(err) => error_response(err),
    }
}

async fn mood_handler(State(state): State<AppState>, Json(req): Json<TextRequest>) -> Response {
    match state.service.mood(&req.text).await {
        Ok(verdict) => Json(verdict).into_response(),
        Err(err) => error_response(err),
    }
}

async fn chat_handler(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    let mut window = ConversationWindow::from_turns(req.history);
    window.push(Speaker::User, req.message);

    match state.service.reply(&window).await {
        Ok(reply) => Json(serde_json::json!({ "reply": reply })).into_response(),
        Err(err) => error_response(err),
    }
}
