//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, CreateSessionRequest, DemoPromptsResponse, ErrorResponse,
    GeneratorResponse, ModelInfo, SessionResponse, SettingsRequest,
};
use super::AppState;
use crate::runtime::{SessionError, SettingsUpdate};
use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

/// Prompts offered as one-click demos
pub const DEMO_PROMPTS: &[&str] = &[
    "I've been studying, but my grades don't seem to improve.",
    "I feel stressed and unmotivated.",
];

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(end_session))
        // Conversation turns
        .route("/api/sessions/:id/chat", post(send_chat))
        .route("/api/sessions/:id/reset", post(reset_session))
        .route("/api/sessions/:id/settings", post(update_settings))
        // Static info
        .route("/api/demo-prompts", get(demo_prompts))
        .route("/api/generator", get(generator_info))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Session Lifecycle
// ============================================================

async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionResponse>, AppError> {
    // Empty body selects the default settings
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?
    };
    let session = state.sessions.create(req.mode, req.profile).await;
    Ok(Json(SessionResponse {
        session: session.into(),
    }))
}

async fn get_session(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let Path(id) = path?;
    let session = state.sessions.get(id).await?;
    Ok(Json(SessionResponse {
        session: session.into(),
    }))
}

async fn end_session(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.sessions.end(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Conversation Turns
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest(
            "Message text must not be empty".to_string(),
        ));
    }

    let (outcome, session) = state.sessions.chat(id, text).await?;
    Ok(Json(ChatResponse::new(outcome, session)))
}

async fn reset_session(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let Path(id) = path?;
    let session = state.sessions.reset(id).await?;
    Ok(Json(SessionResponse {
        session: session.into(),
    }))
}

async fn update_settings(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<SettingsRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let update = SettingsUpdate {
        mode: req.mode,
        profile: req.profile,
    };
    let session = state.sessions.update_settings(id, update).await?;
    Ok(Json(SessionResponse {
        session: session.into(),
    }))
}

// ============================================================
// Static Info
// ============================================================

async fn demo_prompts() -> Json<DemoPromptsResponse> {
    Json(DemoPromptsResponse {
        prompts: DEMO_PROMPTS,
    })
}

async fn generator_info(State(state): State<AppState>) -> Json<GeneratorResponse> {
    let generator = state.sessions.controller().generator();
    Json(GeneratorResponse {
        strategy: generator.name(),
        model: generator.model_id().map(str::to_string),
        available_models: state
            .llm_registry
            .available_model_defs()
            .into_iter()
            .map(|def| ModelInfo {
                id: def.id,
                provider: def.provider.display_name(),
                description: def.description,
            })
            .collect(),
    })
}

async fn get_version() -> &'static str {
    concat!("study-advisor ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
