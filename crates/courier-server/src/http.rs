//! HTTP surface: route registration, request parsing, response encoding.
//!
//! Endpoints:
//! - `POST /start` / `POST /stop`: flip the dispatch switch
//! - `GET /sent-messages`: records the loop has processed
//! - `POST /send`: accept a new message request (202 on success)

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use courier_core::app::{IntakeService, RunController, StartOutcome, StopOutcome};
use courier_core::domain::CourierError;
use courier_core::ports::MessageStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
    pub controller: Arc<RunController>,
    pub intake: Arc<IntakeService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/start", post(start_sending))
        .route("/stop", post(stop_sending))
        .route("/sent-messages", get(sent_messages))
        .route("/send", post(send_message))
        .with_state(state)
}

/// Error envelope: every failure body is `{"error": <message>}`.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<CourierError> for ApiError {
    fn from(error: CourierError) -> Self {
        let status = if error.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

async fn start_sending(State(state): State<AppState>) -> Json<serde_json::Value> {
    let status = match state.controller.start() {
        StartOutcome::Started => "Message sending started",
        StartOutcome::AlreadyRunning => "Message sending is already running",
    };
    Json(json!({ "status": status }))
}

async fn stop_sending(State(state): State<AppState>) -> Json<serde_json::Value> {
    let status = match state.controller.stop() {
        StopOutcome::Stopped => "Message sending stopped",
        StopOutcome::NotRunning => "You should start message sending first",
    };
    Json(json!({ "status": status }))
}

async fn sent_messages(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let sent = state.store.list_sent().await?;
    Ok(Json(json!({ "sentMessages": sent })))
}

#[derive(Debug, Deserialize)]
struct SendRequest {
    content: Option<String>,
    to: Option<String>,
}

async fn send_message(
    State(state): State<AppState>,
    body: Result<Json<SendRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body.map_err(|_| ApiError {
        status: StatusCode::BAD_REQUEST,
        message: "Invalid request body".to_string(),
    })?;

    let (Some(content), Some(to)) = (request.content, request.to) else {
        return Err(ApiError {
            status: StatusCode::BAD_REQUEST,
            message: "Missing required fields".to_string(),
        });
    };

    let record = state.intake.submit(content, to).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "message": "Accepted",
            "messageId": record.id,
        })),
    )
        .into_response())
}
