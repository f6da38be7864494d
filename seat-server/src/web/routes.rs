//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::config::parse_date;
use crate::matrix::{Journey, MatrixError};

use super::dto::*;
use super::state::AppState;

/// Body of `GET /`.
pub const BANNER: &str = "Train Seat Availability API. Use /check to get availability.";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/check", get(check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> &'static str {
    BANNER
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Build the matrix for the requested (or default) journey.
async fn check(
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> Result<Json<CheckResponse>, AppError> {
    let journey = resolve_journey(&state.default_journey, params)?;
    let matrix = state.checker.check(&journey).await?;
    Ok(Json(CheckResponse::success(matrix)))
}

/// Apply request overrides to the default journey.
fn resolve_journey(default: &Journey, params: CheckParams) -> Result<Journey, AppError> {
    let train_model = match params.train.as_deref().map(str::trim) {
        Some(train) if !train.is_empty() => train.to_string(),
        _ => default.train_model.clone(),
    };

    let date = match params.date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => {
            parse_date("date", date).map_err(|e| AppError::BadRequest {
                message: format!("Invalid date {date:?}, expected YYYY-MM-DD ({})", e.reason),
            })?
        }
        _ => default.date,
    };

    Ok(Journey::new(train_model, date))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<MatrixError> for AppError {
    fn from(e: MatrixError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "Bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "Check failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
