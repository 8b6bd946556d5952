//! Appeal endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use chrono::{DateTime, Utc};

use appeals_common::AppResult;
use appeals_db::entities::appeal::{self, AppealStatus};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::state::AppState;

/// Create appeal router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_started).post(create_appeal))
        .route("/cancel-all-in-progress", post(cancel_all_in_progress))
        .route("/by-dates", get(query_by_dates))
        .route("/{id}/start", patch(start_processing))
        .route("/{id}/complete", patch(complete_appeal))
        .route("/{id}/cancel", patch(cancel_appeal))
}

/// Appeal response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealResponse {
    pub id: i32,
    pub theme: String,
    pub message: String,
    pub status: AppealStatus,
    pub solution: Option<String>,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<appeal::Model> for AppealResponse {
    fn from(appeal: appeal::Model) -> Self {
        Self {
            id: appeal.id,
            theme: appeal.theme,
            message: appeal.message,
            status: appeal.status,
            solution: appeal.solution,
            cancel_reason: appeal.cancel_reason,
            created_at: appeal.created_at,
            updated_at: appeal.updated_at,
        }
    }
}

fn to_responses(appeals: Vec<appeal::Model>) -> Vec<AppealResponse> {
    appeals.into_iter().map(AppealResponse::from).collect()
}

/// List appeals in status `New`.
async fn list_started(State(state): State<AppState>) -> AppResult<Json<Vec<AppealResponse>>> {
    let appeals = state.appeal_service.list_started().await?;
    Ok(Json(to_responses(appeals)))
}

/// Create appeal request.
///
/// Missing fields deserialize to empty strings so that absence and
/// emptiness both surface as a 400 validation error.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppealRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "theme must not be empty"))]
    pub theme: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
}

/// Create a new appeal.
async fn create_appeal(
    State(state): State<AppState>,
    Json(req): Json<CreateAppealRequest>,
) -> AppResult<(StatusCode, Json<AppealResponse>)> {
    req.validate()?;

    info!(theme = %req.theme, "Creating appeal");

    let appeal = state.appeal_service.create(req.theme, req.message).await?;

    Ok((StatusCode::CREATED, Json(AppealResponse::from(appeal))))
}

/// Move an appeal to `InProgress`.
async fn start_processing(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AppealResponse>> {
    info!(appeal_id = id, "Starting appeal processing");

    let appeal = state.appeal_service.start_processing(id).await?;
    Ok(Json(AppealResponse::from(appeal)))
}

/// Complete appeal request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAppealRequest {
    pub solution: String,
}

/// Complete an appeal with a solution.
async fn complete_appeal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<CompleteAppealRequest>,
) -> AppResult<Json<AppealResponse>> {
    info!(appeal_id = id, "Completing appeal");

    let appeal = state.appeal_service.complete_appeal(id, req.solution).await?;
    Ok(Json(AppealResponse::from(appeal)))
}

/// Cancel appeal request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppealRequest {
    pub reason: String,
}

/// Cancel an appeal with a reason.
async fn cancel_appeal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<CancelAppealRequest>,
) -> AppResult<Json<AppealResponse>> {
    info!(appeal_id = id, "Cancelling appeal");

    let appeal = state.appeal_service.cancel_appeal(id, req.reason).await?;
    Ok(Json(AppealResponse::from(appeal)))
}

/// Cancel every appeal currently in `InProgress`.
async fn cancel_all_in_progress(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AppealResponse>>> {
    info!("Cancelling all in-progress appeals");

    let appeals = state.appeal_service.cancel_all_in_progress().await?;
    Ok(Json(to_responses(appeals)))
}

/// Query-by-dates request. Read from the request body even though the route
/// is a GET, mirroring the original interface.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryByDatesRequest {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Query appeals by creation date.
async fn query_by_dates(
    State(state): State<AppState>,
    body: Option<Json<QueryByDatesRequest>>,
) -> AppResult<Json<Vec<AppealResponse>>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let appeals = state
        .appeal_service
        .query_by_date(
            req.date.as_deref(),
            req.start_date.as_deref(),
            req.end_date.as_deref(),
        )
        .await?;

    Ok(Json(to_responses(appeals)))
}
