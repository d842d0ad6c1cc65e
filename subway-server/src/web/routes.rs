//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{LineId, StationId};
use crate::path::PathError;
use crate::service::{LineService, PathService, ServiceError, StationService};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations).post(create_station))
        .route("/lines", get(list_lines).post(create_line))
        .route("/lines/:id", get(show_line))
        .route("/lines/:id/sections", post(add_section).delete(remove_station))
        .route("/paths", get(find_path))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn create_station(
    State(state): State<AppState>,
    Json(req): Json<CreateStationRequest>,
) -> Result<(StatusCode, Json<StationResponse>), AppError> {
    let station = StationService::new(&state.store)
        .create_station(req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(StationResponse::from(&station))))
}

async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    let stations = StationService::new(&state.store).stations().await;
    Json(stations.iter().map(StationResponse::from).collect())
}

async fn create_line(
    State(state): State<AppState>,
    Json(req): Json<CreateLineRequest>,
) -> Result<(StatusCode, Json<LineResponse>), AppError> {
    let detail = LineService::new(&state.store, &state.section_edits)
        .create_line(req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(LineResponse::from(&detail))))
}

async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineResponse>>, AppError> {
    let details = LineService::new(&state.store, &state.section_edits)
        .lines()
        .await?;
    Ok(Json(details.iter().map(LineResponse::from).collect()))
}

async fn show_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<LineResponse>, AppError> {
    let detail = LineService::new(&state.store, &state.section_edits)
        .line(LineId(id))
        .await?;
    Ok(Json(LineResponse::from(&detail)))
}

async fn add_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<AddSectionRequest>,
) -> Result<Json<LineResponse>, AppError> {
    let detail = LineService::new(&state.store, &state.section_edits)
        .add_section(LineId(id), req.into())
        .await?;
    Ok(Json(LineResponse::from(&detail)))
}

async fn remove_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<RemoveStationQuery>,
) -> Result<StatusCode, AppError> {
    LineService::new(&state.store, &state.section_edits)
        .remove_station(LineId(id), StationId(query.station_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PathResponse>, AppError> {
    let report = PathService::new(&state.store, &state.strategy, &*state.fares)
        .find_path(StationId(query.source), StationId(query.target), query.age)
        .await?;
    Ok(Json(PathResponse::from(&report)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        match e {
            ServiceError::Domain(_)
            | ServiceError::Topology(_)
            | ServiceError::Path(PathError::SameStation(_))
            | ServiceError::Store(StoreError::DuplicateLineName(_)) => {
                AppError::BadRequest { message }
            }
            ServiceError::Path(_)
            | ServiceError::Store(StoreError::UnknownStation(_) | StoreError::UnknownLine(_)) => {
                AppError::NotFound { message }
            }
            ServiceError::Store(_) | ServiceError::Fare(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
