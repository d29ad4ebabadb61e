use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use axum_valid::Valid;
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::model::{Alert, AlertKind, AlertQuery, CreateAlert, MarkAllRead, MotionAlert, UpdateAlert};
use crate::result::Result;
use crate::AppState;

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/api/alerts", get(index).post(create))
        .route("/api/alerts/motion", post(motion))
        .route("/api/alerts/mark-all-read", put(mark_all_read))
        .route("/api/alerts/:id", get(show).put(update).delete(remove))
        .route("/api/alerts/:id/read", put(mark_read))
}

async fn index(
    State(state): State<AppState>,
    Query(query): Query<AlertQuery>,
) -> Result<Json<Vec<Alert>>> {
    Ok(Json(state.storage.alerts(query.camera_id, query.read)))
}

async fn show(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Alert>> {
    state
        .storage
        .get_alert(id)
        .map(Json)
        .ok_or(AppError::AlertNotFound(id))
}

async fn create(
    State(state): State<AppState>,
    Valid(Json(req)): Valid<Json<CreateAlert>>,
) -> Result<(StatusCode, Json<Alert>)> {
    Ok((StatusCode::CREATED, Json(state.storage.create_alert(req))))
}

/// Typed motion alert. The camera name comes from the store rather than
/// the caller.
async fn motion(
    State(state): State<AppState>,
    Json(req): Json<MotionAlert>,
) -> Result<(StatusCode, Json<Alert>)> {
    let camera = state
        .storage
        .get_camera(req.camera_id)
        .ok_or(AppError::CameraNotFound(req.camera_id))?;
    let alert = state.storage.new_alert(
        camera.id,
        AlertKind::Motion,
        format!("Motion detected on {} camera", camera.name),
        Some(json!({ "confidenceScore": req.confidence_score.unwrap_or(0.75) })),
        None,
    );
    Ok((StatusCode::CREATED, Json(alert)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateAlert>,
) -> Result<Json<Alert>> {
    state
        .storage
        .update_alert(id, req)
        .map(Json)
        .ok_or(AppError::AlertNotFound(id))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode> {
    if state.storage.delete_alert(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::AlertNotFound(id))
    }
}

async fn mark_read(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Alert>> {
    state
        .storage
        .mark_alert_read(id)
        .map(Json)
        .ok_or(AppError::AlertNotFound(id))
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkAllQuery {
    camera_id: Option<u64>,
}

async fn mark_all_read(
    State(state): State<AppState>,
    Query(query): Query<MarkAllQuery>,
) -> Result<Json<MarkAllRead>> {
    let count = state.storage.mark_all_alerts_read(query.camera_id);
    Ok(Json(MarkAllRead { count }))
}
