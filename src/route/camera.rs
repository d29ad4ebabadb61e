use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use axum_valid::Valid;
use http::StatusCode;
use serde_json::json;

use crate::error::AppError;
use crate::model::{
    AlertKind, Camera, CreateCamera, SetMotionDetection, SetStatus, TriggerType, UpdateCamera,
};
use crate::result::Result;
use crate::AppState;

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/api/cameras", get(index).post(create))
        .route(
            "/api/cameras/:id",
            get(show).put(update).delete(remove),
        )
        .route("/api/cameras/:id/status", put(status))
        .route("/api/cameras/:id/motion-detection", put(motion_detection))
}

async fn index(State(state): State<AppState>) -> Result<Json<Vec<Camera>>> {
    Ok(Json(state.storage.all_cameras()))
}

async fn show(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Camera>> {
    state
        .storage
        .get_camera(id)
        .map(Json)
        .ok_or(AppError::CameraNotFound(id))
}

async fn create(
    State(state): State<AppState>,
    Valid(Json(req)): Valid<Json<CreateCamera>>,
) -> Result<(StatusCode, Json<Camera>)> {
    Ok((StatusCode::CREATED, Json(state.storage.create_camera(req))))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Valid(Json(req)): Valid<Json<UpdateCamera>>,
) -> Result<Json<Camera>> {
    state
        .storage
        .update_camera(id, req)
        .map(Json)
        .ok_or(AppError::CameraNotFound(id))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode> {
    if state.storage.delete_camera(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::CameraNotFound(id))
    }
}

/// Status transition, plus recording lifecycle side effects: flipping the
/// recording flag on opens a manual recording, flipping it off closes it.
async fn status(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<SetStatus>,
) -> Result<Json<Camera>> {
    let camera = state
        .storage
        .set_camera_status(id, req.is_online, req.is_recording)
        .ok_or(AppError::CameraNotFound(id))?;

    if camera.is_recording && !state.recorder.is_active(id) {
        state
            .recorder
            .start(&state.storage, id, &camera.name, TriggerType::Manual);
    } else if !camera.is_recording && state.recorder.is_active(id) {
        let _ = state.recorder.stop(&state.storage, id);
    }
    Ok(Json(camera))
}

async fn motion_detection(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Valid(Json(req)): Valid<Json<SetMotionDetection>>,
) -> Result<Json<Camera>> {
    let existing = state
        .storage
        .get_camera(id)
        .ok_or(AppError::CameraNotFound(id))?;
    let camera = state
        .storage
        .set_motion_detection(id, req.enabled, req.sensitivity)
        .ok_or(AppError::CameraNotFound(id))?;

    let changed = req
        .sensitivity
        .is_some_and(|s| s != existing.motion_sensitivity);
    if req.enabled && (!existing.motion_detection || changed) {
        state.storage.new_alert(
            id,
            AlertKind::System,
            format!(
                "Motion detection {} for {}",
                if existing.motion_detection {
                    "settings updated"
                } else {
                    "enabled"
                },
                existing.name
            ),
            Some(json!({ "sensitivity": camera.motion_sensitivity })),
            None,
        );
    }
    Ok(Json(camera))
}
