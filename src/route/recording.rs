use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_valid::Valid;
use http::StatusCode;

use crate::error::AppError;
use crate::model::{
    CreateRecording, Download, Playback, Recording, RecordingQuery, StartRecording,
    StopRecording, UpdateRecording,
};
use crate::result::Result;
use crate::AppState;

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/api/recordings", get(index).post(create))
        .route("/api/recordings/start", post(start))
        .route("/api/recordings/stop", post(stop))
        .route(
            "/api/recordings/:id",
            get(show).put(update).delete(remove),
        )
        .route("/api/recordings/:id/play", get(play))
        .route("/api/recordings/:id/download", get(download))
}

async fn index(
    State(state): State<AppState>,
    Query(query): Query<RecordingQuery>,
) -> Result<Json<Vec<Recording>>> {
    Ok(Json(state.storage.recordings(query.camera_id)))
}

async fn show(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Recording>> {
    state
        .storage
        .get_recording(id)
        .map(Json)
        .ok_or(AppError::RecordingNotFound(id))
}

async fn create(
    State(state): State<AppState>,
    Valid(Json(req)): Valid<Json<CreateRecording>>,
) -> Result<(StatusCode, Json<Recording>)> {
    if state.storage.get_camera(req.camera_id).is_none() {
        return Err(AppError::CameraNotFound(req.camera_id));
    }
    let filepath = req.filepath.clone().unwrap_or_else(|| {
        format!(
            "{}/camera_{}/{}",
            state.config.recording.root.trim_end_matches('/'),
            req.camera_id,
            req.filename
        )
    });
    Ok((
        StatusCode::CREATED,
        Json(state.storage.create_recording(req, filepath)),
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateRecording>,
) -> Result<Json<Recording>> {
    state
        .storage
        .update_recording(id, req)
        .map(Json)
        .ok_or(AppError::RecordingNotFound(id))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode> {
    // Only the record: there is no media file behind the filepath.
    if state.storage.delete_recording(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::RecordingNotFound(id))
    }
}

async fn start(
    State(state): State<AppState>,
    Json(req): Json<StartRecording>,
) -> Result<(StatusCode, Json<Recording>)> {
    let camera = state
        .storage
        .get_camera(req.camera_id)
        .ok_or(AppError::CameraNotFound(req.camera_id))?;
    let recording =
        state
            .recorder
            .start(&state.storage, camera.id, &camera.name, req.trigger_type);
    Ok((StatusCode::CREATED, Json(recording)))
}

async fn stop(
    State(state): State<AppState>,
    Json(req): Json<StopRecording>,
) -> Result<Json<Recording>> {
    state
        .recorder
        .stop(&state.storage, req.camera_id)
        .map(Json)
        .ok_or(AppError::NoActiveRecording(req.camera_id))
}

async fn play(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Playback>> {
    let recording = state
        .storage
        .get_recording(id)
        .ok_or(AppError::RecordingNotFound(id))?;
    Ok(Json(Playback {
        recording,
        message: "Recording playback would be implemented here in production".to_string(),
    }))
}

async fn download(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Download>> {
    let recording = state
        .storage
        .get_recording(id)
        .ok_or(AppError::RecordingNotFound(id))?;
    Ok(Json(Download {
        download: true,
        recording,
        message: "Recording download would be implemented here in production".to_string(),
    }))
}
