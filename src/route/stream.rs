use std::time::Duration;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_valid::Valid;
use rand::Rng;
use serde::Deserialize;

use crate::error::AppError;
use crate::model::{StreamConnect, StreamConnected, StreamPlaceholder};
use crate::result::Result;
use crate::AppState;

// No media ever flows through these handlers. They acknowledge the
// connection parameters after an artificial delay, standing in for a
// real ingest path.

const CONNECT_DELAY: Duration = Duration::from_millis(500);
const FRAME_DELAY: Duration = Duration::from_millis(100);

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/api/stream", get(placeholder))
        .route("/api/stream/connect", post(connect))
}

async fn connect(
    State(_state): State<AppState>,
    Valid(Json(req)): Valid<Json<StreamConnect>>,
) -> Result<Json<StreamConnected>> {
    tokio::time::sleep(CONNECT_DELAY).await;
    let resolution = req.quality.unwrap_or_default().resolution();
    Ok(Json(StreamConnected {
        connected: true,
        stream_id: rand::thread_rng().gen_range(0..10_000),
        resolution,
    }))
}

#[derive(Debug, Default, Clone, Deserialize)]
struct StreamQuery {
    url: Option<String>,
}

async fn placeholder(
    State(_state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Result<Json<StreamPlaceholder>> {
    if query.url.as_deref().unwrap_or_default().is_empty() {
        return Err(AppError::bad_request("RTSP URL is required"));
    }
    tokio::time::sleep(FRAME_DELAY).await;
    Ok(Json(StreamPlaceholder {
        stream: true,
        message: "Stream data would be sent here in a real implementation".to_string(),
    }))
}
