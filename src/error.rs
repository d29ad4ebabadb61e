use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    CameraNotFound(u64),
    RecordingNotFound(u64),
    AlertNotFound(u64),
    NoActiveRecording(u64),
    BadRequest(String),
    InternalServerError(anyhow::Error),
}

impl AppError {
    pub fn bad_request<T>(t: T) -> Self
    where
        T: ToString,
    {
        AppError::BadRequest(t.to_string())
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::CameraNotFound(id) => {
                error_body(StatusCode::NOT_FOUND, format!("camera {id} not found"))
            }
            AppError::RecordingNotFound(id) => {
                error_body(StatusCode::NOT_FOUND, format!("recording {id} not found"))
            }
            AppError::AlertNotFound(id) => {
                error_body(StatusCode::NOT_FOUND, format!("alert {id} not found"))
            }
            AppError::NoActiveRecording(id) => error_body(
                StatusCode::NOT_FOUND,
                format!("no active recording for camera {id}"),
            ),
            AppError::BadRequest(err) => error_body(StatusCode::BAD_REQUEST, err),
            AppError::InternalServerError(err) => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::InternalServerError(err.into())
    }
}
