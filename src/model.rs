use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Requested stream quality for a camera.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamQuality {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl StreamQuality {
    pub fn resolution(&self) -> Resolution {
        match self {
            StreamQuality::High => Resolution {
                width: 1920,
                height: 1080,
            },
            StreamQuality::Medium => Resolution {
                width: 1280,
                height: 720,
            },
            StreamQuality::Low => Resolution {
                width: 854,
                height: 480,
            },
        }
    }
}

/// What caused a recording to be created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    #[default]
    Manual,
    Motion,
    Schedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Motion,
    Offline,
    Storage,
    System,
}

/// Configured video source record, not a live connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: u64,
    pub name: String,
    pub rtsp_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub stream_quality: StreamQuality,
    pub auto_connect: bool,
    pub auto_record: bool,
    pub is_online: bool,
    pub is_recording: bool,
    pub motion_detection: bool,
    pub motion_sensitivity: u8,
    pub last_connected: Option<DateTime<Utc>>,
}

/// Metadata record describing a capture session. No media file exists
/// behind `filepath`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: u64,
    pub camera_id: u64,
    pub filename: String,
    pub filepath: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Fabricated size in bytes, 0 while the recording is active.
    pub filesize: u64,
    pub trigger_type: TriggerType,
    pub has_motion: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: u64,
    pub camera_id: u64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCamera {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1))]
    pub rtsp_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub stream_quality: StreamQuality,
    #[serde(default)]
    pub auto_connect: bool,
    #[serde(default)]
    pub auto_record: bool,
}

/// Partial camera patch. Status flags are not patchable here, they go
/// through the status endpoint.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCamera {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub rtsp_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub stream_quality: Option<StreamQuality>,
    pub auto_connect: Option<bool>,
    pub auto_record: Option<bool>,
    #[validate(range(min = 0, max = 100))]
    pub motion_sensitivity: Option<u8>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatus {
    pub is_online: bool,
    pub is_recording: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetMotionDetection {
    pub enabled: bool,
    #[validate(range(min = 0, max = 100))]
    pub sensitivity: Option<u8>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecording {
    pub camera_id: u64,
    #[validate(length(min = 1))]
    pub filename: String,
    #[serde(default = "Utc::now")]
    pub start_time: DateTime<Utc>,
    /// Derived from the configured recording root when absent.
    pub filepath: Option<String>,
    #[serde(default)]
    pub trigger_type: TriggerType,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecording {
    pub filename: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub filesize: Option<u64>,
    pub trigger_type: Option<TriggerType>,
    pub has_motion: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlert {
    pub camera_id: u64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    #[validate(length(min = 1))]
    pub message: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    pub metadata: Option<Value>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlert {
    pub message: Option<String>,
    pub read: Option<bool>,
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionAlert {
    pub camera_id: u64,
    pub confidence_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRecording {
    pub camera_id: u64,
    #[serde(default)]
    pub trigger_type: TriggerType,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRecording {
    pub camera_id: u64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StreamConnect {
    #[validate(length(min = 1))]
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub quality: Option<StreamQuality>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingQuery {
    pub camera_id: Option<u64>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertQuery {
    pub camera_id: Option<u64>,
    pub read: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarkAllRead {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamConnected {
    pub connected: bool,
    pub stream_id: u32,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamPlaceholder {
    pub stream: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playback {
    pub recording: Recording,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    pub download: bool,
    pub recording: Recording,
    pub message: String,
}
