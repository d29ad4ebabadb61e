use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::model::{
    Alert, AlertKind, Camera, CreateAlert, CreateCamera, CreateRecording, Recording,
    UpdateAlert, UpdateCamera, UpdateRecording,
};

/// Process-wide in-memory store. Cheap to clone, all clones share the
/// same maps. The reference deployment is a single process; every map is
/// behind its own `RwLock` so concurrent requests stay consistent.
#[derive(Clone, Default)]
pub struct MemStorage {
    cameras: Arc<RwLock<HashMap<u64, Camera>>>,
    recordings: Arc<RwLock<HashMap<u64, Recording>>>,
    alerts: Arc<RwLock<HashMap<u64, Alert>>>,
    camera_seq: Arc<AtomicU64>,
    recording_seq: Arc<AtomicU64>,
    alert_seq: Arc<AtomicU64>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(seq: &AtomicU64) -> u64 {
        seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn all_cameras(&self) -> Vec<Camera> {
        let mut cameras: Vec<Camera> = self.cameras.read().unwrap().values().cloned().collect();
        cameras.sort_by_key(|c| c.id);
        cameras
    }

    pub fn get_camera(&self, id: u64) -> Option<Camera> {
        self.cameras.read().unwrap().get(&id).cloned()
    }

    pub fn create_camera(&self, req: CreateCamera) -> Camera {
        let id = Self::next_id(&self.camera_seq);
        let camera = Camera {
            id,
            name: req.name,
            rtsp_url: req.rtsp_url,
            username: req.username,
            password: req.password,
            stream_quality: req.stream_quality,
            auto_connect: req.auto_connect,
            auto_record: req.auto_record,
            is_online: false,
            is_recording: false,
            motion_detection: false,
            motion_sensitivity: 50,
            last_connected: Some(Utc::now()),
        };
        self.cameras.write().unwrap().insert(id, camera.clone());
        info!("camera {} ({}) created", id, camera.name);
        camera
    }

    pub fn update_camera(&self, id: u64, patch: UpdateCamera) -> Option<Camera> {
        let mut cameras = self.cameras.write().unwrap();
        let camera = cameras.get_mut(&id)?;
        if let Some(name) = patch.name {
            camera.name = name;
        }
        if let Some(rtsp_url) = patch.rtsp_url {
            camera.rtsp_url = rtsp_url;
        }
        if let Some(username) = patch.username {
            camera.username = Some(username);
        }
        if let Some(password) = patch.password {
            camera.password = Some(password);
        }
        if let Some(quality) = patch.stream_quality {
            camera.stream_quality = quality;
        }
        if let Some(auto_connect) = patch.auto_connect {
            camera.auto_connect = auto_connect;
        }
        if let Some(auto_record) = patch.auto_record {
            camera.auto_record = auto_record;
        }
        if let Some(sensitivity) = patch.motion_sensitivity {
            camera.motion_sensitivity = sensitivity;
        }
        Some(camera.clone())
    }

    pub fn delete_camera(&self, id: u64) -> bool {
        // No cascade: recordings and alerts for the camera are kept.
        self.cameras.write().unwrap().remove(&id).is_some()
    }

    /// Camera status transition. Going online stamps `last_connected`;
    /// flipping online -> offline emits exactly one offline alert naming
    /// the camera. `is_recording` implies `is_online`: an offline update
    /// has its recording flag clamped to false.
    pub fn set_camera_status(
        &self,
        id: u64,
        is_online: bool,
        is_recording: bool,
    ) -> Option<Camera> {
        let snapshot = {
            let mut cameras = self.cameras.write().unwrap();
            let camera = cameras.get_mut(&id)?;
            let mut is_recording = is_recording;
            if is_recording && !is_online {
                warn!("camera {}: recording requires online, flag clamped", id);
                is_recording = false;
            }
            let was_online = camera.is_online;
            camera.is_online = is_online;
            camera.is_recording = is_recording;
            if is_online {
                camera.last_connected = Some(Utc::now());
            }
            (was_online, camera.clone())
        };
        let (was_online, camera) = snapshot;
        if was_online && !camera.is_online {
            self.new_alert(
                id,
                AlertKind::Offline,
                format!("Camera {} went offline", camera.name),
                None,
                None,
            );
        }
        Some(camera)
    }

    pub fn set_motion_detection(
        &self,
        id: u64,
        enabled: bool,
        sensitivity: Option<u8>,
    ) -> Option<Camera> {
        let mut cameras = self.cameras.write().unwrap();
        let camera = cameras.get_mut(&id)?;
        camera.motion_detection = enabled;
        if let Some(sensitivity) = sensitivity {
            camera.motion_sensitivity = sensitivity;
        }
        Some(camera.clone())
    }

    pub fn recordings(&self, camera_id: Option<u64>) -> Vec<Recording> {
        let mut recordings: Vec<Recording> = self
            .recordings
            .read()
            .unwrap()
            .values()
            .filter(|r| camera_id.is_none_or(|id| r.camera_id == id))
            .cloned()
            .collect();
        recordings.sort_by_key(|r| r.id);
        recordings
    }

    pub fn get_recording(&self, id: u64) -> Option<Recording> {
        self.recordings.read().unwrap().get(&id).cloned()
    }

    pub fn create_recording(&self, req: CreateRecording, filepath: String) -> Recording {
        let id = Self::next_id(&self.recording_seq);
        let recording = Recording {
            id,
            camera_id: req.camera_id,
            filename: req.filename,
            filepath,
            start_time: req.start_time,
            end_time: None,
            filesize: 0,
            trigger_type: req.trigger_type,
            has_motion: false,
        };
        self.recordings
            .write()
            .unwrap()
            .insert(id, recording.clone());
        recording
    }

    pub fn update_recording(&self, id: u64, patch: UpdateRecording) -> Option<Recording> {
        let mut recordings = self.recordings.write().unwrap();
        let recording = recordings.get_mut(&id)?;
        if let Some(filename) = patch.filename {
            recording.filename = filename;
        }
        if let Some(start_time) = patch.start_time {
            recording.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            recording.end_time = Some(end_time);
        }
        if let Some(filesize) = patch.filesize {
            recording.filesize = filesize;
        }
        if let Some(trigger_type) = patch.trigger_type {
            recording.trigger_type = trigger_type;
        }
        if let Some(has_motion) = patch.has_motion {
            recording.has_motion = has_motion;
        }
        Some(recording.clone())
    }

    pub fn delete_recording(&self, id: u64) -> bool {
        self.recordings.write().unwrap().remove(&id).is_some()
    }

    /// Alerts matching the filters, newest first.
    pub fn alerts(&self, camera_id: Option<u64>, read: Option<bool>) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self
            .alerts
            .read()
            .unwrap()
            .values()
            .filter(|a| camera_id.is_none_or(|id| a.camera_id == id))
            .filter(|a| read.is_none_or(|r| a.read == r))
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        alerts
    }

    pub fn get_alert(&self, id: u64) -> Option<Alert> {
        self.alerts.read().unwrap().get(&id).cloned()
    }

    pub fn create_alert(&self, req: CreateAlert) -> Alert {
        self.new_alert(
            req.camera_id,
            req.kind,
            req.message,
            req.metadata,
            Some(req.timestamp),
        )
    }

    pub fn new_alert(
        &self,
        camera_id: u64,
        kind: AlertKind,
        message: String,
        metadata: Option<Value>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Alert {
        let id = Self::next_id(&self.alert_seq);
        let alert = Alert {
            id,
            camera_id,
            kind,
            message,
            timestamp: timestamp.unwrap_or_else(Utc::now),
            read: false,
            metadata,
        };
        self.alerts.write().unwrap().insert(id, alert.clone());
        alert
    }

    pub fn update_alert(&self, id: u64, patch: UpdateAlert) -> Option<Alert> {
        let mut alerts = self.alerts.write().unwrap();
        let alert = alerts.get_mut(&id)?;
        if let Some(message) = patch.message {
            alert.message = message;
        }
        if let Some(read) = patch.read {
            alert.read = read;
        }
        if let Some(metadata) = patch.metadata {
            alert.metadata = Some(metadata);
        }
        Some(alert.clone())
    }

    pub fn delete_alert(&self, id: u64) -> bool {
        self.alerts.write().unwrap().remove(&id).is_some()
    }

    pub fn mark_alert_read(&self, id: u64) -> Option<Alert> {
        let mut alerts = self.alerts.write().unwrap();
        let alert = alerts.get_mut(&id)?;
        alert.read = true;
        Some(alert.clone())
    }

    /// Flip every unread alert (optionally scoped to one camera), return
    /// how many were flipped.
    pub fn mark_all_alerts_read(&self, camera_id: Option<u64>) -> usize {
        let mut alerts = self.alerts.write().unwrap();
        let mut count = 0;
        for alert in alerts.values_mut() {
            if camera_id.is_none_or(|id| alert.camera_id == id) && !alert.read {
                alert.read = true;
                count += 1;
            }
        }
        count
    }
}
