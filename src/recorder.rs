use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::info;

use crate::model::{CreateRecording, Recording, TriggerType, UpdateRecording};
use crate::store::MemStorage;

/// Fabricated recording throughput: 1 MiB per minute, pro-rated.
const BYTES_PER_MINUTE: u64 = 1024 * 1024;

/// Tracks at most one active recording per camera. A second start for the
/// same camera returns the already-active record instead of opening a new
/// one; stop closes the record with a fabricated file size.
#[derive(Clone, Default)]
pub struct RecordingManager {
    active: Arc<RwLock<HashMap<u64, u64>>>,
    root: String,
}

impl RecordingManager {
    pub fn new(root: String) -> Self {
        Self {
            active: Default::default(),
            root,
        }
    }

    pub fn start(
        &self,
        store: &MemStorage,
        camera_id: u64,
        camera_name: &str,
        trigger: TriggerType,
    ) -> Recording {
        let mut active = self.active.write().unwrap();
        if let Some(id) = active.get(&camera_id) {
            if let Some(recording) = store.get_recording(*id) {
                return recording;
            }
            // Record was deleted out from under us, fall through and
            // start fresh.
        }

        let now = Utc::now();
        let filename = format!(
            "{}_{}.mp4",
            camera_name.replace(' ', "_"),
            now.format("%Y%m%d_%H%M%S")
        );
        let filepath = format!(
            "{}/camera_{}/{}",
            self.root.trim_end_matches('/'),
            camera_id,
            filename
        );
        let recording = store.create_recording(
            CreateRecording {
                camera_id,
                filename,
                start_time: now,
                filepath: None,
                trigger_type: trigger,
            },
            filepath,
        );
        active.insert(camera_id, recording.id);
        info!(
            "camera {}: recording {} started ({})",
            camera_id, recording.id, recording.filename
        );
        recording
    }

    pub fn stop(&self, store: &MemStorage, camera_id: u64) -> Option<Recording> {
        let id = self.active.write().unwrap().remove(&camera_id)?;
        let recording = store.get_recording(id)?;

        let end_time = Utc::now();
        let elapsed_ms = (end_time - recording.start_time).num_milliseconds().max(0) as u64;
        let filesize = elapsed_ms * BYTES_PER_MINUTE / 60_000;
        let closed = store.update_recording(
            id,
            UpdateRecording {
                end_time: Some(end_time),
                filesize: Some(filesize),
                ..Default::default()
            },
        )?;
        info!(
            "camera {}: recording {} stopped after {}ms ({} bytes)",
            camera_id, id, elapsed_ms, filesize
        );
        Some(closed)
    }

    pub fn is_active(&self, camera_id: u64) -> bool {
        self.active.read().unwrap().contains_key(&camera_id)
    }

    pub fn active(&self, store: &MemStorage) -> Vec<Recording> {
        let active = self.active.read().unwrap();
        let mut recordings: Vec<Recording> = active
            .values()
            .filter_map(|id| store.get_recording(*id))
            .collect();
        recordings.sort_by_key(|r| r.id);
        recordings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreateCamera, StreamQuality};

    fn setup() -> (MemStorage, RecordingManager, u64) {
        let store = MemStorage::new();
        let cam = store.create_camera(CreateCamera {
            name: "Front Office".to_string(),
            rtsp_url: "rtsp://192.168.1.100:554/stream1".to_string(),
            username: None,
            password: None,
            stream_quality: StreamQuality::Medium,
            auto_connect: false,
            auto_record: false,
        });
        (store, RecordingManager::new("/recordings".to_string()), cam.id)
    }

    #[test]
    fn start_creates_open_record() {
        let (store, recorder, cam) = setup();
        let rec = recorder.start(&store, cam, "Front Office", TriggerType::Manual);
        assert!(rec.end_time.is_none());
        assert_eq!(rec.filesize, 0);
        assert!(rec.filename.starts_with("Front_Office_"));
        assert!(rec.filename.ends_with(".mp4"));
        assert_eq!(rec.filepath, format!("/recordings/camera_{cam}/{}", rec.filename));
        assert!(recorder.is_active(cam));
    }

    #[test]
    fn second_start_returns_same_record() {
        let (store, recorder, cam) = setup();
        let first = recorder.start(&store, cam, "Front Office", TriggerType::Manual);
        let second = recorder.start(&store, cam, "Front Office", TriggerType::Motion);
        assert_eq!(first.id, second.id);
        assert_eq!(store.recordings(Some(cam)).len(), 1);
    }

    #[test]
    fn stop_closes_with_fabricated_size() {
        let (store, recorder, cam) = setup();
        let rec = recorder.start(&store, cam, "Front Office", TriggerType::Manual);
        // Backdate the start so elapsed time is deterministic.
        store
            .update_recording(
                rec.id,
                UpdateRecording {
                    start_time: Some(Utc::now() - chrono::Duration::minutes(5)),
                    ..Default::default()
                },
            )
            .unwrap();

        let closed = recorder.stop(&store, cam).unwrap();
        assert!(closed.end_time.is_some());
        assert!(closed.filesize >= 5 * BYTES_PER_MINUTE);
        assert!(!recorder.is_active(cam));
    }

    #[test]
    fn stop_without_active_recording_is_none() {
        let (store, recorder, cam) = setup();
        assert!(recorder.stop(&store, cam).is_none());
    }

    #[test]
    fn restart_after_stop_opens_new_record() {
        let (store, recorder, cam) = setup();
        let first = recorder.start(&store, cam, "Front Office", TriggerType::Manual);
        recorder.stop(&store, cam).unwrap();
        let second = recorder.start(&store, cam, "Front Office", TriggerType::Manual);
        assert_ne!(first.id, second.id);
        assert_eq!(store.recordings(Some(cam)).len(), 2);
    }
}
