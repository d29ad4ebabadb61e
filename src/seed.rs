use chrono::{Duration, Utc};
use serde_json::json;
use tracing::info;

use crate::model::{AlertKind, CreateCamera, CreateRecording, StreamQuality, TriggerType, UpdateRecording};
use crate::store::MemStorage;

/// Demo fixtures: four cameras in mixed states, a few alerts of each
/// kind and a handful of closed recordings. Only wired up when
/// `[demo] seed = true`.
pub fn populate(store: &MemStorage) {
    let cameras = [
        ("Front Office", "rtsp://192.168.1.100:554/stream1", StreamQuality::High, true),
        ("Hallway", "rtsp://192.168.1.101:554/stream1", StreamQuality::Low, true),
        ("Parking Area", "rtsp://192.168.1.102:554/stream1", StreamQuality::Medium, false),
        ("Back Entrance", "rtsp://192.168.1.103:554/stream1", StreamQuality::Medium, false),
    ];
    let ids: Vec<u64> = cameras
        .iter()
        .map(|(name, url, quality, auto_record)| {
            store
                .create_camera(CreateCamera {
                    name: name.to_string(),
                    rtsp_url: url.to_string(),
                    username: Some("admin".to_string()),
                    password: Some("admin".to_string()),
                    stream_quality: *quality,
                    auto_connect: true,
                    auto_record: *auto_record,
                })
                .id
        })
        .collect();

    // Three online (two recording), one that was never reached.
    let _ = store.set_camera_status(ids[0], true, true);
    let _ = store.set_camera_status(ids[1], true, true);
    let _ = store.set_camera_status(ids[2], true, false);
    let _ = store.set_camera_status(ids[3], false, false);

    let _ = store.set_motion_detection(ids[0], true, Some(60));
    let _ = store.set_motion_detection(ids[1], true, Some(40));

    let now = Utc::now();
    store.new_alert(
        ids[0],
        AlertKind::Motion,
        "Motion detected on Front Office camera".to_string(),
        Some(json!({ "confidenceScore": 0.85 })),
        Some(now - Duration::hours(1)),
    );
    store.new_alert(
        ids[1],
        AlertKind::Motion,
        "Motion detected on Hallway camera".to_string(),
        Some(json!({ "confidenceScore": 0.92 })),
        Some(now - Duration::hours(2)),
    );
    store.new_alert(
        ids[3],
        AlertKind::Offline,
        "Camera Back Entrance went offline".to_string(),
        None,
        Some(now - Duration::hours(4)),
    );
    store.new_alert(
        ids[2],
        AlertKind::Storage,
        "Storage for Parking Area recordings is running low (85% used)".to_string(),
        Some(json!({ "usedSpace": "85%" })),
        Some(now - Duration::hours(2)),
    );
    store.new_alert(
        ids[2],
        AlertKind::System,
        "Motion detection enabled for Parking Area".to_string(),
        Some(json!({ "sensitivity": 70 })),
        Some(now - Duration::hours(2)),
    );

    let recordings = [
        (ids[0], "Front_Office_20240401_080000.mp4", 1, TriggerType::Motion),
        (ids[1], "Hallway_20240401_090000.mp4", 1, TriggerType::Manual),
        (ids[0], "Front_Office_20240331_150000.mp4", 2, TriggerType::Schedule),
    ];
    for (camera_id, filename, days_ago, trigger) in recordings {
        let start_time = now - Duration::days(days_ago);
        let recording = store.create_recording(
            CreateRecording {
                camera_id,
                filename: filename.to_string(),
                start_time,
                filepath: None,
                trigger_type: trigger,
            },
            format!("/recordings/camera_{camera_id}/{filename}"),
        );
        // Close each sample at 15 minutes.
        let _ = store.update_recording(
            recording.id,
            UpdateRecording {
                end_time: Some(start_time + Duration::minutes(15)),
                filesize: Some(15 * 1024 * 1024),
                has_motion: Some(trigger == TriggerType::Motion),
                ..Default::default()
            },
        );
    }

    info!("demo data seeded: {} cameras", ids.len());
}
