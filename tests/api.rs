use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

mod common;
use common::{spawn_default_server, spawn_server};

async fn create_camera(client: &Client, addr: SocketAddr, name: &str) -> Value {
    let res = client
        .post(format!("http://{addr}/api/cameras"))
        .json(&json!({
            "name": name,
            "rtspUrl": "rtsp://192.168.1.100:554/stream1",
            "username": "admin",
            "password": "admin",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn set_status(client: &Client, addr: SocketAddr, id: u64, online: bool, recording: bool) -> Value {
    let res = client
        .put(format!("http://{addr}/api/cameras/{id}/status"))
        .json(&json!({ "isOnline": online, "isRecording": recording }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn camera_create_defaults_and_crud() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let camera = create_camera(&client, addr, "Front Office").await;
    assert_eq!(camera["isOnline"], json!(false));
    assert_eq!(camera["isRecording"], json!(false));
    assert_eq!(camera["streamQuality"], json!("medium"));
    assert_eq!(camera["motionSensitivity"], json!(50));
    let id = camera["id"].as_u64().unwrap();

    let updated: Value = client
        .put(format!("http://{addr}/api/cameras/{id}"))
        .json(&json!({ "name": "Lobby", "streamQuality": "high" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["name"], json!("Lobby"));
    assert_eq!(updated["streamQuality"], json!("high"));

    let listed: Vec<Value> = client
        .get(format!("http://{addr}/api/cameras"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let res = client
        .delete(format!("http://{addr}/api/cameras/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("http://{addr}/api/cameras/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn camera_create_rejects_empty_name() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let res = client
        .post(format!("http://{addr}/api/cameras"))
        .json(&json!({ "name": "", "rtspUrl": "rtsp://10.0.0.1/stream" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn offline_transition_creates_one_alert() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let camera = create_camera(&client, addr, "Hallway").await;
    let id = camera["id"].as_u64().unwrap();

    set_status(&client, addr, id, true, false).await;
    let camera = set_status(&client, addr, id, false, false).await;
    assert_eq!(camera["isOnline"], json!(false));

    let alerts: Vec<Value> = client
        .get(format!("http://{addr}/api/alerts?cameraId={id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["type"], json!("offline"));
    assert!(alerts[0]["message"]
        .as_str()
        .unwrap()
        .contains("Hallway"));

    // Offline -> offline is not a transition.
    set_status(&client, addr, id, false, false).await;
    let alerts: Vec<Value> = client
        .get(format!("http://{addr}/api/alerts?cameraId={id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(alerts.len(), 1);
}

#[tokio::test]
async fn recording_flag_requires_online() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let camera = create_camera(&client, addr, "Parking Area").await;
    let id = camera["id"].as_u64().unwrap();

    let camera = set_status(&client, addr, id, false, true).await;
    assert_eq!(camera["isRecording"], json!(false));
}

#[tokio::test]
async fn recording_lifecycle_roundtrip() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let camera = create_camera(&client, addr, "Back Entrance").await;
    let id = camera["id"].as_u64().unwrap();

    let res = client
        .post(format!("http://{addr}/api/recordings/start"))
        .json(&json!({ "cameraId": id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let recording: Value = res.json().await.unwrap();
    assert_eq!(recording["endTime"], Value::Null);
    assert_eq!(recording["filesize"], json!(0));
    assert_eq!(recording["triggerType"], json!("manual"));
    let recording_id = recording["id"].as_u64().unwrap();

    // Second start for the same camera returns the active record.
    let again: Value = client
        .post(format!("http://{addr}/api/recordings/start"))
        .json(&json!({ "cameraId": id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(again["id"].as_u64().unwrap(), recording_id);

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let closed: Value = client
        .post(format!("http://{addr}/api/recordings/stop"))
        .json(&json!({ "cameraId": id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(closed["id"].as_u64().unwrap(), recording_id);
    assert!(closed["endTime"].is_string());
    assert!(closed["filesize"].as_u64().unwrap() > 0);

    // Nothing active anymore.
    let res = client
        .post(format!("http://{addr}/api/recordings/stop"))
        .json(&json!({ "cameraId": id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_toggle_drives_recorder() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let camera = create_camera(&client, addr, "Front Office").await;
    let id = camera["id"].as_u64().unwrap();

    set_status(&client, addr, id, true, true).await;
    let recordings: Vec<Value> = client
        .get(format!("http://{addr}/api/recordings?cameraId={id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(recordings.len(), 1);
    assert_eq!(recordings[0]["endTime"], Value::Null);

    set_status(&client, addr, id, true, false).await;
    let recordings: Vec<Value> = client
        .get(format!("http://{addr}/api/recordings?cameraId={id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(recordings.len(), 1);
    assert!(recordings[0]["endTime"].is_string());
}

#[tokio::test]
async fn mark_all_read_counts_then_zero() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let camera = create_camera(&client, addr, "Hallway").await;
    let id = camera["id"].as_u64().unwrap();

    for n in 0..3 {
        let res = client
            .post(format!("http://{addr}/api/alerts"))
            .json(&json!({
                "cameraId": id,
                "type": "motion",
                "message": format!("Motion detected ({n})"),
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let marked: Value = client
        .put(format!("http://{addr}/api/alerts/mark-all-read"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(marked["count"], json!(3));

    let marked: Value = client
        .put(format!("http://{addr}/api/alerts/mark-all-read"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(marked["count"], json!(0));

    let unread: Vec<Value> = client
        .get(format!("http://{addr}/api/alerts?read=false"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(unread.is_empty());
}

#[tokio::test]
async fn motion_alert_names_camera_from_store() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let camera = create_camera(&client, addr, "Parking Area").await;
    let id = camera["id"].as_u64().unwrap();

    let res = client
        .post(format!("http://{addr}/api/alerts/motion"))
        .json(&json!({ "cameraId": id, "confidenceScore": 0.9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let alert: Value = res.json().await.unwrap();
    assert_eq!(alert["type"], json!("motion"));
    assert!(alert["message"].as_str().unwrap().contains("Parking Area"));
    assert_eq!(alert["metadata"]["confidenceScore"], json!(0.9));

    let res = client
        .post(format!("http://{addr}/api/alerts/motion"))
        .json(&json!({ "cameraId": 999 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn motion_detection_toggle_emits_system_alert() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let camera = create_camera(&client, addr, "Front Office").await;
    let id = camera["id"].as_u64().unwrap();

    let camera: Value = client
        .put(format!("http://{addr}/api/cameras/{id}/motion-detection"))
        .json(&json!({ "enabled": true, "sensitivity": 60 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(camera["motionDetection"], json!(true));
    assert_eq!(camera["motionSensitivity"], json!(60));

    let alerts: Vec<Value> = client
        .get(format!("http://{addr}/api/alerts?cameraId={id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["type"], json!("system"));
    assert_eq!(alerts[0]["metadata"]["sensitivity"], json!(60));
}

#[tokio::test]
async fn stream_connect_is_simulated() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let connected: Value = client
        .post(format!("http://{addr}/api/stream/connect"))
        .json(&json!({ "url": "rtsp://192.168.1.100:554/stream1", "quality": "high" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(connected["connected"], json!(true));
    assert_eq!(connected["resolution"]["width"], json!(1920));
    assert_eq!(connected["resolution"]["height"], json!(1080));

    let res = client
        .get(format!("http://{addr}/api/stream"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let placeholder: Value = client
        .get(format!(
            "http://{addr}/api/stream?url=rtsp://192.168.1.100:554/stream1"
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(placeholder["stream"], json!(true));
}

#[tokio::test]
async fn recording_playback_and_download_are_json() {
    let addr = spawn_default_server().await;
    let client = Client::new();

    let camera = create_camera(&client, addr, "Hallway").await;
    let id = camera["id"].as_u64().unwrap();

    let res = client
        .post(format!("http://{addr}/api/recordings"))
        .json(&json!({
            "cameraId": id,
            "filename": "Hallway_20240401_090000.mp4",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let recording: Value = res.json().await.unwrap();
    let recording_id = recording["id"].as_u64().unwrap();
    assert_eq!(
        recording["filepath"],
        json!(format!("/recordings/camera_{id}/Hallway_20240401_090000.mp4"))
    );

    let playback: Value = client
        .get(format!("http://{addr}/api/recordings/{recording_id}/play"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(playback["recording"]["id"].as_u64().unwrap(), recording_id);

    let download: Value = client
        .get(format!(
            "http://{addr}/api/recordings/{recording_id}/download"
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(download["download"], json!(true));

    let res = client
        .get(format!("http://{addr}/api/recordings/999/play"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bearer_tokens_guard_the_api() {
    let mut cfg = camwatch::config::Config::default();
    cfg.auth.tokens = vec!["secret-token".to_string()];
    let addr = spawn_server(cfg).await;
    let client = Client::new();

    let res = client
        .get(format!("http://{addr}/api/cameras"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("http://{addr}/api/cameras"))
        .bearer_auth("secret-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn demo_seed_populates_store() {
    let mut cfg = camwatch::config::Config::default();
    cfg.demo.seed = true;
    let addr = spawn_server(cfg).await;
    let client = Client::new();

    let cameras: Vec<Value> = client
        .get(format!("http://{addr}/api/cameras"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cameras.len(), 4);
    assert!(cameras.iter().any(|c| c["isRecording"] == json!(true)));

    let alerts: Vec<Value> = client
        .get(format!("http://{addr}/api/alerts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!alerts.is_empty());

    let recordings: Vec<Value> = client
        .get(format!("http://{addr}/api/recordings"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(recordings.len(), 3);
    assert!(recordings.iter().all(|r| r["endTime"].is_string()));
}
