use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use kinescope_core::{VideoError, VideoSettings, WindowState};

// ---- Golden fixtures (JSON contracts) ----
const SETTINGS_JSON: &str = include_str!("../fixtures/video_settings.json");

fn write_temp_fixture(name: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis();
    path.push(format!("kinescope_contract_tests_{name}_{ts}.json"));
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn golden_settings_fixture_deserializes() {
    let path = write_temp_fixture("video_settings", SETTINGS_JSON);

    let settings = VideoSettings::from_json_path(&path).expect("fixture should parse");
    assert_eq!(settings.screen_count, 2);
    assert_eq!(settings.window_state, WindowState::Active);
    assert_eq!(settings.shader_id, 1);
    assert!(settings.shader_support);
    assert_eq!(settings.fs_width, 1920);
    assert_eq!(settings.max_pix_width, 510);

    let _ = fs::remove_file(path);
}

#[test]
fn missing_settings_file_reports_the_path() {
    let mut path = std::env::temp_dir();
    path.push("kinescope_contract_tests_definitely_missing.json");

    let err = VideoSettings::from_json_path(&path).expect_err("missing file must fail");
    match err {
        VideoError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected an io error, got: {other}"),
    }
}

#[test]
fn malformed_settings_are_a_json_error() {
    let path = write_temp_fixture("malformed", "{ not json");

    let err = VideoSettings::from_json_path(&path).expect_err("malformed file must fail");
    assert!(matches!(err, VideoError::Json { .. }), "got: {err}");

    let _ = fs::remove_file(path);
}

#[test]
fn settings_round_trip_through_json() {
    let mut settings = VideoSettings::default();
    settings.screen_count = 4;
    settings.dim_percent = 0.5;
    settings.window_state = WindowState::Active;

    let text = settings.to_json_string().unwrap();
    let back: VideoSettings = serde_json::from_str(&text).unwrap();
    assert_eq!(back, settings);
}
