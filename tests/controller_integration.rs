// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for frame dispatch against a mock device.

use std::time::Duration;

use serde_json::{Value, json};
use tmcc_wled::controller::{Action, ActionController, ActionMapping, ControllerConfig};
use tmcc_wled::daylight::DaylightConfig;
use tmcc_wled::protocol::HttpConfig;
use tmcc_wled::types::PresetId;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// ACC 50, key 1.
const ACC_50_KEY_1: [u8; 3] = [0xFE, 0xD9, 0x01];

async fn device() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/json/state"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    mock_server
}

fn config(server: &MockServer) -> ControllerConfig {
    ControllerConfig::new(
        HttpConfig::new(server.address().ip().to_string()).with_port(server.address().port()),
    )
}

fn fast_daylight() -> DaylightConfig {
    DaylightConfig::new().with_update_interval(Duration::from_millis(20))
}

async fn posted(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.body_json::<Value>().unwrap())
        .collect()
}

// ============================================================================
// Frame dispatch
// ============================================================================

#[tokio::test]
async fn mapped_frame_applies_action() {
    let mock_server = device().await;
    let mapping = ActionMapping::builder().bind(50, 1, "on").build().unwrap();
    let mut controller = ActionController::new(config(&mock_server).with_mapping(mapping)).unwrap();

    assert!(controller.handle_frame(&ACC_50_KEY_1, None).await);
    assert_eq!(posted(&mock_server).await, vec![json!({"on": true})]);
}

#[tokio::test]
async fn unmapped_frame_is_ignored() {
    let mock_server = device().await;
    let mapping = ActionMapping::builder().bind(50, 2, "on").build().unwrap();
    let mut controller = ActionController::new(config(&mock_server).with_mapping(mapping)).unwrap();

    assert!(!controller.handle_frame(&ACC_50_KEY_1, None).await);
    assert!(posted(&mock_server).await.is_empty());
}

#[tokio::test]
async fn rejected_frames_are_ignored() {
    let mock_server = device().await;
    let mapping = ActionMapping::builder().bind(50, 1, "on").build().unwrap();
    let mut controller = ActionController::new(config(&mock_server).with_mapping(mapping)).unwrap();

    // Wrong sentinel, wrong length, then frame type code 0b01.
    assert!(!controller.handle_frame(&[0xFF, 0xD9, 0x01], None).await);
    assert!(!controller.handle_frame(&[0xFE, 0xD9], None).await);
    assert!(!controller.handle_frame(&[0xFE, 0x59, 0x01], None).await);
    // A caller-supplied code is validated too.
    assert!(!controller.handle_frame(&ACC_50_KEY_1, Some(0b00)).await);

    assert!(posted(&mock_server).await.is_empty());
}

#[tokio::test]
async fn switch_frames_share_the_mapping() {
    let mock_server = device().await;
    let mapping = ActionMapping::builder().bind(50, 1, "on").build().unwrap();
    let mut controller = ActionController::new(config(&mock_server).with_mapping(mapping)).unwrap();

    // Same address and data as ACC_50_KEY_1, type code 0b10.
    assert!(controller.handle_frame(&[0xFE, 0x99, 0x01], None).await);
    assert!(controller.handle_frame(&ACC_50_KEY_1, Some(0b10)).await);

    assert_eq!(posted(&mock_server).await.len(), 2);
}

#[tokio::test]
async fn device_failure_still_counts_as_handled() {
    let mapping = ActionMapping::builder().bind(50, 1, "off").build().unwrap();
    let device = HttpConfig::new("127.0.0.1")
        .with_port(1)
        .with_timeout(Duration::from_millis(200));
    let mut controller =
        ActionController::new(ControllerConfig::new(device).with_mapping(mapping)).unwrap();

    assert!(controller.handle_frame(&ACC_50_KEY_1, None).await);
}

// ============================================================================
// Actions
// ============================================================================

#[tokio::test]
async fn off_stops_daylight_before_posting() {
    let mock_server = device().await;
    let mapping = ActionMapping::builder().bind(50, 1, "off").build().unwrap();
    let mut controller = ActionController::connect(
        config(&mock_server)
            .with_mapping(mapping)
            .with_daylight(fast_daylight()),
    )
    .await
    .unwrap();
    assert!(controller.daylight().unwrap().is_running());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(controller.handle_frame(&ACC_50_KEY_1, None).await);
    assert!(!controller.daylight().unwrap().is_running());

    tokio::time::sleep(Duration::from_millis(100)).await;
    let bodies = posted(&mock_server).await;
    assert!(bodies.len() > 2, "expected daylight ticks before off");
    assert_eq!(bodies.last(), Some(&json!({"on": false})));
}

#[tokio::test]
async fn full_white_stops_daylight() {
    let mock_server = device().await;
    let mut controller =
        ActionController::connect(config(&mock_server).with_daylight(fast_daylight()))
            .await
            .unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;
    controller.apply_action(&Action::FullWhite).await;
    assert!(!controller.daylight().unwrap().is_running());

    tokio::time::sleep(Duration::from_millis(60)).await;
    let bodies = posted(&mock_server).await;
    assert_eq!(
        bodies.last(),
        Some(&json!({"on": true, "bri": 255, "seg": [{"id": 0, "col": [[255, 255, 255]]}]}))
    );
}

#[tokio::test]
async fn on_does_not_stop_daylight() {
    let mock_server = device().await;
    let mut controller =
        ActionController::connect(config(&mock_server).with_daylight(fast_daylight()))
            .await
            .unwrap();

    controller.apply_action(&Action::On).await;
    assert!(controller.daylight().unwrap().is_running());

    controller.shutdown().await;
}

#[tokio::test]
async fn cycle_preset_advances_then_wraps() {
    let mock_server = device().await;
    let mut controller = ActionController::new(
        config(&mock_server).with_presets([1, 2, 3].map(PresetId::new)),
    )
    .unwrap();

    for _ in 0..3 {
        controller.apply_action(&Action::CyclePreset).await;
    }

    assert_eq!(controller.preset_cursor(), 0);
    assert_eq!(
        posted(&mock_server).await,
        vec![json!({"ps": 2}), json!({"ps": 3}), json!({"ps": 1})]
    );
}

#[tokio::test]
async fn cycle_preset_without_presets_posts_nothing() {
    let mock_server = device().await;
    let mut controller = ActionController::new(config(&mock_server)).unwrap();

    controller.apply_action(&Action::CyclePreset).await;

    assert_eq!(controller.preset_cursor(), 0);
    assert!(posted(&mock_server).await.is_empty());
}

#[tokio::test]
async fn set_color() {
    let mock_server = device().await;
    let mut controller = ActionController::new(config(&mock_server)).unwrap();

    controller.apply_action(&Action::parse("color:zzzzzz")).await;
    controller.apply_action(&Action::parse("color:#ff8000")).await;

    assert_eq!(
        posted(&mock_server).await,
        vec![json!({"seg": [{"id": 0, "col": [[255, 128, 0]]}]})]
    );
}

#[tokio::test]
async fn set_brightness_clamps_and_rejects_garbage() {
    let mock_server = device().await;
    let mut controller = ActionController::new(config(&mock_server)).unwrap();

    controller.apply_action(&Action::parse("brightness:999")).await;
    controller.apply_action(&Action::parse("brightness:-4")).await;
    controller.apply_action(&Action::parse("brightness:abc")).await;
    controller
        .apply_action(&Action::parse("brightness:99999999999999999999"))
        .await;

    assert_eq!(
        posted(&mock_server).await,
        vec![json!({"bri": 255}), json!({"bri": 0}), json!({"bri": 255})]
    );
}

#[tokio::test]
async fn set_preset() {
    let mock_server = device().await;
    let mut controller = ActionController::new(config(&mock_server)).unwrap();

    controller.apply_action(&Action::parse("preset:7")).await;
    controller.apply_action(&Action::parse("preset:x")).await;

    assert_eq!(posted(&mock_server).await, vec![json!({"ps": 7})]);
}

#[tokio::test]
async fn unrecognized_and_unconfigured_actions_post_nothing() {
    let mock_server = device().await;
    let mut controller = ActionController::new(config(&mock_server)).unwrap();

    controller.apply_action(&Action::parse("sparkle")).await;
    controller.apply_action(&Action::DaylightStart).await;
    controller.apply_action(&Action::DaylightStop).await;

    assert!(posted(&mock_server).await.is_empty());
}

#[tokio::test]
async fn daylight_actions_drive_the_simulator() {
    let mock_server = device().await;
    let mut controller =
        ActionController::new(config(&mock_server).with_daylight(fast_daylight())).unwrap();

    controller.apply_action(&Action::DaylightStart).await;
    assert!(controller.daylight().unwrap().is_running());

    controller.apply_action(&Action::DaylightStop).await;
    assert!(!controller.daylight().unwrap().is_running());

    let bodies = posted(&mock_server).await;
    assert!(bodies[0].get("mainseg").is_some());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn connect_honors_autostart() {
    let mock_server = device().await;

    let controller = ActionController::connect(config(&mock_server).with_daylight(fast_daylight()))
        .await
        .unwrap();
    assert!(controller.daylight().unwrap().is_running());
    controller.shutdown().await;

    let controller = ActionController::connect(
        config(&mock_server)
            .with_daylight(fast_daylight())
            .with_autostart_daylight(false),
    )
    .await
    .unwrap();
    assert!(!controller.daylight().unwrap().is_running());
}

#[tokio::test]
async fn shutdown_stops_the_loop() {
    let mock_server = device().await;
    let controller = ActionController::connect(config(&mock_server).with_daylight(fast_daylight()))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;
    controller.shutdown().await;

    let settled = posted(&mock_server).await.len();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(posted(&mock_server).await.len(), settled);
}

#[tokio::test]
async fn connect_from_json_config() {
    let mock_server = device().await;
    let json = format!(
        r#"{{
            "device": {{ "host": "{}", "port": {}, "timeout_ms": 500 }},
            "mapping": [
                {{ "address": 50, "data": 1, "action": "preset:4" }}
            ]
        }}"#,
        mock_server.address().ip(),
        mock_server.address().port()
    );

    let mut controller = ActionController::connect(ControllerConfig::from_json(&json).unwrap())
        .await
        .unwrap();

    assert!(controller.handle_frame(&ACC_50_KEY_1, None).await);
    assert_eq!(posted(&mock_server).await, vec![json!({"ps": 4})]);
}
