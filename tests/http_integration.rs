// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP transport using wiremock.

use std::time::Duration;

use tmcc_wled::ProtocolError;
use tmcc_wled::protocol::HttpConfig;
use tmcc_wled::state::{LightingState, Segment};
use tmcc_wled::types::{Brightness, RgbColor};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn device_config(server: &MockServer) -> HttpConfig {
    HttpConfig::new(server.address().ip().to_string()).with_port(server.address().port())
}

#[tokio::test]
async fn post_state_sends_json_to_state_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/json/state"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "on": true,
            "bri": 128,
            "seg": [{"id": 0, "col": [[255, 128, 0]]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = device_config(&mock_server).into_client().unwrap();
    let state = LightingState::new()
        .with_power(true)
        .with_brightness(Brightness::new(128))
        .with_segment(Segment::new(0).with_color(RgbColor::new(255, 128, 0)));

    assert!(client.post_state(&state).await);
}

#[tokio::test]
async fn non_success_status_returns_false() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/json/state"))
        .respond_with(ResponseTemplate::new(500).set_body_string("busy"))
        .mount(&mock_server)
        .await;

    let client = device_config(&mock_server).into_client().unwrap();
    assert!(!client.post_state(&LightingState::power(true)).await);

    // Exactly one attempt: there is no retry.
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn try_post_state_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = device_config(&mock_server).into_client().unwrap();
    let err = client
        .try_post_state(&LightingState::power(false))
        .await
        .unwrap_err();

    match err {
        ProtocolError::Status { status, reason } => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_device_returns_false() {
    let client = HttpConfig::new("127.0.0.1")
        .with_port(1)
        .with_timeout(Duration::from_millis(500))
        .into_client()
        .unwrap();

    assert!(!client.post_state(&LightingState::power(true)).await);
    assert!(matches!(
        client.try_post_state(&LightingState::power(true)).await,
        Err(ProtocolError::Http(_))
    ));
}

#[tokio::test]
async fn slow_device_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(800)))
        .mount(&mock_server)
        .await;

    let client = device_config(&mock_server)
        .with_timeout(Duration::from_millis(100))
        .into_client()
        .unwrap();

    assert!(!client.post_state(&LightingState::power(true)).await);
}

#[tokio::test]
async fn calls_are_independent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = device_config(&mock_server).into_client().unwrap();
    let clone = client.clone();

    let on = LightingState::power(true);
    let dim = LightingState::brightness(Brightness::MIN);
    let (a, b) = tokio::join!(client.post_state(&on), clone.post_state(&dim));
    assert!(a && b);
    assert!(client.post_state(&LightingState::power(false)).await);
}
