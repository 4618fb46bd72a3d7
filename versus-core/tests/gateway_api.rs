//! Integration tests for the comparison HTTP endpoints.

use axum::body::Body;
use std::sync::Arc;
use tower::ServiceExt;
use versus_core::gateway::{GatewayState, SharedState, gateway_router};
use versus_core::{Comparison, Corpus, MarkerLexicon, VersusConfig};

const CORPUS: &str = r#"[
    {"text": "Apple is better than orange in taste.", "score": 4.0},
    {"text": "Orange is cheaper than apple.", "score": 2.0},
    {"text": "Apple is not worse than orange.", "score": 2.0},
    {"text": "Is orange better than apple?", "score": 9.0}
]"#;

fn make_state() -> SharedState {
    let corpus = Corpus::from_json_str(CORPUS, &MarkerLexicon::default()).unwrap();
    Arc::new(GatewayState {
        engine: Comparison::from_config(&VersusConfig::default()).unwrap(),
        provider: Arc::new(corpus),
    })
}

fn make_request(uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn get_json(uri: &str) -> (axum::http::StatusCode, Option<String>, serde_json::Value) {
    let app = gateway_router(make_state());
    let resp = ServiceExt::<axum::http::Request<Body>>::oneshot(app, make_request(uri))
        .await
        .unwrap();
    let status = resp.status();
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(resp.into_body(), 1_000_000)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, request_id, json)
}

#[tokio::test]
async fn test_cam_with_aspects() {
    let (status, request_id, json) =
        get_json("/cam?objectA=Apple&objectB=Orange&aspect1=taste&weight1=3").await;
    assert_eq!(status, 200);
    assert!(request_id.is_some());

    // taste: 1.0 * (3 + 1); none: 0.5 * 1 after inversion
    assert_eq!(json["object1"], "apple");
    assert_eq!(json["object2"], "orange");
    assert_eq!(json["scoreObject1"]["taste"], 4.0);
    assert_eq!(json["scoreObject1"]["none"], 0.5);
    assert_eq!(json["totalScoreObject1"], 4.5);
    assert_eq!(json["totalScoreObject2"], 0.5);
    assert_eq!(json["winner"], "apple");
    assert!(json["extractedAspectsObject1"].is_array());
    assert_eq!(
        json["sentencesObject2"]["none"],
        serde_json::json!(["Orange is cheaper than apple."])
    );
}

#[tokio::test]
async fn test_root_path_serves_comparison() {
    let (status, _, json) = get_json("/?objectA=apple&objectB=orange").await;
    assert_eq!(status, 200);
    assert_eq!(json["totalScoreObject1"], 1.5);
}

#[tokio::test]
async fn test_unknown_pair_has_no_winner() {
    let (status, _, json) = get_json("/cam?objectA=pear&objectB=plum").await;
    assert_eq!(status, 200);
    assert_eq!(json["winner"], "No winner found");
    assert_eq!(json["scoreObject1"], serde_json::json!({}));
}

#[tokio::test]
async fn test_bad_weight_is_rejected() {
    let (status, request_id, json) =
        get_json("/cam?objectA=apple&objectB=orange&aspect1=taste&weight1=lots").await;
    assert_eq!(status, 400);
    assert!(request_id.is_some());
    assert!(json["error"].as_str().unwrap().contains("lots"));
}

#[tokio::test]
async fn test_reserved_aspect_name_is_rejected() {
    let (status, _, json) =
        get_json("/cam?objectA=apple&objectB=orange&aspect1=multiple&weight1=2").await;
    assert_eq!(status, 400);
    assert!(json["error"].as_str().unwrap().contains("reserved"));
}

#[tokio::test]
async fn test_unsupported_model_is_rejected() {
    let (status, _, json) = get_json("/cam?objectA=apple&objectB=orange&model=bert").await;
    assert_eq!(status, 400);
    assert!(json["error"].as_str().unwrap().contains("bert"));
}

#[tokio::test]
async fn test_default_model_is_accepted() {
    let (status, _, _) = get_json("/cam?objectA=apple&objectB=orange&model=default").await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_health_reports_version() {
    let (status, _, json) = get_json("/health").await;
    assert_eq!(status, 200);
    assert_eq!(json["version"], versus_core::VERSION);
}
