//! HTTP endpoint tests driving the router directly, without a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use vadsplit::decode::MockDecoder;
use vadsplit::server::router;
use vadsplit::vad::EnergyClassifierFactory;
use vadsplit::{EncodedSegment, Engine, EngineConfig};

const BOUNDARY: &str = "vadsplit-test-boundary";

fn test_engine() -> Arc<Engine> {
    let factory = Arc::new(EnergyClassifierFactory::with_thresholds([
        0.01, 0.02, 0.04, 0.08,
    ]));
    Arc::new(Engine::new(EngineConfig::default(), factory).unwrap())
}

/// 16kHz mono 16-bit little-endian PCM of constant amplitude.
fn tone_pcm(secs: f64, amplitude: i16) -> Vec<u8> {
    let samples = (secs * 16000.0) as usize;
    let mut data = Vec::with_capacity(samples * 2);
    for _ in 0..samples {
        data.extend_from_slice(&amplitude.to_le_bytes());
    }
    data
}

fn multipart_body(field_name: &str, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"upload.bin\"\r\n",
            field_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(field_name: &str, payload: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/uploadfile")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field_name, payload)))
        .unwrap()
}

#[tokio::test]
async fn upload_returns_encoded_segments() {
    // Mock decoder passes raw PCM through: 3s silence, 5s speech, 3s silence
    let mut pcm = tone_pcm(3.0, 0);
    pcm.extend(tone_pcm(5.0, 3000));
    pcm.extend(tone_pcm(3.0, 0));

    let app = router(test_engine(), Arc::new(MockDecoder::new()));
    let response = app.oneshot(upload_request("file", &pcm)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let segments: Vec<EncodedSegment> = serde_json::from_slice(&body).unwrap();

    assert_eq!(segments.len(), 1);
    let segment = &segments[0];
    assert!(segment.duration > 2.0 && segment.duration < 15.0);
    assert_eq!(segment.aggressiveness, 0);

    // Transport data round-trips to the exact PCM slice
    let decoded = segment.decode_data().unwrap();
    let offset = (segment.start * 32000.0).round() as usize;
    assert_eq!(decoded, pcm[offset..offset + decoded.len()]);
}

#[tokio::test]
async fn silent_upload_returns_empty_array() {
    let pcm = tone_pcm(10.0, 0);

    let app = router(test_engine(), Arc::new(MockDecoder::new()));
    let response = app.oneshot(upload_request("file", &pcm)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let segments: Vec<EncodedSegment> = serde_json::from_slice(&body).unwrap();
    assert!(segments.is_empty());
}

#[tokio::test]
async fn missing_file_field_is_bad_request() {
    let app = router(test_engine(), Arc::new(MockDecoder::new()));
    let response = app
        .oneshot(upload_request("not-the-file", b"payload"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn decoder_failure_is_bad_request() {
    let app = router(test_engine(), Arc::new(MockDecoder::new().with_failure()));
    let response = app.oneshot(upload_request("file", b"not audio")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("decode"));
}

#[tokio::test]
async fn non_multipart_request_is_rejected() {
    let app = router(test_engine(), Arc::new(MockDecoder::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/uploadfile")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_ne!(response.status(), StatusCode::OK);
}
