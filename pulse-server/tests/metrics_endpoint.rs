use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use chrono::DateTime;
use pulse_agent::{Metric, Sampler, SamplingError};
use pulse_server::api::{AppState, routes};
use serde_json::Value;
use tower::ServiceExt;

#[derive(Default)]
struct FakeSampler {
    memory: AtomicU64,
    cpu_fails: bool,
}

impl FakeSampler {
    fn with_memory(total: u64) -> Arc<Self> {
        Arc::new(Self {
            memory: AtomicU64::new(total),
            cpu_fails: false,
        })
    }
}

impl Sampler for FakeSampler {
    fn sample_cpu(&self) -> Result<u8, SamplingError> {
        if self.cpu_fails {
            Err(SamplingError::NoCpu { index: 0 })
        } else {
            Ok(50)
        }
    }

    fn sample_memory(&self) -> u64 {
        self.memory.load(Ordering::SeqCst)
    }
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn reports_simulated_memory_total() {
    let app = routes(AppState::new(FakeSampler::with_memory(17179869184)));

    let (status, body) = send(&app, Method::GET, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["metric"], "memory");
    assert_eq!(entries[0]["value"].as_u64(), Some(17179869184));
    let timestamp = entries[0]["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn every_request_samples_afresh() {
    let sampler = FakeSampler::with_memory(8 << 30);
    let app = routes(AppState::new(sampler.clone()));

    let (_, first) = send(&app, Method::GET, "/metrics").await;
    sampler.memory.store(16 << 30, Ordering::SeqCst);
    let (_, second) = send(&app, Method::GET, "/metrics").await;

    assert_eq!(first[0]["value"].as_u64(), Some(8 << 30));
    assert_eq!(second[0]["value"].as_u64(), Some(16 << 30));
}

#[tokio::test]
async fn sampling_failure_is_a_500_with_json_error() {
    let sampler = Arc::new(FakeSampler {
        memory: AtomicU64::new(1024),
        cpu_fails: true,
    });
    let app = routes(AppState::with_metrics(sampler, &[Metric::Memory, Metric::Cpu]));

    let (status, body) = send(&app, Method::GET, "/metrics").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("cpu core 0"));
}

#[tokio::test]
async fn unreadable_memory_is_a_500() {
    let app = routes(AppState::new(FakeSampler::with_memory(0)));
    let (status, body) = send(&app, Method::GET, "/metrics").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn multiple_metrics_produce_multiple_entries() {
    let app = routes(AppState::with_metrics(
        FakeSampler::with_memory(4096),
        &[Metric::Memory, Metric::Cpu],
    ));
    let (status, body) = send(&app, Method::GET, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let metrics: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["metric"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(metrics, ["memory", "cpu"]);
}

#[tokio::test]
async fn only_get_metrics_is_routed() {
    let app = routes(AppState::new(FakeSampler::with_memory(4096)));
    assert_eq!(send(&app, Method::GET, "/").await.0, StatusCode::NOT_FOUND);
    assert_eq!(
        send(&app, Method::POST, "/metrics").await.0,
        StatusCode::METHOD_NOT_ALLOWED
    );
}
