//! In-process stand-in for the portal backend.
//!
//! Serves the same routes as the real backend from an axum router bound to
//! an ephemeral port, with per-test control over the crossword payload and
//! which horoscope signs fail.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Request counters observed by the stand-in backend.
#[derive(Debug, Default)]
pub struct Stats {
    pub horoscope_calls: AtomicUsize,
    pub crossword_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

/// What the stand-in backend answers.
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub crossword_status: StatusCode,
    pub crossword_body: Value,
    /// Signs answered with HTTP 502.
    pub failing_signs: Vec<&'static str>,
    /// Signs answered with 200 but without a `horoscope` field.
    pub malformed_signs: Vec<&'static str>,
    /// Wrap every horoscope text in surrounding whitespace.
    pub pad_horoscopes: bool,
    /// Delay before every horoscope answer.
    pub delay: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            crossword_status: StatusCode::OK,
            crossword_body: sample_puzzle_json(),
            failing_signs: Vec::new(),
            malformed_signs: Vec::new(),
            pad_horoscopes: false,
            delay: Duration::ZERO,
        }
    }
}

#[derive(Clone)]
struct MockState {
    config: Arc<MockConfig>,
    stats: Arc<Stats>,
}

/// A running stand-in backend.
pub struct MockBackend {
    pub base_url: String,
    pub stats: Arc<Stats>,
}

/// Start a stand-in backend on `127.0.0.1` with an ephemeral port.
pub async fn spawn(config: MockConfig) -> MockBackend {
    let stats = Arc::new(Stats::default());
    let state = MockState {
        config: Arc::new(config),
        stats: Arc::clone(&stats),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/version", get(version))
        .route("/api/crossword/themes", get(themes))
        .route("/api/crossword/generate", post(crossword))
        .route("/api/horoscope/generate", post(horoscope))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{addr}"),
        stats,
    }
}

/// A URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A valid 10x10 puzzle with one across and one down word sharing the `P`.
pub fn sample_puzzle_json() -> Value {
    let size = 10;
    let mut grid = vec![vec![json!({"letter": "#", "number": null}); size]; size];

    for (i, ch) in "PARIS".chars().enumerate() {
        grid[4][2 + i] = json!({"letter": ch.to_string(), "number": null});
    }
    for (i, ch) in "PEN".chars().enumerate() {
        grid[4 + i][2] = json!({"letter": ch.to_string(), "number": null});
    }
    grid[4][2]["number"] = json!(1);

    json!({
        "grid": grid,
        "across": [{"number": 1, "clue": "Capital of France", "answer": "PARIS"}],
        "down": [{"number": 1, "clue": "Writing tool", "answer": "PEN"}],
        "theme": "Travel & Leisure",
        "size": size,
        "word_count": 2,
        "ai_generated": true
    })
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "service": "magazine-portal-api"}))
}

async fn version() -> Json<Value> {
    Json(json!({
        "app": "Magazine Portal API",
        "version": "1.3.0",
        "azure": {
            "endpoint_configured": true,
            "deployment": "gpt-4o",
            "api_version": "2025-01-01-preview",
            "model_optimized_for": "GPT-4o"
        }
    }))
}

async fn themes() -> Json<Value> {
    Json(json!({"themes": ["Lifestyle", "Travel", "Entertainment", "Technology"]}))
}

async fn crossword(State(state): State<MockState>, Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.stats.crossword_calls.fetch_add(1, Ordering::SeqCst);
    (
        state.config.crossword_status,
        Json(state.config.crossword_body.clone()),
    )
}

async fn horoscope(State(state): State<MockState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let stats = &state.stats;
    stats.horoscope_calls.fetch_add(1, Ordering::SeqCst);
    let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    stats.max_in_flight.fetch_max(now, Ordering::SeqCst);

    if !state.config.delay.is_zero() {
        tokio::time::sleep(state.config.delay).await;
    }
    stats.in_flight.fetch_sub(1, Ordering::SeqCst);

    let sign = body["zodiac_sign"].as_str().unwrap_or_default().to_string();
    let magazine = body["magazine"].as_str().unwrap_or_default().to_string();

    if state.config.failing_signs.contains(&sign.as_str()) {
        return (
            StatusCode::BAD_GATEWAY,
            Json(json!({"detail": {"error": "Failed to generate horoscope", "message": "upstream unavailable"}})),
        );
    }
    if state.config.malformed_signs.contains(&sign.as_str()) {
        return (StatusCode::OK, Json(json!({"sign": sign})));
    }

    let mut text = format!("{sign}: the stars favour {magazine} readers & bold moves.");
    if state.config.pad_horoscopes {
        text = format!("\n  {text}  \n");
    }

    (
        StatusCode::OK,
        Json(json!({
            "horoscope": text,
            "sign": sign,
            "type": body["horoscope_type"],
            "magazine": magazine,
            "tone": body["tone"],
        })),
    )
}
