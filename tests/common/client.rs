//! HTTP client for end-to-end tests
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Server
    // ========================================================================

    /// GET /
    pub async fn get_stats(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Stats request failed")
    }

    // ========================================================================
    // Mood Endpoints
    // ========================================================================

    /// GET /get_songs/{emotion}
    pub async fn get_songs(&self, emotion: &str) -> Response {
        self.client
            .get(format!("{}/get_songs/{}", self.base_url, emotion))
            .send()
            .await
            .expect("Get songs request failed")
    }

    /// POST /analyze_mood with `{"text": text}`
    pub async fn analyze_mood(&self, text: &str) -> Response {
        self.analyze_mood_json(json!({ "text": text })).await
    }

    /// POST /analyze_mood with an arbitrary JSON body
    pub async fn analyze_mood_json(&self, body: Value) -> Response {
        self.client
            .post(format!("{}/analyze_mood", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("Analyze mood request failed")
    }

    /// POST /analyze_mood with a raw, possibly broken, JSON body
    pub async fn analyze_mood_raw(&self, body: &'static str) -> Response {
        self.client
            .post(format!("{}/analyze_mood", self.base_url))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Analyze mood request failed")
    }
}
