//! HTTP client for end-to-end tests
//!
//! This module wraps reqwest and provides one method per server endpoint.
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

    /// POST a JSON body to `/v1{path}`
    pub async fn post_json(&self, path: &str, body: Value) -> Response {
        self.client
            .post(format!("{}/v1{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .expect("Request failed")
    }

    /// POST a raw body with a JSON content type, for malformed payloads
    pub async fn post_raw(&self, path: &str, body: &str) -> Response {
        self.client
            .post(format!("{}/v1{}", self.base_url, path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub async fn search_artists(&self, query: &str) -> Response {
        self.post_json("/artists/search", json!({ "query": query }))
            .await
    }

    pub async fn search_artists_on(&self, query: &str, platforms: &[&str], limit: u32) -> Response {
        self.post_json(
            "/artists/search",
            json!({ "query": query, "platforms": platforms, "limit": limit }),
        )
        .await
    }

    pub async fn get_artwork(&self, url: &str) -> Response {
        self.post_json("/artwork", json!({ "url": url })).await
    }

    pub async fn get_isrc(&self, url: &str) -> Response {
        self.post_json("/metadata/isrc", json!({ "url": url })).await
    }

    pub async fn get_upc(&self, url: &str) -> Response {
        self.post_json("/metadata/upc", json!({ "url": url })).await
    }

    pub async fn find_channel(&self, username: &str) -> Response {
        self.post_json("/youtube/channel", json!({ "username": username }))
            .await
    }

    pub async fn stream_links(&self, artist: &str, song: &str) -> Response {
        self.post_json("/stream-links", json!({ "artist": artist, "song": song }))
            .await
    }

    // ========================================================================
    // Social
    // ========================================================================

    pub async fn search_facebook(&self, query: &str) -> Response {
        self.post_json("/social/facebook", json!({ "query": query }))
            .await
    }

    pub async fn search_instagram(&self, query: &str) -> Response {
        self.post_json("/social/instagram", json!({ "query": query }))
            .await
    }

    // ========================================================================
    // Descriptions
    // ========================================================================

    pub async fn generate_description(&self, body: Value) -> Response {
        self.post_json("/descriptions", body).await
    }

    // ========================================================================
    // Tools
    // ========================================================================

    pub async fn tap_bpm(&self, taps_ms: &[u64]) -> Response {
        self.post_json("/tools/bpm", json!({ "taps_ms": taps_ms }))
            .await
    }

    pub async fn total_seconds(&self, minutes: u32, seconds: u32) -> Response {
        self.post_json(
            "/tools/seconds",
            json!({ "minutes": minutes, "seconds": seconds }),
        )
        .await
    }
}

/// Read a response body as JSON, panicking with the raw text when it is not
pub async fn json_body(response: Response) -> Value {
    let text = response.text().await.expect("Failed to read body");
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Invalid JSON ({}): {}", e, text))
}
