//! Common test infrastructure
//!
//! Everything end-to-end tests need: a server under test wired to a fake
//! upstream, a client with one method per endpoint, and the canned data the
//! fake upstream serves. Tests should only import from this module.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{json_body, TestClient, TestServer, ARTIST_QUERY};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_search() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.search_artists(ARTIST_QUERY).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//!     let body = json_body(response).await;
//!     assert_eq!(body["results"].as_array().unwrap().len(), 2);
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod server;
mod upstream;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use client::{json_body, TestClient};
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{description_text, sentences_text};
#[allow(unused_imports)]
pub use server::{TestServer, TestServerOptions};
#[allow(unused_imports)]
pub use upstream::CompletionReply;
