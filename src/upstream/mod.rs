//! HTTP clients for the music platforms.
//!
//! Every response body is decoded into an explicit struct at this boundary.
//! Transport, status and decoding failures stay distinguishable so callers
//! can report them per platform.

pub mod facebook;
pub mod itunes;
pub mod spotify;
pub mod youtube;

pub use facebook::{FacebookClient, FacebookPage, FacebookUser};
pub use itunes::{ItunesArtist, ItunesClient, ItunesItem};
pub use spotify::{
    SpotifyAlbum, SpotifyArtist, SpotifyClient, SpotifyImage, SpotifyPlaylist, SpotifyTrack,
};
pub use youtube::{YouTubeChannel, YouTubeClient, YouTubeVideo};

use crate::server::metrics;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_UPSTREAM_TIMEOUT_SEC: u64 = 30;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    #[error("{service} responded with status {status}")]
    Status { service: &'static str, status: u16 },

    #[error("{service} returned an unexpected body: {message}")]
    Parse {
        service: &'static str,
        message: String,
    },

    #[error("{0}")]
    NotFound(String),
}

impl UpstreamError {
    pub fn service(&self) -> Option<&'static str> {
        match self {
            Self::Transport { service, .. }
            | Self::Status { service, .. }
            | Self::Parse { service, .. } => Some(service),
            Self::NotFound(_) => None,
        }
    }
}

/// Shared client used by every platform, with a per-request timeout.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("soundfeed-tools/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| UpstreamError::Transport {
            service: "http",
            message: e.to_string(),
        })
}

/// Send a request and decode a successful JSON body.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<T, UpstreamError> {
    let response = request.send().await.map_err(|e| {
        metrics::record_upstream_request(service, "transport");
        UpstreamError::Transport {
            service,
            message: e.to_string(),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        metrics::record_upstream_request(service, "status");
        debug!("{} responded with {}", service, status);
        return Err(UpstreamError::Status {
            service,
            status: status.as_u16(),
        });
    }

    // Some platforms (iTunes) send JSON as text/javascript, so decode from text.
    let body = response.text().await.map_err(|e| {
        metrics::record_upstream_request(service, "transport");
        UpstreamError::Transport {
            service,
            message: e.to_string(),
        }
    })?;

    match serde_json::from_str(&body) {
        Ok(value) => {
            metrics::record_upstream_request(service, "ok");
            Ok(value)
        }
        Err(e) => {
            metrics::record_upstream_request(service, "parse");
            Err(UpstreamError::Parse {
                service,
                message: e.to_string(),
            })
        }
    }
}

/// Trim a configured base URL so paths can be appended with `/`.
pub(crate) fn base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
