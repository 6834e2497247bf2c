//! Spotify Web API client (client-credentials flow).

use super::{base_url, fetch_json, UpstreamError};
use crate::config::{ConfigError, Credentials, UpstreamUrls};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

const SERVICE: &str = "spotify";
const TOP_TRACKS_MARKET: &str = "US";
/// Tokens are renewed this long before Spotify says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalIds {
    pub isrc: Option<String>,
    pub upc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub popularity: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub external_ids: ExternalIds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub external_ids: ExternalIds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

/// One page of artist search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistPage {
    #[serde(default)]
    pub items: Vec<SpotifyArtist>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Deserialize)]
struct ArtistSearchResponse {
    #[serde(default)]
    artists: ArtistPage,
}

#[derive(Deserialize, Default)]
struct TrackPage {
    #[serde(default)]
    items: Vec<SpotifyTrack>,
}

#[derive(Deserialize)]
struct TrackSearchResponse {
    #[serde(default)]
    tracks: TrackPage,
}

#[derive(Deserialize)]
struct TopTracksResponse {
    #[serde(default)]
    tracks: Vec<SpotifyTrack>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

pub struct SpotifyClient {
    http: reqwest::Client,
    api_url: String,
    accounts_url: String,
    authorization: String,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(
        http: reqwest::Client,
        urls: &UpstreamUrls,
        credentials: &Credentials,
    ) -> Result<Self, ConfigError> {
        let (client_id, client_secret) = credentials.spotify()?;
        Ok(Self {
            http,
            api_url: base_url(&urls.spotify_api),
            accounts_url: base_url(&urls.spotify_accounts),
            authorization: basic_authorization(client_id, client_secret),
            token: Mutex::new(None),
        })
    }

    /// A valid access token, fetched again only when the cached one is about to expire.
    async fn access_token(&self) -> Result<String, UpstreamError> {
        let mut cached = self.token.lock().await;
        let now = Instant::now();
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        debug!("Requesting a new Spotify access token");
        let request = self
            .http
            .post(format!("{}/api/token", self.accounts_url))
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
            .form(&[("grant_type", "client_credentials")]);
        let response: TokenResponse = fetch_json(SERVICE, request).await?;

        info!("Obtained Spotify access token valid for {}s", response.expires_in);
        let value = response.access_token;
        *cached = Some(CachedToken {
            value: value.clone(),
            expires_at: now + Duration::from_secs(response.expires_in),
        });
        Ok(value)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let token = self.access_token().await?;
        let request = self
            .http
            .get(format!("{}/{}", self.api_url, path))
            .bearer_auth(token)
            .query(query);
        fetch_json(SERVICE, request).await
    }

    /// Artist search biased towards name matches.
    pub async fn search_artists(&self, query: &str, limit: u32) -> Result<ArtistPage, UpstreamError> {
        let response: ArtistSearchResponse = self
            .get(
                "search",
                &[
                    ("q", format!("artist:\"{query}\" {query}")),
                    ("type", "artist".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(response.artists)
    }

    pub async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<SpotifyTrack>, UpstreamError> {
        let response: TopTracksResponse = self
            .get(
                &format!("artists/{}/top-tracks", artist_id),
                &[("market", TOP_TRACKS_MARKET.to_string())],
            )
            .await?;
        Ok(response.tracks)
    }

    /// Best matching track for a free-text query.
    pub async fn search_track(&self, query: &str) -> Result<Option<SpotifyTrack>, UpstreamError> {
        let response: TrackSearchResponse = self
            .get(
                "search",
                &[
                    ("q", query.to_string()),
                    ("type", "track".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(response.tracks.items.into_iter().next())
    }

    pub async fn track(&self, id: &str) -> Result<SpotifyTrack, UpstreamError> {
        self.get(&format!("tracks/{}", id), &[]).await
    }

    pub async fn album(&self, id: &str) -> Result<SpotifyAlbum, UpstreamError> {
        self.get(&format!("albums/{}", id), &[]).await
    }

    pub async fn playlist(&self, id: &str) -> Result<SpotifyPlaylist, UpstreamError> {
        self.get(&format!("playlists/{}", id), &[]).await
    }
}

fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        BASE64.encode(format!("{}:{}", client_id, client_secret))
    )
}

/// Artist names joined for display, e.g. "Daft Punk, Pharrell Williams".
pub fn join_artist_names(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
