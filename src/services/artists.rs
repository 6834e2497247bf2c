//! Artist search across Spotify and Apple Music.
//!
//! Platforms are queried concurrently and each reports its own outcome, so a
//! failing platform never hides the results of the other.

use super::{require_text, ServiceError};
use crate::search::{rank_candidates, Candidate, RankingPolicy, ScoredCandidate};
use crate::upstream::itunes::resize_artwork;
use crate::upstream::{ItunesClient, SpotifyClient, UpstreamError};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_ARTIST_LIMIT: u32 = 20;
pub const MAX_ARTIST_LIMIT: u32 = 50;
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
const POPULAR_TRACKS: usize = 3;
const APPLE_ARTWORK_SIZE: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Spotify,
    AppleMusic,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Spotify, Platform::AppleMusic];

    fn label(&self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::AppleMusic => "Apple Music",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularTrack {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistResult {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub profile_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    pub relevance_score: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub popular_tracks: Vec<PopularTrack>,
}

impl Candidate for ArtistResult {
    fn name(&self) -> &str {
        &self.name
    }

    fn popularity(&self) -> u32 {
        self.popularity.unwrap_or(0)
    }
}

/// The result of one platform's branch of a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformOutcome {
    pub platform: Platform,
    pub success: bool,
    pub artists: Vec<ArtistResult>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlatformOutcome {
    fn found(platform: Platform, artists: Vec<ArtistResult>, total: u64) -> Self {
        Self {
            platform,
            success: true,
            artists,
            total,
            error: None,
        }
    }

    fn failed(platform: Platform, error: String) -> Self {
        Self {
            platform,
            success: false,
            artists: Vec::new(),
            total: 0,
            error: Some(error),
        }
    }
}

pub struct ArtistFinder {
    spotify: Arc<SpotifyClient>,
    itunes: Arc<ItunesClient>,
}

impl ArtistFinder {
    pub fn new(spotify: Arc<SpotifyClient>, itunes: Arc<ItunesClient>) -> Self {
        Self { spotify, itunes }
    }

    /// Search `platforms` (all when empty) for `query`.
    pub async fn search(
        &self,
        query: &str,
        platforms: &[Platform],
        limit: u32,
    ) -> Result<Vec<PlatformOutcome>, ServiceError> {
        let query = require_text(query, "Please enter an artist name")?;
        if limit == 0 || limit > MAX_ARTIST_LIMIT {
            return Err(ServiceError::InvalidInput(format!(
                "Limit must be between 1 and {}",
                MAX_ARTIST_LIMIT
            )));
        }

        let requested: &[Platform] = if platforms.is_empty() {
            &Platform::ALL
        } else {
            platforms
        };
        let mut selected: Vec<Platform> = Vec::with_capacity(requested.len());
        for platform in requested {
            if !selected.contains(platform) {
                selected.push(*platform);
            }
        }

        let branches = selected.iter().map(|&platform| async move {
            let result = match platform {
                Platform::Spotify => self.search_spotify(query, limit).await,
                Platform::AppleMusic => self.search_apple_music(query, limit).await,
            };
            match result {
                Ok(Some((artists, total))) => PlatformOutcome::found(platform, artists, total),
                Ok(None) => PlatformOutcome::failed(
                    platform,
                    format!("No artists found on {}", platform.label()),
                ),
                Err(e) => {
                    warn!("{} artist search failed: {}", platform.label(), e);
                    PlatformOutcome::failed(
                        platform,
                        format!(
                            "Failed to search for artists on {}. Please try again.",
                            platform.label()
                        ),
                    )
                }
            }
        });
        Ok(join_all(branches).await)
    }

    async fn search_spotify(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Option<(Vec<ArtistResult>, u64)>, UpstreamError> {
        let page = self.spotify.search_artists(query, limit).await?;
        if page.items.is_empty() {
            return Ok(None);
        }

        let candidates = page
            .items
            .into_iter()
            .map(|artist| ArtistResult {
                image_url: artist
                    .images
                    .first()
                    .map(|i| i.url.clone())
                    .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
                profile_url: artist.external_urls.spotify,
                followers: Some(artist.followers.total),
                popularity: Some(artist.popularity),
                id: artist.id,
                name: artist.name,
                relevance_score: 0.0,
                popular_tracks: Vec::new(),
            })
            .collect();
        let ranked = rank_candidates(query, candidates, &RankingPolicy::default());

        let enriched = join_all(ranked.into_iter().map(|scored| async move {
            let mut artist = with_score(scored);
            match self.spotify.artist_top_tracks(&artist.id).await {
                Ok(tracks) => {
                    artist.popular_tracks = tracks
                        .into_iter()
                        .take(POPULAR_TRACKS)
                        .map(|t| PopularTrack { id: t.id, name: t.name })
                        .collect();
                }
                Err(e) => debug!("Top tracks unavailable for {}: {}", artist.id, e),
            }
            artist
        }))
        .await;

        Ok(Some((enriched, page.total)))
    }

    async fn search_apple_music(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Option<(Vec<ArtistResult>, u64)>, UpstreamError> {
        let response = self.itunes.search_artists(query, limit).await?;
        if response.results.is_empty() {
            return Ok(None);
        }

        let candidates = response
            .results
            .into_iter()
            .map(|artist| ArtistResult {
                id: artist.artist_id.to_string(),
                name: artist.artist_name,
                image_url: PLACEHOLDER_IMAGE.to_string(),
                profile_url: format!("https://music.apple.com/artist/{}", artist.artist_id),
                followers: None,
                popularity: None,
                relevance_score: 0.0,
                popular_tracks: Vec::new(),
            })
            .collect();
        let ranked = rank_candidates(query, candidates, &RankingPolicy::ScoreOnly);

        let enriched = join_all(ranked.into_iter().map(|scored| async move {
            let mut artist = with_score(scored);
            match self.itunes.lookup(&artist.id, "album", Some(1)).await {
                Ok(items) => {
                    if let Some(artwork) = items
                        .iter()
                        .find(|item| item.is_collection())
                        .and_then(|album| album.artwork_url100.as_deref())
                    {
                        artist.image_url = resize_artwork(artwork, APPLE_ARTWORK_SIZE);
                    }
                }
                Err(e) => debug!("Album artwork unavailable for {}: {}", artist.id, e),
            }
            artist
        }))
        .await;

        Ok(Some((enriched, response.result_count)))
    }
}

fn with_score(scored: ScoredCandidate<ArtistResult>) -> ArtistResult {
    ArtistResult {
        relevance_score: scored.score,
        ..scored.candidate
    }
}
