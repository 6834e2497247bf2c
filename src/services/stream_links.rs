//! Streaming links for a song, with search-page fallbacks.

use super::{require_text, ServiceError};
use crate::upstream::{SpotifyClient, YouTubeClient};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamLink {
    pub url: String,
    pub title: String,
    /// False when the link is a platform search page rather than the song itself.
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamLinks {
    pub spotify: StreamLink,
    pub youtube: StreamLink,
}

pub struct StreamLinkService {
    spotify: Arc<SpotifyClient>,
    youtube: Arc<YouTubeClient>,
}

impl StreamLinkService {
    pub fn new(spotify: Arc<SpotifyClient>, youtube: Arc<YouTubeClient>) -> Self {
        Self { spotify, youtube }
    }

    /// Both lookups run concurrently; each falls back on its own.
    pub async fn generate(&self, artist: &str, song: &str) -> Result<StreamLinks, ServiceError> {
        let artist = require_text(artist, "Please enter an artist name")?;
        let song = require_text(song, "Please enter a song name")?;
        let query = format!("{} {}", artist, song);

        let (spotify, youtube) = tokio::join!(self.spotify_link(&query), self.youtube_link(&query));
        Ok(StreamLinks { spotify, youtube })
    }

    async fn spotify_link(&self, query: &str) -> StreamLink {
        match self.spotify.search_track(query).await {
            Ok(Some(track)) => StreamLink {
                title: match track.artists.first() {
                    Some(artist) => format!("{} - {}", track.name, artist.name),
                    None => track.name,
                },
                url: track.external_urls.spotify,
                matched: true,
            },
            Ok(None) => spotify_search(query),
            Err(e) => {
                warn!("Spotify track search failed: {}", e);
                spotify_search(query)
            }
        }
    }

    async fn youtube_link(&self, query: &str) -> StreamLink {
        match self.youtube.search_video(query).await {
            Ok(Some(video)) => StreamLink {
                url: format!("https://www.youtube.com/watch?v={}", video.video_id),
                title: video.title,
                matched: true,
            },
            Ok(None) => youtube_search(query),
            Err(e) => {
                warn!("YouTube video search failed: {}", e);
                youtube_search(query)
            }
        }
    }
}

pub fn spotify_search(query: &str) -> StreamLink {
    StreamLink {
        url: format!("https://open.spotify.com/search/{}", urlencoding::encode(query)),
        title: format!("Search for {}", query),
        matched: false,
    }
}

pub fn youtube_search(query: &str) -> StreamLink {
    StreamLink {
        url: format!(
            "https://www.youtube.com/results?search_query={}",
            urlencoding::encode(query)
        ),
        title: format!("Search for {}", query),
        matched: false,
    }
}
