//! ISRC and UPC lookup from Spotify links.

use super::ServiceError;
use crate::links::{SpotifyKind, SpotifyLink};
use crate::upstream::spotify::join_artist_names;
use crate::upstream::SpotifyClient;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CodeKind {
    #[serde(rename = "ISRC")]
    Isrc,
    #[serde(rename = "UPC")]
    Upc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeRecord {
    pub title: String,
    pub artist: String,
    pub image_url: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: CodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

pub struct MetadataService {
    spotify: Arc<SpotifyClient>,
}

impl MetadataService {
    pub fn new(spotify: Arc<SpotifyClient>) -> Self {
        Self { spotify }
    }

    /// ISRC of a track link.
    pub async fn isrc(&self, url: &str) -> Result<CodeRecord, ServiceError> {
        let link = SpotifyLink::parse(url.trim())?;
        if link.kind != SpotifyKind::Track {
            return Err(ServiceError::InvalidInput(
                "Please enter a Spotify track URL to get ISRC. For albums, use the UPC lookup."
                    .to_string(),
            ));
        }

        let track = self.spotify.track(&link.id).await?;
        let code = track
            .external_ids
            .isrc
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ServiceError::NotFound("No ISRC found for this track.".to_string()))?;
        let album = track.album.unwrap_or_default();

        Ok(CodeRecord {
            title: track.name,
            artist: join_artist_names(&track.artists),
            image_url: album.images.first().map(|i| i.url.clone()).unwrap_or_default(),
            code,
            kind: CodeKind::Isrc,
            release_date: album.release_date,
        })
    }

    /// UPC of an album link.
    pub async fn upc(&self, url: &str) -> Result<CodeRecord, ServiceError> {
        let link = SpotifyLink::parse(url.trim())?;
        if link.kind != SpotifyKind::Album {
            return Err(ServiceError::InvalidInput(
                "Please enter a Spotify album URL to get UPC. For tracks, use the ISRC lookup."
                    .to_string(),
            ));
        }

        let album = self.spotify.album(&link.id).await?;
        let code = album
            .external_ids
            .upc
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ServiceError::NotFound("No UPC found for this album.".to_string()))?;

        Ok(CodeRecord {
            title: album.name,
            artist: join_artist_names(&album.artists),
            image_url: album.images.first().map(|i| i.url.clone()).unwrap_or_default(),
            code,
            kind: CodeKind::Upc,
            release_date: album.release_date,
        })
    }
}
