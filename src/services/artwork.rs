//! Cover artwork for Spotify and Apple Music links.

use super::ServiceError;
use crate::links::{AppleMusicLink, MusicLink, SpotifyKind, SpotifyLink};
use crate::upstream::spotify::join_artist_names;
use crate::upstream::{ItunesClient, SpotifyClient, SpotifyImage};
use serde::Serialize;
use std::sync::Arc;

/// Sizes offered for Apple artwork, largest last.
pub const APPLE_ARTWORK_SIZES: [u32; 3] = [1500, 2000, 3000];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtworkImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl From<SpotifyImage> for ArtworkImage {
    fn from(image: SpotifyImage) -> Self {
        Self {
            url: image.url,
            width: image.width,
            height: image.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artwork {
    pub name: String,
    pub artists: String,
    /// "Track", "Album", "Playlist" or "Song".
    #[serde(rename = "type")]
    pub kind: String,
    pub images: Vec<ArtworkImage>,
}

pub struct ArtworkService {
    spotify: Arc<SpotifyClient>,
    itunes: Arc<ItunesClient>,
}

impl ArtworkService {
    pub fn new(spotify: Arc<SpotifyClient>, itunes: Arc<ItunesClient>) -> Self {
        Self { spotify, itunes }
    }

    pub async fn fetch(&self, url: &str) -> Result<Artwork, ServiceError> {
        match MusicLink::parse(url)? {
            MusicLink::Spotify(link) => self.fetch_spotify(link).await,
            MusicLink::AppleMusic(link) => self.fetch_apple_music(link).await,
        }
    }

    async fn fetch_spotify(&self, link: SpotifyLink) -> Result<Artwork, ServiceError> {
        let (name, artists, images) = match link.kind {
            SpotifyKind::Track => {
                let track = self.spotify.track(&link.id).await?;
                let images = track.album.map(|a| a.images).unwrap_or_default();
                (track.name, join_artist_names(&track.artists), images)
            }
            SpotifyKind::Album => {
                let album = self.spotify.album(&link.id).await?;
                (album.name, join_artist_names(&album.artists), album.images)
            }
            SpotifyKind::Playlist => {
                let playlist = self.spotify.playlist(&link.id).await?;
                (playlist.name, String::new(), playlist.images)
            }
        };

        if images.is_empty() {
            return Err(ServiceError::NotFound("No artwork found for this item.".to_string()));
        }

        Ok(Artwork {
            name,
            artists,
            kind: link.kind.label().to_string(),
            images: sort_largest_first(images),
        })
    }

    async fn fetch_apple_music(&self, link: AppleMusicLink) -> Result<Artwork, ServiceError> {
        let (id, entity, kind) = match &link {
            AppleMusicLink::Song(id) => (id, "song", "Song"),
            AppleMusicLink::Album(id) => (id, "album", "Album"),
            AppleMusicLink::Playlist(_) => {
                return Err(ServiceError::InvalidInput(
                    "Apple Music playlists are not currently supported. Please use a song or album URL."
                        .to_string(),
                ))
            }
        };

        let items = self.itunes.lookup(id, entity, None).await?;
        let item = items.into_iter().next().ok_or_else(|| {
            ServiceError::NotFound("No results found for this Apple Music item.".to_string())
        })?;

        let base = item
            .artwork_url100
            .as_deref()
            .and_then(apple_artwork_base)
            .ok_or_else(|| ServiceError::NotFound("No artwork found for this item.".to_string()))?;

        Ok(Artwork {
            name: item.track_name.or(item.collection_name).unwrap_or_default(),
            artists: item.artist_name.unwrap_or_default(),
            kind: kind.to_string(),
            images: APPLE_ARTWORK_SIZES
                .iter()
                .map(|&size| ArtworkImage {
                    url: format!("{}/{}x{}bb.jpg", base, size, size),
                    width: Some(size),
                    height: Some(size),
                })
                .collect(),
        })
    }
}

fn sort_largest_first(images: Vec<SpotifyImage>) -> Vec<ArtworkImage> {
    let mut images: Vec<ArtworkImage> = images.into_iter().map(ArtworkImage::from).collect();
    images.sort_by(|a, b| b.width.unwrap_or(0).cmp(&a.width.unwrap_or(0)));
    images
}

/// The artwork URL without its trailing `/100x100bb.jpg`.
fn apple_artwork_base(artwork_url100: &str) -> Option<&str> {
    let base = artwork_url100
        .strip_suffix("/100x100bb.jpg")
        .unwrap_or(artwork_url100);
    if base.is_empty() {
        None
    } else {
        Some(base)
    }
}
