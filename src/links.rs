//! Parsing of Spotify and Apple Music share links.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

lazy_static! {
    static ref SPOTIFY_URL: Regex =
        Regex::new(r"spotify\.com/(?:intl-[a-z]+/)?(track|album|playlist)/([A-Za-z0-9]+)")
            .expect("Failed to compile Spotify URL regex");
    static ref SPOTIFY_URI: Regex = Regex::new(r"spotify:(track|album|playlist):([A-Za-z0-9]+)")
        .expect("Failed to compile Spotify URI regex");
    static ref APPLE_SONG: Regex =
        Regex::new(r"music\.apple\.com/(?:[a-z]{2}/)?album/[^/]+/\d+\?(?:.*&)?i=(\d+)")
            .expect("Failed to compile Apple Music song regex");
    static ref APPLE_ALBUM: Regex = Regex::new(r"music\.apple\.com/(?:[a-z]{2}/)?album/[^/]+/(\d+)")
        .expect("Failed to compile Apple Music album regex");
    static ref APPLE_PLAYLIST: Regex =
        Regex::new(r"music\.apple\.com/(?:[a-z]{2}/)?playlist/[^/]+/(pl\.[A-Za-z0-9]+)")
            .expect("Failed to compile Apple Music playlist regex");
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("Invalid Spotify URL. Please enter a valid Spotify track, album, or playlist URL.")]
    InvalidSpotify,

    #[error("Invalid Apple Music URL. Please enter a valid Apple Music song, album, or playlist URL.")]
    InvalidAppleMusic,

    #[error("Unsupported URL. Please enter a valid Spotify or Apple Music URL.")]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotifyKind {
    Track,
    Album,
    Playlist,
}

impl SpotifyKind {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "track" => Some(Self::Track),
            "album" => Some(Self::Album),
            "playlist" => Some(Self::Playlist),
            _ => None,
        }
    }

    /// Capitalized label, e.g. "Track".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Track => "Track",
            Self::Album => "Album",
            Self::Playlist => "Playlist",
        }
    }
}

impl fmt::Display for SpotifyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Track => "track",
            Self::Album => "album",
            Self::Playlist => "playlist",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyLink {
    pub kind: SpotifyKind,
    pub id: String,
}

impl SpotifyLink {
    /// Accepts `open.spotify.com/{kind}/{id}` URLs and `spotify:{kind}:{id}` URIs.
    pub fn parse(url: &str) -> Result<Self, LinkError> {
        let captures = SPOTIFY_URL
            .captures(url)
            .or_else(|| SPOTIFY_URI.captures(url))
            .ok_or(LinkError::InvalidSpotify)?;
        let kind = SpotifyKind::from_segment(&captures[1]).ok_or(LinkError::InvalidSpotify)?;
        Ok(Self {
            kind,
            id: captures[2].to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppleMusicLink {
    Song(String),
    Album(String),
    Playlist(String),
}

impl AppleMusicLink {
    pub fn parse(url: &str) -> Result<Self, LinkError> {
        // A song link is an album link with an `i=` parameter, so it goes first.
        if let Some(captures) = APPLE_SONG.captures(url) {
            return Ok(Self::Song(captures[1].to_string()));
        }
        if let Some(captures) = APPLE_ALBUM.captures(url) {
            return Ok(Self::Album(captures[1].to_string()));
        }
        if let Some(captures) = APPLE_PLAYLIST.captures(url) {
            return Ok(Self::Playlist(captures[1].to_string()));
        }
        Err(LinkError::InvalidAppleMusic)
    }
}

/// A link routed by host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicLink {
    Spotify(SpotifyLink),
    AppleMusic(AppleMusicLink),
}

impl MusicLink {
    pub fn parse(url: &str) -> Result<Self, LinkError> {
        let url = url.trim();
        if url.contains("spotify.com") || url.starts_with("spotify:") {
            SpotifyLink::parse(url).map(Self::Spotify)
        } else if url.contains("music.apple.com") {
            AppleMusicLink::parse(url).map(Self::AppleMusic)
        } else {
            Err(LinkError::Unsupported)
        }
    }
}
