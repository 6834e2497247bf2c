//! Shared constants for end-to-end tests
//!
//! Credentials handed to the server and the ids and names the fake upstream
//! knows about. When the canned data changes, update this file together with
//! fixtures.rs.

// ============================================================================
// Credentials
// ============================================================================

pub const SPOTIFY_CLIENT_ID: &str = "test-spotify-client";
pub const SPOTIFY_CLIENT_SECRET: &str = "test-spotify-secret";

/// Access token the fake accounts service hands out
pub const SPOTIFY_ACCESS_TOKEN: &str = "test-spotify-token";

pub const YOUTUBE_API_KEY: &str = "test-youtube-key";

pub const OPENROUTER_API_KEY: &str = "test-openrouter-key";

pub const FACEBOOK_APP_ID: &str = "test-facebook-app";
pub const FACEBOOK_APP_SECRET: &str = "test-facebook-secret";

/// App token the fake Graph API hands out
pub const FACEBOOK_ACCESS_TOKEN: &str = "test-facebook-token";

// ============================================================================
// Artist search
// ============================================================================

/// Query that matches the canned artists on both platforms
pub const ARTIST_QUERY: &str = "Mira Sol";

/// Query for which no platform finds anything
pub const UNKNOWN_ARTIST_QUERY: &str = "Nobody Knows";

/// Query for which iTunes answers with a server error
pub const FLAKY_ARTIST_QUERY: &str = "Static Noise";

/// Spotify artist named exactly like the query, barely popular
pub const EXACT_ARTIST_ID: &str = "0MiraSolExact";
pub const EXACT_ARTIST_NAME: &str = "Mira Sol";

/// Spotify artist with a distant name, very popular
pub const DISTANT_ARTIST_ID: &str = "0MiroSaltFar";
pub const DISTANT_ARTIST_NAME: &str = "Miro Salt";

/// Spotify artist whose name contains the query
pub const BAND_ARTIST_ID: &str = "0MiraSolTrio";
pub const BAND_ARTIST_NAME: &str = "Mira Sol Trio";

pub const APPLE_ARTIST_ID: u64 = 1_100_200_300;
pub const APPLE_ARTIST_NAME: &str = "Mira Sol";

/// Apple Music artist without albums, so without artwork
pub const APPLE_OTHER_ARTIST_ID: u64 = 1_100_200_301;
pub const APPLE_OTHER_ARTIST_NAME: &str = "Mira Solstice";

// ============================================================================
// Releases
// ============================================================================

pub const SONG_TITLE: &str = "Glass Harbor";
pub const ALBUM_TITLE: &str = "Harbor Lights";
pub const PLAYLIST_TITLE: &str = "Night Drive";

pub const TRACK_ID: &str = "4cOdK2wGLETKBW3PvgPWqT";
pub const TRACK_WITHOUT_ISRC_ID: &str = "0DemoTrackNoIsrc0";
pub const TRACK_ISRC: &str = "QZES82400117";
pub const ALBUM_ID: &str = "1DFixLWuPkv3KT3TnV35m3";
pub const ALBUM_UPC: &str = "196871234567";
pub const PLAYLIST_ID: &str = "37i9dQZF1DXcBWIGoYBM5M";
pub const RELEASE_DATE: &str = "2024-05-17";

/// Spotify id the fake API has never heard of
pub const MISSING_SPOTIFY_ID: &str = "0000000000000000000000";

pub const APPLE_ALBUM_ID: u64 = 1_700_000_001;
pub const APPLE_SONG_ID: u64 = 1_700_000_002;

/// Base of the canned Apple artwork URLs
pub const APPLE_ARTWORK_BASE: &str =
    "https://is1-ssl.mzstatic.com/image/thumb/Music116/v4/harbor.jpg";

// ============================================================================
// YouTube and social
// ============================================================================

pub const CHANNEL_HANDLE: &str = "mirasolmusic";
pub const CHANNEL_ID: &str = "UCmiraSolOfficial00000000";
pub const CHANNEL_TITLE: &str = "Mira Sol";
pub const VIDEO_ID: &str = "gl4ssH4rb0r";

pub const FACEBOOK_PAGE_ID: &str = "104729381234567";
pub const FACEBOOK_USER_ID: &str = "100087654321098";

/// Instagram handle the oEmbed probe recognises
pub const INSTAGRAM_HANDLE: &str = "mirasol";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for a server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for a server to become ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Timeout the server under test uses towards the fake upstream (seconds)
pub const UPSTREAM_TIMEOUT_SECS: u64 = 5;
