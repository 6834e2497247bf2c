//! Canned upstream payloads
//!
//! JSON bodies shaped like the real Spotify, iTunes, YouTube and Graph API
//! responses, trimmed to the fields the server reads.

use super::constants::*;
use serde_json::{json, Value};

fn spotify_image(url: &str, size: u32) -> Value {
    json!({ "url": url, "width": size, "height": size })
}

fn spotify_artist(id: &str, name: &str, popularity: u32, followers: u64, with_image: bool) -> Value {
    let images = if with_image {
        vec![spotify_image(&format!("https://i.scdn.co/image/{}", id), 640)]
    } else {
        vec![]
    };
    json!({
        "id": id,
        "name": name,
        "type": "artist",
        "popularity": popularity,
        "followers": { "href": null, "total": followers },
        "images": images,
        "external_urls": { "spotify": format!("https://open.spotify.com/artist/{}", id) },
        "genres": ["dream pop"],
    })
}

/// Artist search page, deliberately not in relevance order.
pub fn spotify_artist_page() -> Value {
    json!({
        "artists": {
            "items": [
                spotify_artist(DISTANT_ARTIST_ID, DISTANT_ARTIST_NAME, 90, 2_400_000, true),
                spotify_artist(EXACT_ARTIST_ID, EXACT_ARTIST_NAME, 10, 1_250, true),
                spotify_artist(BAND_ARTIST_ID, BAND_ARTIST_NAME, 50, 48_000, false),
            ],
            "total": 3,
            "limit": 20,
            "offset": 0,
        }
    })
}

pub fn spotify_empty_artist_page() -> Value {
    json!({ "artists": { "items": [], "total": 0 } })
}

fn album_images() -> Value {
    json!([
        spotify_image("https://i.scdn.co/image/harbor-64", 64),
        spotify_image("https://i.scdn.co/image/harbor-640", 640),
        spotify_image("https://i.scdn.co/image/harbor-300", 300),
    ])
}

pub fn spotify_track(id: &str, with_isrc: bool) -> Value {
    let external_ids = if with_isrc {
        json!({ "isrc": TRACK_ISRC })
    } else {
        json!({})
    };
    json!({
        "id": id,
        "name": SONG_TITLE,
        "artists": [{ "id": EXACT_ARTIST_ID, "name": EXACT_ARTIST_NAME }, { "id": "0Guest", "name": "Guest Voice" }],
        "album": {
            "id": ALBUM_ID,
            "name": ALBUM_TITLE,
            "images": album_images(),
            "release_date": RELEASE_DATE,
        },
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", id) },
        "external_ids": external_ids,
    })
}

pub fn spotify_track_page(tracks: Vec<Value>) -> Value {
    let total = tracks.len();
    json!({ "tracks": { "items": tracks, "total": total } })
}

/// Four top tracks, of which the server keeps three.
pub fn spotify_top_tracks() -> Value {
    let tracks: Vec<Value> = ["Glass Harbor", "Tidewater", "Paper Moons", "Low Sun"]
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": format!("0TopTrack{}", i), "name": name }))
        .collect();
    json!({ "tracks": tracks })
}

pub fn spotify_album() -> Value {
    json!({
        "id": ALBUM_ID,
        "name": ALBUM_TITLE,
        "album_type": "album",
        "artists": [{ "id": EXACT_ARTIST_ID, "name": EXACT_ARTIST_NAME }],
        "images": album_images(),
        "release_date": RELEASE_DATE,
        "external_ids": { "upc": ALBUM_UPC },
    })
}

pub fn spotify_playlist() -> Value {
    json!({
        "id": PLAYLIST_ID,
        "name": PLAYLIST_TITLE,
        "images": [{ "url": "https://mosaic.scdn.co/night-drive", "width": null, "height": null }],
    })
}

pub fn spotify_not_found() -> Value {
    json!({ "error": { "status": 404, "message": "Resource not found" } })
}

pub fn itunes_results(results: Vec<Value>) -> Value {
    json!({ "resultCount": results.len(), "results": results })
}

pub fn itunes_artists() -> Value {
    itunes_results(vec![
        json!({
            "wrapperType": "artist",
            "artistType": "Artist",
            "artistId": APPLE_OTHER_ARTIST_ID,
            "artistName": APPLE_OTHER_ARTIST_NAME,
        }),
        json!({
            "wrapperType": "artist",
            "artistType": "Artist",
            "artistId": APPLE_ARTIST_ID,
            "artistName": APPLE_ARTIST_NAME,
        }),
    ])
}

fn itunes_collection() -> Value {
    json!({
        "wrapperType": "collection",
        "collectionId": APPLE_ALBUM_ID,
        "artistName": APPLE_ARTIST_NAME,
        "collectionName": ALBUM_TITLE,
        "artworkUrl100": format!("{}/100x100bb.jpg", APPLE_ARTWORK_BASE),
    })
}

/// Artist lookup with its latest album.
pub fn itunes_artist_albums() -> Value {
    itunes_results(vec![
        json!({
            "wrapperType": "artist",
            "artistId": APPLE_ARTIST_ID,
            "artistName": APPLE_ARTIST_NAME,
        }),
        itunes_collection(),
    ])
}

pub fn itunes_album() -> Value {
    itunes_results(vec![itunes_collection()])
}

pub fn itunes_song() -> Value {
    itunes_results(vec![json!({
        "wrapperType": "track",
        "kind": "song",
        "trackId": APPLE_SONG_ID,
        "artistName": APPLE_ARTIST_NAME,
        "collectionName": ALBUM_TITLE,
        "trackName": SONG_TITLE,
        "artworkUrl100": format!("{}/100x100bb.jpg", APPLE_ARTWORK_BASE),
    })])
}

pub fn youtube_items(items: Vec<Value>) -> Value {
    json!({ "kind": "youtube#searchListResponse", "items": items })
}

pub fn youtube_channel_hit() -> Value {
    json!({
        "id": { "kind": "youtube#channel", "channelId": CHANNEL_ID },
        "snippet": { "title": CHANNEL_TITLE, "channelId": CHANNEL_ID },
    })
}

pub fn youtube_channel() -> Value {
    json!({
        "id": CHANNEL_ID,
        "snippet": {
            "title": CHANNEL_TITLE,
            "thumbnails": { "default": { "url": "https://yt3.ggpht.com/mirasol=s88" } },
        },
    })
}

pub fn youtube_video_hit() -> Value {
    json!({
        "id": { "kind": "youtube#video", "videoId": VIDEO_ID },
        "snippet": { "title": format!("{} - {} (Official Video)", EXACT_ARTIST_NAME, SONG_TITLE) },
    })
}

pub fn facebook_pages() -> Value {
    json!({
        "data": [{
            "id": FACEBOOK_PAGE_ID,
            "name": EXACT_ARTIST_NAME,
            "picture": { "data": { "url": "https://graph.facebook.com/page.jpg" } },
            "fan_count": 5300,
            "is_verified": true,
        }]
    })
}

pub fn facebook_users() -> Value {
    json!({
        "data": [{
            "id": FACEBOOK_USER_ID,
            "name": EXACT_ARTIST_NAME,
            "picture": { "data": { "url": "https://graph.facebook.com/user.jpg" } },
        }]
    })
}

pub fn facebook_empty() -> Value {
    json!({ "data": [] })
}

pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "gen-test",
        "model": "test/model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop",
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 110, "total_tokens": 230 },
    })
}

/// A complete sentence of exactly `len` characters.
pub fn description_text(len: usize) -> String {
    let vocabulary = ["harbor", "glass", "tide", "lantern", "shimmer", "drift"];
    let mut text = String::new();
    let mut i = 0;
    while text.chars().count() < len - 1 {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(vocabulary[i % vocabulary.len()]);
        i += 1;
    }
    let mut text: String = text.chars().take(len - 1).collect();
    text = text.trim_end().to_string();
    while text.chars().count() < len - 1 {
        text.push('e');
    }
    text.push('.');
    text
}

/// A multi-sentence answer of roughly `len` characters.
pub fn sentences_text(len: usize) -> String {
    let sentences = [
        "Glass Harbor opens with a hush of tape hiss and a lone guitar.",
        "The drums arrive late and carry the chorus out over the water.",
        "Mira Sol sings about leaving a city that never learned her name.",
        "Every verse adds a new color without crowding the melody.",
    ];
    let mut text = String::new();
    let mut i = 0;
    while text.chars().count() < len {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(sentences[i % sentences.len()]);
        i += 1;
    }
    text
}
