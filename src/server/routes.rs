//! JSON route handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::state::*;
use crate::description::{FinalDescription, GenerationMode, LengthWindow, SongDetails};
use crate::services::artists::DEFAULT_ARTIST_LIMIT;
use crate::services::{
    Artwork, ChannelInfo, CodeRecord, Platform, PlatformOutcome, SocialResult, StreamLinks,
};
use crate::tools::{bpm_from_taps, to_total_seconds};

/// Largest window a request may ask for.
pub const MAX_WINDOW_LENGTH: usize = 5000;

type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Unwrap a JSON body, turning extractor rejections into `400 {"error": ...}`.
fn body<T>(payload: JsonBody<T>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

#[derive(Deserialize, Debug)]
pub struct ArtistSearchBody {
    pub query: String,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct ArtistSearchResponse {
    pub results: Vec<PlatformOutcome>,
}

#[derive(Deserialize, Debug)]
pub struct UrlBody {
    pub url: String,
}

#[derive(Deserialize, Debug)]
pub struct ChannelBody {
    pub username: String,
}

#[derive(Deserialize, Debug)]
pub struct StreamLinksBody {
    pub artist: String,
    pub song: String,
}

#[derive(Deserialize, Debug)]
pub struct SocialBody {
    pub query: String,
}

#[derive(Serialize)]
pub struct SocialResponse {
    pub results: Vec<SocialResult>,
}

#[derive(Deserialize, Debug)]
pub struct DescriptionBody {
    #[serde(flatten)]
    pub song: SongDetails,
    #[serde(default)]
    pub mode: GenerationMode,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

#[derive(Deserialize, Debug)]
pub struct BpmBody {
    pub taps_ms: Vec<u64>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct BpmResponse {
    pub bpm: Option<u32>,
    pub taps: usize,
}

#[derive(Deserialize, Debug)]
pub struct SecondsBody {
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

#[derive(Serialize, Debug)]
pub struct SecondsResponse {
    pub total_seconds: u32,
}

pub async fn search_artists(
    State(finder): State<GuardedArtistFinder>,
    payload: JsonBody<ArtistSearchBody>,
) -> Result<Json<ArtistSearchResponse>, ApiError> {
    let request = body(payload)?;
    let results = finder
        .search(
            &request.query,
            &request.platforms,
            request.limit.unwrap_or(DEFAULT_ARTIST_LIMIT),
        )
        .await?;
    Ok(Json(ArtistSearchResponse { results }))
}

pub async fn get_artwork(
    State(artwork): State<GuardedArtworkService>,
    payload: JsonBody<UrlBody>,
) -> Result<Json<Artwork>, ApiError> {
    let request = body(payload)?;
    Ok(Json(artwork.fetch(&request.url).await?))
}

pub async fn get_isrc(
    State(metadata): State<GuardedMetadataService>,
    payload: JsonBody<UrlBody>,
) -> Result<Json<CodeRecord>, ApiError> {
    let request = body(payload)?;
    Ok(Json(metadata.isrc(&request.url).await?))
}

pub async fn get_upc(
    State(metadata): State<GuardedMetadataService>,
    payload: JsonBody<UrlBody>,
) -> Result<Json<CodeRecord>, ApiError> {
    let request = body(payload)?;
    Ok(Json(metadata.upc(&request.url).await?))
}

pub async fn find_channel(
    State(channels): State<GuardedChannelFinder>,
    payload: JsonBody<ChannelBody>,
) -> Result<Json<ChannelInfo>, ApiError> {
    let request = body(payload)?;
    Ok(Json(channels.find(&request.username).await?))
}

pub async fn generate_stream_links(
    State(stream_links): State<GuardedStreamLinkService>,
    payload: JsonBody<StreamLinksBody>,
) -> Result<Json<StreamLinks>, ApiError> {
    let request = body(payload)?;
    Ok(Json(
        stream_links.generate(&request.artist, &request.song).await?,
    ))
}

pub async fn search_facebook(
    State(social): State<OptionalSocialSearch>,
    payload: JsonBody<SocialBody>,
) -> Result<Json<SocialResponse>, ApiError> {
    let request = body(payload)?;
    let social = social.ok_or_else(social_disabled)?;
    let results = social.facebook(&request.query).await?;
    Ok(Json(SocialResponse { results }))
}

pub async fn search_instagram(
    State(social): State<OptionalSocialSearch>,
    payload: JsonBody<SocialBody>,
) -> Result<Json<SocialResponse>, ApiError> {
    let request = body(payload)?;
    let social = social.ok_or_else(social_disabled)?;
    let results = social.instagram(&request.query).await?;
    Ok(Json(SocialResponse { results }))
}

fn social_disabled() -> ApiError {
    ApiError {
        status: axum::http::StatusCode::NOT_FOUND,
        message: "Social search is not configured".to_string(),
    }
}

pub async fn generate_description(
    State(generator): State<GuardedDescriptionGenerator>,
    payload: JsonBody<DescriptionBody>,
) -> Result<Json<FinalDescription>, ApiError> {
    let request = body(payload)?;
    let default_window = generator.strategy().window;
    let window = match (request.min_length, request.max_length) {
        (None, None) => default_window,
        (min, max) => LengthWindow::new(
            min.unwrap_or(default_window.min),
            max.unwrap_or(default_window.max),
        )?,
    };
    if window.max > MAX_WINDOW_LENGTH {
        return Err(ApiError::bad_request(format!(
            "Maximum length must not exceed {}",
            MAX_WINDOW_LENGTH
        )));
    }

    let description = generator
        .generate_within(&request.song, request.mode, window)
        .await?;
    Ok(Json(description))
}

pub async fn tap_bpm(payload: JsonBody<BpmBody>) -> Result<Json<BpmResponse>, ApiError> {
    let request = body(payload)?;
    let (bpm, taps) = bpm_from_taps(&request.taps_ms)?;
    Ok(Json(BpmResponse { bpm, taps }))
}

pub async fn total_seconds(
    payload: JsonBody<SecondsBody>,
) -> Result<Json<SecondsResponse>, ApiError> {
    let request = body(payload)?;
    Ok(Json(SecondsResponse {
        total_seconds: to_total_seconds(request.minutes, request.seconds)?,
    }))
}
