//! Fake third-party APIs for end-to-end tests
//!
//! A single axum server emulates the Spotify accounts and Web APIs, the
//! iTunes Search API, YouTube Data v3, the Facebook Graph API and OpenRouter,
//! each under its own path prefix. It answers with the payloads in
//! fixtures.rs, checks the credentials from constants.rs and records the
//! calls tests want to assert on.

use super::constants::*;
use super::fixtures;
use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

type Params = Query<HashMap<String, String>>;

/// What the fake OpenRouter answers to the next chat completion.
#[derive(Debug, Clone)]
pub enum CompletionReply {
    Text(String),
    Status(u16),
}

#[derive(Default)]
struct UpstreamLog {
    spotify_token_requests: AtomicUsize,
    facebook_token_requests: AtomicUsize,
    completion_replies: Mutex<VecDeque<CompletionReply>>,
    completion_prompts: Mutex<Vec<String>>,
}

type SharedLog = Arc<UpstreamLog>;

/// Handle to a running fake upstream.
///
/// When dropped, the server shuts down.
pub struct FakeUpstream {
    pub base_url: String,
    log: SharedLog,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl FakeUpstream {
    pub async fn spawn() -> Self {
        let log = SharedLog::default();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let port = listener
            .local_addr()
            .expect("Failed to get fake upstream address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let app = router(log.clone());
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Fake upstream failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            log,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn spotify_api_url(&self) -> String {
        format!("{}/spotify/v1", self.base_url)
    }

    pub fn spotify_accounts_url(&self) -> String {
        format!("{}/spotify/accounts", self.base_url)
    }

    pub fn itunes_url(&self) -> String {
        format!("{}/itunes", self.base_url)
    }

    pub fn youtube_url(&self) -> String {
        format!("{}/youtube/v3", self.base_url)
    }

    pub fn facebook_graph_url(&self) -> String {
        format!("{}/graph", self.base_url)
    }

    /// Given with a trailing slash, the way it often ends up in config files.
    pub fn openrouter_url(&self) -> String {
        format!("{}/openrouter/", self.base_url)
    }

    /// Queue answers for the next chat completions. Once the queue is empty
    /// every completion fails with 503.
    pub fn queue_completions(&self, replies: impl IntoIterator<Item = CompletionReply>) {
        self.log
            .completion_replies
            .lock()
            .unwrap()
            .extend(replies);
    }

    /// User prompts of all chat completions received so far.
    pub fn completion_prompts(&self) -> Vec<String> {
        self.log.completion_prompts.lock().unwrap().clone()
    }

    pub fn spotify_token_requests(&self) -> usize {
        self.log.spotify_token_requests.load(Ordering::SeqCst)
    }

    pub fn facebook_token_requests(&self) -> usize {
        self.log.facebook_token_requests.load(Ordering::SeqCst)
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn router(log: SharedLog) -> Router {
    let spotify = Router::new()
        .route("/accounts/api/token", post(spotify_token))
        .route("/v1/search", get(spotify_search))
        .route("/v1/artists/{id}/top-tracks", get(spotify_top_tracks))
        .route("/v1/tracks/{id}", get(spotify_track))
        .route("/v1/albums/{id}", get(spotify_album))
        .route("/v1/playlists/{id}", get(spotify_playlist));

    let itunes = Router::new()
        .route("/search", get(itunes_search))
        .route("/lookup", get(itunes_lookup));

    let youtube = Router::new()
        .route("/v3/search", get(youtube_search))
        .route("/v3/channels", get(youtube_channels));

    let graph = Router::new()
        .route("/oauth/access_token", get(graph_token))
        .route("/pages/search", get(graph_pages_search))
        .route("/users/search", get(graph_users_search))
        .route("/instagram_oembed", get(instagram_oembed));

    let openrouter = Router::new().route("/chat/completions", post(chat_completions));

    Router::new()
        .nest("/spotify", spotify)
        .nest("/itunes", itunes)
        .nest("/youtube", youtube)
        .nest("/graph", graph)
        .nest("/openrouter", openrouter)
        .with_state(log)
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or_default()
}

fn has_bearer(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {}", token))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": { "status": 401, "message": "Invalid access token" } })),
    )
        .into_response()
}

fn json_ok(body: Value) -> Response {
    Json(body).into_response()
}

// ============================================================================
// Spotify
// ============================================================================

async fn spotify_token(State(log): State<SharedLog>, headers: HeaderMap, body: String) -> Response {
    let basic = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("Basic "))
        .unwrap_or(false);
    if !basic || !body.contains("grant_type=client_credentials") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_client" })),
        )
            .into_response();
    }
    log.spotify_token_requests.fetch_add(1, Ordering::SeqCst);
    json_ok(json!({
        "access_token": SPOTIFY_ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600,
    }))
}

async fn spotify_search(headers: HeaderMap, Query(params): Params) -> Response {
    if !has_bearer(&headers, SPOTIFY_ACCESS_TOKEN) {
        return unauthorized();
    }
    let q = param(&params, "q");
    match param(&params, "type") {
        "artist" if q.contains(UNKNOWN_ARTIST_QUERY) => json_ok(fixtures::spotify_empty_artist_page()),
        "artist" => json_ok(fixtures::spotify_artist_page()),
        "track" if q.contains(SONG_TITLE) => json_ok(fixtures::spotify_track_page(vec![
            fixtures::spotify_track(TRACK_ID, true),
        ])),
        "track" => json_ok(fixtures::spotify_track_page(vec![])),
        _ => (StatusCode::BAD_REQUEST, Json(json!({ "error": "unsupported type" }))).into_response(),
    }
}

async fn spotify_top_tracks(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !has_bearer(&headers, SPOTIFY_ACCESS_TOKEN) {
        return unauthorized();
    }
    match id.as_str() {
        EXACT_ARTIST_ID => json_ok(fixtures::spotify_top_tracks()),
        DISTANT_ARTIST_ID => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => json_ok(json!({ "tracks": [] })),
    }
}

async fn spotify_track(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !has_bearer(&headers, SPOTIFY_ACCESS_TOKEN) {
        return unauthorized();
    }
    match id.as_str() {
        TRACK_ID => json_ok(fixtures::spotify_track(TRACK_ID, true)),
        TRACK_WITHOUT_ISRC_ID => json_ok(fixtures::spotify_track(TRACK_WITHOUT_ISRC_ID, false)),
        _ => (StatusCode::NOT_FOUND, Json(fixtures::spotify_not_found())).into_response(),
    }
}

async fn spotify_album(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !has_bearer(&headers, SPOTIFY_ACCESS_TOKEN) {
        return unauthorized();
    }
    if id == ALBUM_ID {
        json_ok(fixtures::spotify_album())
    } else {
        (StatusCode::NOT_FOUND, Json(fixtures::spotify_not_found())).into_response()
    }
}

async fn spotify_playlist(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !has_bearer(&headers, SPOTIFY_ACCESS_TOKEN) {
        return unauthorized();
    }
    if id == PLAYLIST_ID {
        json_ok(fixtures::spotify_playlist())
    } else {
        (StatusCode::NOT_FOUND, Json(fixtures::spotify_not_found())).into_response()
    }
}

// ============================================================================
// iTunes
// ============================================================================

async fn itunes_search(Query(params): Params) -> Response {
    if param(&params, "entity") != "musicArtist" {
        return json_ok(fixtures::itunes_results(vec![]));
    }
    match param(&params, "term") {
        UNKNOWN_ARTIST_QUERY => json_ok(fixtures::itunes_results(vec![])),
        FLAKY_ARTIST_QUERY => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => json_ok(fixtures::itunes_artists()),
    }
}

async fn itunes_lookup(Query(params): Params) -> Response {
    let id: u64 = param(&params, "id").parse().unwrap_or_default();
    let body = match (id, param(&params, "entity")) {
        (APPLE_ARTIST_ID, "album") => fixtures::itunes_artist_albums(),
        (APPLE_ALBUM_ID, "album") => fixtures::itunes_album(),
        (APPLE_SONG_ID, "song") => fixtures::itunes_song(),
        _ => fixtures::itunes_results(vec![]),
    };
    json_ok(body)
}

// ============================================================================
// YouTube
// ============================================================================

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": { "code": 403, "message": "API key not valid" } })),
    )
        .into_response()
}

async fn youtube_search(Query(params): Params) -> Response {
    if param(&params, "key") != YOUTUBE_API_KEY {
        return forbidden();
    }
    let q = param(&params, "q");
    let items = match param(&params, "type") {
        "channel" if q == CHANNEL_HANDLE => vec![fixtures::youtube_channel_hit()],
        "video" if q.contains(SONG_TITLE) => vec![fixtures::youtube_video_hit()],
        _ => vec![],
    };
    json_ok(fixtures::youtube_items(items))
}

async fn youtube_channels(Query(params): Params) -> Response {
    if param(&params, "key") != YOUTUBE_API_KEY {
        return forbidden();
    }
    let items = if param(&params, "id") == CHANNEL_ID {
        vec![fixtures::youtube_channel()]
    } else {
        vec![]
    };
    json_ok(fixtures::youtube_items(items))
}

// ============================================================================
// Facebook Graph
// ============================================================================

fn graph_token_ok(params: &HashMap<String, String>) -> bool {
    param(params, "access_token") == FACEBOOK_ACCESS_TOKEN
}

fn graph_error() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": { "message": "Invalid OAuth access token", "code": 190 } })),
    )
        .into_response()
}

async fn graph_token(State(log): State<SharedLog>, Query(params): Params) -> Response {
    if param(&params, "client_id") != FACEBOOK_APP_ID
        || param(&params, "client_secret") != FACEBOOK_APP_SECRET
    {
        return graph_error();
    }
    log.facebook_token_requests.fetch_add(1, Ordering::SeqCst);
    json_ok(json!({ "access_token": FACEBOOK_ACCESS_TOKEN, "token_type": "bearer" }))
}

async fn graph_pages_search(Query(params): Params) -> Response {
    if !graph_token_ok(&params) {
        return graph_error();
    }
    if param(&params, "q") == ARTIST_QUERY {
        json_ok(fixtures::facebook_pages())
    } else {
        json_ok(fixtures::facebook_empty())
    }
}

async fn graph_users_search(Query(params): Params) -> Response {
    if !graph_token_ok(&params) {
        return graph_error();
    }
    if param(&params, "q") == ARTIST_QUERY {
        json_ok(fixtures::facebook_users())
    } else {
        json_ok(fixtures::facebook_empty())
    }
}

async fn instagram_oembed(Query(params): Params) -> Response {
    if !graph_token_ok(&params) {
        return graph_error();
    }
    if param(&params, "url") == format!("https://www.instagram.com/{}", INSTAGRAM_HANDLE) {
        json_ok(json!({ "author_name": INSTAGRAM_HANDLE, "provider_name": "Instagram" }))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": "No media found", "code": 24 } })),
        )
            .into_response()
    }
}

// ============================================================================
// OpenRouter
// ============================================================================

async fn chat_completions(
    State(log): State<SharedLog>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> Response {
    if !has_bearer(&headers, OPENROUTER_API_KEY) {
        return unauthorized();
    }

    let prompt = request["messages"]
        .as_array()
        .and_then(|messages| messages.iter().rev().find(|m| m["role"] == "user"))
        .and_then(|message| message["content"].as_str())
        .unwrap_or_default()
        .to_string();
    log.completion_prompts.lock().unwrap().push(prompt);

    let reply = log.completion_replies.lock().unwrap().pop_front();
    match reply {
        Some(CompletionReply::Text(text)) => json_ok(fixtures::chat_completion(&text)),
        Some(CompletionReply::Status(status)) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(json!({ "error": { "message": "scripted failure" } }))).into_response()
        }
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": { "message": "no completion queued" } })),
        )
            .into_response(),
    }
}
