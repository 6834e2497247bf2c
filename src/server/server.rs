use anyhow::Result;
use std::time::Duration;

use tower_http::services::ServeDir;
use tracing::info;

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::metrics::run_metrics_server;
use super::routes::*;
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub social_enabled: bool,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        social_enabled: state.services.social.is_some(),
    };
    Json(stats)
}

pub fn make_app(config: ServerConfig, services: Services) -> Router {
    let state = ServerState::new(config.clone(), services);

    let lookup_routes: Router = Router::new()
        .route("/artists/search", post(search_artists))
        .route("/artwork", post(get_artwork))
        .route("/metadata/isrc", post(get_isrc))
        .route("/metadata/upc", post(get_upc))
        .route("/youtube/channel", post(find_channel))
        .route("/stream-links", post(generate_stream_links))
        .with_state(state.clone());

    let generation_routes: Router = Router::new()
        .route("/descriptions", post(generate_description))
        .with_state(state.clone());

    let tool_routes: Router = Router::new()
        .route("/bpm", post(tap_bpm))
        .route("/seconds", post(total_seconds));

    let mut api_routes = lookup_routes.merge(generation_routes).nest("/tools", tool_routes);

    if state.services.social.is_some() {
        let social_routes: Router = Router::new()
            .route("/facebook", post(search_facebook))
            .route("/instagram", post(search_instagram))
            .with_state(state.clone());
        api_routes = api_routes.nest("/social", social_routes);
    }

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/v1", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(config: ServerConfig, services: Services, metrics_port: u16) -> Result<()> {
    let port = config.port;
    let app = make_app(config, services);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Ready to serve at port {}!", port);

    tokio::select! {
        result = axum::serve(listener, app) => result?,
        result = run_metrics_server(metrics_port) => result?,
    }
    Ok(())
}
