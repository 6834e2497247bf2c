use axum::extract::FromRef;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::AppConfig;
use crate::description::{DescriptionGenerator, GenerationStrategy};
use crate::llm::{LlmProvider, OpenRouterProvider};
use crate::services::{
    ArtistFinder, ArtworkService, ChannelFinder, MetadataService, SocialSearch, StreamLinkService,
};
use crate::upstream::{build_http_client, FacebookClient, ItunesClient, SpotifyClient, YouTubeClient};

use super::ServerConfig;

pub type GuardedArtistFinder = Arc<ArtistFinder>;
pub type GuardedArtworkService = Arc<ArtworkService>;
pub type GuardedMetadataService = Arc<MetadataService>;
pub type GuardedChannelFinder = Arc<ChannelFinder>;
pub type GuardedStreamLinkService = Arc<StreamLinkService>;
pub type OptionalSocialSearch = Option<Arc<SocialSearch>>;
pub type GuardedDescriptionGenerator = Arc<DescriptionGenerator>;

/// Every lookup the HTTP surface exposes.
#[derive(Clone)]
pub struct Services {
    pub artists: GuardedArtistFinder,
    pub artwork: GuardedArtworkService,
    pub metadata: GuardedMetadataService,
    pub channels: GuardedChannelFinder,
    pub stream_links: GuardedStreamLinkService,
    pub social: OptionalSocialSearch,
    pub descriptions: GuardedDescriptionGenerator,
}

impl Services {
    /// Build the platform clients and services.
    ///
    /// Missing required credentials fail here, at startup. Facebook is
    /// optional and simply leaves `social` empty.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = build_http_client(Duration::from_secs(config.upstream_timeout_sec))
            .context("Failed to create HTTP client")?;
        let credentials = &config.credentials;
        let urls = &config.upstream;

        let spotify = Arc::new(SpotifyClient::new(http.clone(), urls, credentials)?);
        let itunes = Arc::new(ItunesClient::new(http.clone(), urls));
        let youtube = Arc::new(YouTubeClient::new(http.clone(), urls, credentials)?);

        let social = match credentials.facebook() {
            Some((app_id, app_secret)) => {
                let facebook = FacebookClient::new(http, urls, app_id, app_secret);
                Some(Arc::new(SocialSearch::new(Arc::new(facebook))))
            }
            None => {
                info!("Facebook credentials not configured, social search disabled");
                None
            }
        };

        let provider: Arc<dyn LlmProvider> = Arc::new(OpenRouterProvider::new(
            urls.openrouter.as_str(),
            config.description.model.as_str(),
            credentials,
        )?);
        let descriptions = DescriptionGenerator::new(
            provider,
            GenerationStrategy::from(&config.description),
        );

        Ok(Services {
            artists: Arc::new(ArtistFinder::new(spotify.clone(), itunes.clone())),
            artwork: Arc::new(ArtworkService::new(spotify.clone(), itunes)),
            metadata: Arc::new(MetadataService::new(spotify.clone())),
            channels: Arc::new(ChannelFinder::new(youtube.clone())),
            stream_links: Arc::new(StreamLinkService::new(spotify, youtube)),
            social,
            descriptions: Arc::new(descriptions),
        })
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub hash: String,
    pub services: Services,
}

impl ServerState {
    pub fn new(config: ServerConfig, services: Services) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            hash: env!("GIT_HASH").to_owned(),
            services,
        }
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for GuardedArtistFinder {
    fn from_ref(input: &ServerState) -> Self {
        input.services.artists.clone()
    }
}

impl FromRef<ServerState> for GuardedArtworkService {
    fn from_ref(input: &ServerState) -> Self {
        input.services.artwork.clone()
    }
}

impl FromRef<ServerState> for GuardedMetadataService {
    fn from_ref(input: &ServerState) -> Self {
        input.services.metadata.clone()
    }
}

impl FromRef<ServerState> for GuardedChannelFinder {
    fn from_ref(input: &ServerState) -> Self {
        input.services.channels.clone()
    }
}

impl FromRef<ServerState> for GuardedStreamLinkService {
    fn from_ref(input: &ServerState) -> Self {
        input.services.stream_links.clone()
    }
}

impl FromRef<ServerState> for OptionalSocialSearch {
    fn from_ref(input: &ServerState) -> Self {
        input.services.social.clone()
    }
}

impl FromRef<ServerState> for GuardedDescriptionGenerator {
    fn from_ref(input: &ServerState) -> Self {
        input.services.descriptions.clone()
    }
}
