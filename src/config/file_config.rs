use crate::description::ShortTextPolicy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,
    pub upstream_timeout_sec: Option<u64>,

    pub credentials: Option<CredentialsConfig>,
    pub upstream: Option<UpstreamConfig>,
    pub description: Option<DescriptionConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct CredentialsConfig {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub youtube_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub facebook_app_id: Option<String>,
    pub facebook_app_secret: Option<String>,
}

/// Base URLs of the third-party APIs, mostly useful to point at a local fake.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct UpstreamConfig {
    pub spotify_api_url: Option<String>,
    pub spotify_accounts_url: Option<String>,
    pub itunes_url: Option<String>,
    pub youtube_url: Option<String>,
    pub facebook_graph_url: Option<String>,
    pub openrouter_url: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct DescriptionConfig {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub max_attempts: Option<u32>,
    pub short_text: Option<ShortTextPolicy>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_sec: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
