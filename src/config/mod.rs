mod file_config;

pub use file_config::{CredentialsConfig, DescriptionConfig, FileConfig, UpstreamConfig};

use crate::description::{LengthWindow, ShortTextPolicy, MAX_ATTEMPTS_LIMIT};
use crate::llm::{DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL};
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_ITUNES_URL: &str = "https://itunes.apple.com";
pub const DEFAULT_YOUTUBE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_FACEBOOK_GRAPH_URL: &str = "https://graph.facebook.com/v18.0";

/// A required credential was not configured.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing credential: set {env} or credentials.{key} in the config file")]
    MissingCredential {
        env: &'static str,
        key: &'static str,
    },
}

/// Secrets for the third-party APIs.
///
/// Blank values count as missing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub youtube_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub facebook_app_id: Option<String>,
    pub facebook_app_secret: Option<String>,
}

impl Credentials {
    fn merge(file: CredentialsConfig, cli: &Credentials) -> Self {
        fn pick(file: Option<String>, cli: &Option<String>) -> Option<String> {
            file.or_else(|| cli.clone())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        }

        Self {
            spotify_client_id: pick(file.spotify_client_id, &cli.spotify_client_id),
            spotify_client_secret: pick(file.spotify_client_secret, &cli.spotify_client_secret),
            youtube_api_key: pick(file.youtube_api_key, &cli.youtube_api_key),
            openrouter_api_key: pick(file.openrouter_api_key, &cli.openrouter_api_key),
            facebook_app_id: pick(file.facebook_app_id, &cli.facebook_app_id),
            facebook_app_secret: pick(file.facebook_app_secret, &cli.facebook_app_secret),
        }
    }

    /// Spotify client id and secret.
    pub fn spotify(&self) -> Result<(&str, &str), ConfigError> {
        let id = required(
            &self.spotify_client_id,
            "SPOTIFY_CLIENT_ID",
            "spotify_client_id",
        )?;
        let secret = required(
            &self.spotify_client_secret,
            "SPOTIFY_CLIENT_SECRET",
            "spotify_client_secret",
        )?;
        Ok((id, secret))
    }

    pub fn youtube_api_key(&self) -> Result<&str, ConfigError> {
        required(&self.youtube_api_key, "YOUTUBE_API_KEY", "youtube_api_key")
    }

    pub fn openrouter_api_key(&self) -> Result<&str, ConfigError> {
        required(
            &self.openrouter_api_key,
            "OPENROUTER_API_KEY",
            "openrouter_api_key",
        )
    }

    /// Facebook app id and secret, if both are set. Facebook is optional.
    pub fn facebook(&self) -> Option<(&str, &str)> {
        match (&self.facebook_app_id, &self.facebook_app_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

fn required<'a>(
    value: &'a Option<String>,
    env: &'static str,
    key: &'static str,
) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingCredential { env, key })
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            if value.is_some() {
                "<set>"
            } else {
                "<unset>"
            }
        }

        f.debug_struct("Credentials")
            .field("spotify_client_id", &redact(&self.spotify_client_id))
            .field("spotify_client_secret", &redact(&self.spotify_client_secret))
            .field("youtube_api_key", &redact(&self.youtube_api_key))
            .field("openrouter_api_key", &redact(&self.openrouter_api_key))
            .field("facebook_app_id", &redact(&self.facebook_app_id))
            .field("facebook_app_secret", &redact(&self.facebook_app_secret))
            .finish()
    }
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub upstream_timeout_sec: u64,
    pub credentials: Credentials,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub upstream_timeout_sec: u64,

    pub credentials: Credentials,
    pub upstream: UpstreamUrls,
    pub description: DescriptionSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamUrls {
    pub spotify_api: String,
    pub spotify_accounts: String,
    pub itunes: String,
    pub youtube: String,
    pub facebook_graph: String,
    pub openrouter: String,
}

impl Default for UpstreamUrls {
    fn default() -> Self {
        Self {
            spotify_api: DEFAULT_SPOTIFY_API_URL.to_string(),
            spotify_accounts: DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string(),
            itunes: DEFAULT_ITUNES_URL.to_string(),
            youtube: DEFAULT_YOUTUBE_URL.to_string(),
            facebook_graph: DEFAULT_FACEBOOK_GRAPH_URL.to_string(),
            openrouter: DEFAULT_OPENROUTER_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionSettings {
    pub window: LengthWindow,
    pub max_attempts: u32,
    pub short_text: ShortTextPolicy,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_sec: u64,
}

impl Default for DescriptionSettings {
    fn default() -> Self {
        Self {
            window: LengthWindow::default(),
            max_attempts: 3,
            short_text: ShortTextPolicy::default(),
            model: DEFAULT_OPENROUTER_MODEL.to_string(),
            temperature: 0.85,
            max_tokens: 400,
            timeout_sec: 60,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port == metrics_port && port != 0 {
            bail!("port and metrics_port must differ, both are {}", port);
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or(cli.logging_level);

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let upstream_timeout_sec = file
            .upstream_timeout_sec
            .unwrap_or(cli.upstream_timeout_sec);
        if upstream_timeout_sec == 0 {
            bail!("upstream_timeout_sec must be greater than zero");
        }

        let credentials =
            Credentials::merge(file.credentials.unwrap_or_default(), &cli.credentials);

        let up_file = file.upstream.unwrap_or_default();
        let defaults = UpstreamUrls::default();
        let upstream = UpstreamUrls {
            spotify_api: up_file.spotify_api_url.unwrap_or(defaults.spotify_api),
            spotify_accounts: up_file
                .spotify_accounts_url
                .unwrap_or(defaults.spotify_accounts),
            itunes: up_file.itunes_url.unwrap_or(defaults.itunes),
            youtube: up_file.youtube_url.unwrap_or(defaults.youtube),
            facebook_graph: up_file
                .facebook_graph_url
                .unwrap_or(defaults.facebook_graph),
            openrouter: up_file.openrouter_url.unwrap_or(defaults.openrouter),
        };

        let description = resolve_description(file.description.unwrap_or_default())?;

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
            upstream_timeout_sec,
            credentials,
            upstream,
            description,
        })
    }
}

fn resolve_description(file: DescriptionConfig) -> Result<DescriptionSettings> {
    let defaults = DescriptionSettings::default();

    let min = file.min_length.unwrap_or(defaults.window.min);
    let max = file.max_length.unwrap_or(defaults.window.max);
    let window = match LengthWindow::new(min, max) {
        Ok(window) => window,
        Err(e) => bail!("Invalid description window: {}", e),
    };

    let max_attempts = file.max_attempts.unwrap_or(defaults.max_attempts);
    if max_attempts == 0 || max_attempts > MAX_ATTEMPTS_LIMIT {
        bail!(
            "description.max_attempts must be between 1 and {}, got {}",
            MAX_ATTEMPTS_LIMIT,
            max_attempts
        );
    }

    let temperature = file.temperature.unwrap_or(defaults.temperature);
    if !(0.0..=2.0).contains(&temperature) {
        bail!(
            "description.temperature must be between 0.0 and 2.0, got {}",
            temperature
        );
    }

    Ok(DescriptionSettings {
        window,
        max_attempts,
        short_text: file.short_text.unwrap_or(defaults.short_text),
        model: file.model.unwrap_or(defaults.model),
        temperature,
        max_tokens: file.max_tokens.unwrap_or(defaults.max_tokens),
        timeout_sec: file.timeout_sec.unwrap_or(defaults.timeout_sec),
    })
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
