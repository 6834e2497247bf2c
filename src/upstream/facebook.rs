//! Facebook Graph API client, also used to probe Instagram profiles.

use super::{base_url, fetch_json, UpstreamError};
use crate::config::UpstreamUrls;
use crate::server::metrics;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

const SERVICE: &str = "facebook";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookPage {
    pub id: String,
    pub name: String,
    pub picture_url: Option<String>,
    pub fan_count: Option<u64>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookUser {
    pub id: String,
    pub name: String,
    pub picture_url: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct PictureData {
    url: Option<String>,
}

#[derive(Deserialize)]
struct Picture {
    data: Option<PictureData>,
}

impl Picture {
    fn into_url(self) -> Option<String> {
        self.data.and_then(|d| d.url)
    }
}

#[derive(Deserialize)]
struct GraphEntry {
    id: String,
    name: String,
    picture: Option<Picture>,
    fan_count: Option<u64>,
    is_verified: Option<bool>,
}

#[derive(Deserialize)]
struct GraphList {
    #[serde(default)]
    data: Vec<GraphEntry>,
}

pub struct FacebookClient {
    http: reqwest::Client,
    graph_url: String,
    app_id: String,
    app_secret: String,
    token: Mutex<Option<String>>,
}

impl FacebookClient {
    pub fn new(http: reqwest::Client, urls: &UpstreamUrls, app_id: &str, app_secret: &str) -> Self {
        Self {
            http,
            graph_url: base_url(&urls.facebook_graph),
            app_id: app_id.to_string(),
            app_secret: app_secret.to_string(),
            token: Mutex::new(None),
        }
    }

    /// App access token. These do not expire, so the first one is kept.
    async fn access_token(&self) -> Result<String, UpstreamError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }
        let request = self
            .http
            .get(format!("{}/oauth/access_token", self.graph_url))
            .query(&[
                ("client_id", self.app_id.as_str()),
                ("client_secret", self.app_secret.as_str()),
                ("grant_type", "client_credentials"),
            ]);
        let response: TokenResponse = fetch_json(SERVICE, request).await?;
        *cached = Some(response.access_token.clone());
        Ok(response.access_token)
    }

    async fn search(&self, path: &str, query: &str, fields: &str) -> Result<Vec<GraphEntry>, UpstreamError> {
        let token = self.access_token().await?;
        let request = self
            .http
            .get(format!("{}/{}", self.graph_url, path))
            .query(&[
                ("q", query),
                ("fields", fields),
                ("access_token", token.as_str()),
            ]);
        let list: GraphList = fetch_json(SERVICE, request).await?;
        Ok(list.data)
    }

    pub async fn search_pages(&self, query: &str) -> Result<Vec<FacebookPage>, UpstreamError> {
        let entries = self
            .search("pages/search", query, "id,name,picture,fan_count,is_verified")
            .await?;
        Ok(entries
            .into_iter()
            .map(|e| FacebookPage {
                id: e.id,
                name: e.name,
                picture_url: e.picture.and_then(Picture::into_url),
                fan_count: e.fan_count,
                is_verified: e.is_verified,
            })
            .collect())
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<FacebookUser>, UpstreamError> {
        let entries = self.search("users/search", query, "id,name,picture").await?;
        Ok(entries
            .into_iter()
            .map(|e| FacebookUser {
                id: e.id,
                name: e.name,
                picture_url: e.picture.and_then(Picture::into_url),
            })
            .collect())
    }

    /// Whether the oEmbed endpoint recognises `profile_url`.
    ///
    /// A non-success status means "no such profile"; only transport and
    /// token failures are errors.
    pub async fn instagram_profile_exists(&self, profile_url: &str) -> Result<bool, UpstreamError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(format!("{}/instagram_oembed", self.graph_url))
            .query(&[("url", profile_url), ("access_token", token.as_str())])
            .send()
            .await
            .map_err(|e| {
                metrics::record_upstream_request(SERVICE, "transport");
                UpstreamError::Transport {
                    service: SERVICE,
                    message: e.to_string(),
                }
            })?;

        let found = response.status().is_success();
        debug!("Instagram oEmbed probe for {}: {}", profile_url, response.status());
        metrics::record_upstream_request(SERVICE, if found { "ok" } else { "status" });
        Ok(found)
    }
}
