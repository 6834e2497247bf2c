//! YouTube Data API v3 client.

use super::{base_url, fetch_json, UpstreamError};
use crate::config::{ConfigError, Credentials, UpstreamUrls};
use serde::Deserialize;

const SERVICE: &str = "youtube";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YouTubeChannel {
    pub id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YouTubeVideo {
    pub video_id: String,
    pub title: String,
}

#[derive(Deserialize, Default)]
struct Thumbnail {
    url: String,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    default: Option<Thumbnail>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Snippet {
    title: String,
    channel_id: Option<String>,
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct SearchId {
    channel_id: Option<String>,
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: SearchId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Deserialize)]
struct ChannelItem {
    id: String,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(
        http: reqwest::Client,
        urls: &UpstreamUrls,
        credentials: &Credentials,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            http,
            base_url: base_url(&urls.youtube),
            api_key: credentials.youtube_api_key()?.to_string(),
        })
    }

    async fn search(&self, query: &str, kind: &str) -> Result<Option<SearchItem>, UpstreamError> {
        let request = self.http.get(format!("{}/search", self.base_url)).query(&[
            ("part", "snippet"),
            ("type", kind),
            ("q", query),
            ("key", self.api_key.as_str()),
        ]);
        let response: ListResponse<SearchItem> = fetch_json(SERVICE, request).await?;
        Ok(response.items.into_iter().next())
    }

    /// Id of the first channel matching `query`.
    pub async fn search_channel(&self, query: &str) -> Result<Option<String>, UpstreamError> {
        Ok(self
            .search(query, "channel")
            .await?
            .and_then(|item| item.id.channel_id.or(item.snippet.channel_id)))
    }

    pub async fn channel(&self, id: &str) -> Result<Option<YouTubeChannel>, UpstreamError> {
        let request = self.http.get(format!("{}/channels", self.base_url)).query(&[
            ("part", "snippet"),
            ("id", id),
            ("key", self.api_key.as_str()),
        ]);
        let response: ListResponse<ChannelItem> = fetch_json(SERVICE, request).await?;
        Ok(response.items.into_iter().next().map(|item| YouTubeChannel {
            id: item.id,
            title: item.snippet.title,
            thumbnail_url: item.snippet.thumbnails.default.map(|t| t.url),
        }))
    }

    pub async fn search_video(&self, query: &str) -> Result<Option<YouTubeVideo>, UpstreamError> {
        Ok(self.search(query, "video").await?.and_then(|item| {
            item.id.video_id.map(|video_id| YouTubeVideo {
                video_id,
                title: item.snippet.title,
            })
        }))
    }
}
