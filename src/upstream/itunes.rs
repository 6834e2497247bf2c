//! iTunes Search API client, used for Apple Music lookups. No credentials.

use super::{base_url, fetch_json, UpstreamError};
use crate::config::UpstreamUrls;
use serde::Deserialize;

const SERVICE: &str = "itunes";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesArtist {
    pub artist_id: u64,
    pub artist_name: String,
}

/// A lookup result, either the looked-up entity itself or one of its children.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItunesItem {
    pub wrapper_type: Option<String>,
    pub artist_name: Option<String>,
    pub collection_name: Option<String>,
    pub track_name: Option<String>,
    pub artwork_url100: Option<String>,
}

impl ItunesItem {
    pub fn is_collection(&self) -> bool {
        self.wrapper_type.as_deref() == Some("collection")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesResults<T> {
    #[serde(default)]
    pub result_count: u64,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

pub struct ItunesClient {
    http: reqwest::Client,
    base_url: String,
}

impl ItunesClient {
    pub fn new(http: reqwest::Client, urls: &UpstreamUrls) -> Self {
        Self {
            http,
            base_url: base_url(&urls.itunes),
        }
    }

    pub async fn search_artists(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<ItunesResults<ItunesArtist>, UpstreamError> {
        let request = self.http.get(format!("{}/search", self.base_url)).query(&[
            ("term", term.to_string()),
            ("entity", "musicArtist".to_string()),
            ("attribute", "artistTerm".to_string()),
            ("limit", limit.to_string()),
        ]);
        fetch_json(SERVICE, request).await
    }

    /// Look up an id, optionally asking for related entities of kind `entity`.
    pub async fn lookup(
        &self,
        id: &str,
        entity: &str,
        limit: Option<u32>,
    ) -> Result<Vec<ItunesItem>, UpstreamError> {
        let mut query = vec![("id", id.to_string()), ("entity", entity.to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let request = self
            .http
            .get(format!("{}/lookup", self.base_url))
            .query(&query);
        let response: ItunesResults<ItunesItem> = fetch_json(SERVICE, request).await?;
        Ok(response.results)
    }
}

/// Replace the `100x100bb` size marker of an artwork URL.
pub fn resize_artwork(artwork_url100: &str, size: u32) -> String {
    artwork_url100.replace("100x100bb", &format!("{size}x{size}bb"))
}
