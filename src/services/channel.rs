//! YouTube channel id lookup.

use super::{require_text, ServiceError};
use crate::upstream::YouTubeClient;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelInfo {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

pub struct ChannelFinder {
    youtube: Arc<YouTubeClient>,
}

impl ChannelFinder {
    pub fn new(youtube: Arc<YouTubeClient>) -> Self {
        Self { youtube }
    }

    /// Resolve a username or handle to its channel.
    pub async fn find(&self, username: &str) -> Result<ChannelInfo, ServiceError> {
        let username = require_text(username, "Please enter a YouTube username")?;
        let not_found = || ServiceError::NotFound("Channel not found".to_string());

        let channel_id = self
            .youtube
            .search_channel(username.trim_start_matches('@'))
            .await?
            .ok_or_else(not_found)?;
        let channel = self.youtube.channel(&channel_id).await?.ok_or_else(not_found)?;

        Ok(ChannelInfo {
            url: format!("https://www.youtube.com/channel/{}", channel.id),
            id: channel.id,
            title: channel.title,
            image_url: channel.thumbnail_url,
        })
    }
}
