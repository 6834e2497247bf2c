//! Facebook and Instagram profile search.

use super::{require_text, ServiceError};
use crate::upstream::FacebookClient;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

const PAGE_SCORE: f64 = 1.0;
const PROFILE_SCORE: f64 = 0.8;
const PAGES_SEARCH_SCORE: f64 = 0.5;
const PEOPLE_SEARCH_SCORE: f64 = 0.4;
const INSTAGRAM_PROFILE_SCORE: f64 = 1.0;
const INSTAGRAM_SEARCH_SCORE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialResult {
    pub id: String,
    pub name: String,
    pub search_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_url: Option<String>,
    pub relevance_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl SocialResult {
    fn search_link(id: String, name: String, search_url: String, relevance_score: f64) -> Self {
        Self {
            id,
            name,
            search_url,
            direct_url: None,
            relevance_score,
            profile_picture: None,
            followers: None,
            verified: None,
        }
    }
}

pub struct SocialSearch {
    facebook: Arc<FacebookClient>,
}

impl SocialSearch {
    pub fn new(facebook: Arc<FacebookClient>) -> Self {
        Self { facebook }
    }

    /// Pages and personal profiles, searched concurrently.
    ///
    /// When neither search yields anything, links to Facebook's own search
    /// pages are returned instead.
    pub async fn facebook(&self, query: &str) -> Result<Vec<SocialResult>, ServiceError> {
        let query = require_text(query, "Please enter an artist name")?;

        let (pages, users) = tokio::join!(
            self.facebook.search_pages(query),
            self.facebook.search_users(query)
        );
        let pages = pages.unwrap_or_else(|e| {
            warn!("Facebook page search failed: {}", e);
            Vec::new()
        });
        let users = users.unwrap_or_else(|e| {
            warn!("Facebook profile search failed: {}", e);
            Vec::new()
        });

        let mut results: Vec<SocialResult> = pages
            .into_iter()
            .map(|page| {
                let url = format!("https://www.facebook.com/{}", page.id);
                SocialResult {
                    id: format!("facebook-page-{}", page.id),
                    name: page.name,
                    search_url: url.clone(),
                    direct_url: Some(url),
                    relevance_score: PAGE_SCORE,
                    profile_picture: page.picture_url,
                    followers: page.fan_count,
                    verified: page.is_verified,
                }
            })
            .collect();
        results.extend(users.into_iter().map(|user| {
            let url = format!("https://www.facebook.com/{}", user.id);
            SocialResult {
                id: format!("facebook-profile-{}", user.id),
                name: user.name,
                search_url: url.clone(),
                direct_url: Some(url),
                relevance_score: PROFILE_SCORE,
                profile_picture: user.picture_url,
                followers: None,
                verified: None,
            }
        }));

        if results.is_empty() {
            results = facebook_search_links(query);
        }
        Ok(results)
    }

    /// The profile itself when the oEmbed probe recognises it, a search link otherwise.
    pub async fn instagram(&self, query: &str) -> Result<Vec<SocialResult>, ServiceError> {
        let query = require_text(query, "Please enter an artist name")?;
        let encoded = urlencoding::encode(query);
        let profile_url = format!("https://www.instagram.com/{}", encoded);

        let exists = self
            .facebook
            .instagram_profile_exists(&profile_url)
            .await
            .unwrap_or_else(|e| {
                warn!("Instagram profile probe failed: {}", e);
                false
            });

        let id = format!("instagram-{}", query);
        if exists {
            let direct = format!("{}/", profile_url);
            Ok(vec![SocialResult {
                direct_url: Some(direct.clone()),
                ..SocialResult::search_link(id, query.to_string(), direct, INSTAGRAM_PROFILE_SCORE)
            }])
        } else {
            Ok(vec![SocialResult::search_link(
                id,
                query.to_string(),
                format!("https://www.instagram.com/explore/search/keyword/?q={}", encoded),
                INSTAGRAM_SEARCH_SCORE,
            )])
        }
    }
}

fn facebook_search_links(query: &str) -> Vec<SocialResult> {
    let encoded = urlencoding::encode(query);
    vec![
        SocialResult::search_link(
            format!("facebook-pages-{}", query),
            format!("{} (Pages)", query),
            format!("https://www.facebook.com/search/pages?q={}", encoded),
            PAGES_SEARCH_SCORE,
        ),
        SocialResult::search_link(
            format!("facebook-people-{}", query),
            format!("{} (People)", query),
            format!("https://www.facebook.com/search/people?q={}", encoded),
            PEOPLE_SEARCH_SCORE,
        ),
    ]
}
