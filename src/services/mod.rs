//! Lookups built on the platform clients.

pub mod artists;
pub mod artwork;
pub mod channel;
pub mod metadata;
pub mod social;
pub mod stream_links;

pub use artists::{ArtistFinder, ArtistResult, Platform, PlatformOutcome, PopularTrack};
pub use artwork::{Artwork, ArtworkImage, ArtworkService};
pub use channel::{ChannelFinder, ChannelInfo};
pub use metadata::{CodeKind, CodeRecord, MetadataService};
pub use social::{SocialResult, SocialSearch};
pub use stream_links::{StreamLink, StreamLinkService, StreamLinks};

use crate::links::LinkError;
use crate::upstream::UpstreamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Reject blank free-text input with `message`.
pub(crate) fn require_text<'a>(value: &'a str, message: &str) -> Result<&'a str, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ServiceError::InvalidInput(message.to_string()))
    } else {
        Ok(trimmed)
    }
}
