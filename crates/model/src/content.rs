use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{ContentType, ReportId};

/// Reference to a thread or a comment.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema, PartialEq, Eq, Hash)]
pub struct ContentRef {
    pub content_type: ContentType,
    pub content_id: i64,
}

/// Content fetched from the content service for admin review.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct ContentPreview {
    pub title: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub enum ContentLookupState {
    /// Content exists and preview is available.
    Available,
    /// Content service reported that the content does not exist anymore.
    Deleted,
    /// Content service is not configured.
    Unknown,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct ReportedContent {
    pub report: ReportId,
    pub content: ContentRef,
    pub state: ContentLookupState,
    pub preview: Option<ContentPreview>,
}

/// Result of a content lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLookup {
    Found(ContentPreview),
    NotFound,
    /// Lookups are disabled.
    Unknown,
}

impl ContentLookup {
    pub fn into_reported_content(self, report: ReportId, content: ContentRef) -> ReportedContent {
        let (state, preview) = match self {
            Self::Found(preview) => (ContentLookupState::Available, Some(preview)),
            Self::NotFound => (ContentLookupState::Deleted, None),
            Self::Unknown => (ContentLookupState::Unknown, None),
        };
        ReportedContent {
            report,
            content,
            state,
            preview,
        }
    }
}

/// Result of a content removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRemoval {
    Removed,
    AlreadyRemoved,
    /// Removal requests are disabled.
    Skipped,
}
