//! Content Lookup client.
//!
//! The content service owns threads and comments. It is asked for a preview
//! when an admin reviews a report and for removal when a report is resolved.

use std::{sync::Arc, time::Duration};

use config::{Config, file::ContentServiceConfig};
use error_stack::{Result, ResultExt};
use model::{ContentLookup, ContentPreview, ContentRef, ContentRemoval, ContentType};
use reqwest::StatusCode;
use simple_backend_utils::ContextExt;
use tracing::{info, warn};
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum ContentServiceError {
    #[error("HTTP client creation failed")]
    ClientInit,
    #[error("Base URL can not have path segments")]
    InvalidBaseUrl,
    #[error("Content service is unavailable")]
    Unavailable,
    #[error("Content service response is invalid")]
    InvalidResponse,
}

#[async_trait::async_trait]
pub trait ContentService: Send + Sync {
    async fn fetch_content(&self, content: ContentRef)
    -> Result<ContentLookup, ContentServiceError>;

    async fn remove_content(
        &self,
        content: ContentRef,
    ) -> Result<ContentRemoval, ContentServiceError>;
}

/// Create content service client from config. If the content service is not
/// configured, lookups and removals are skipped.
pub fn content_service_from_config(
    config: &Config,
) -> Result<Arc<dyn ContentService>, ContentServiceError> {
    match config.content_service() {
        Some(content_config) => {
            info!("Content service: {}", content_config.base_url);
            Ok(Arc::new(HttpContentService::new(content_config)?))
        }
        None => {
            info!("Content service is not configured");
            Ok(Arc::new(DisabledContentService))
        }
    }
}

/// Content service client using JSON over HTTP.
///
/// - GET `{base_url}/threads/{id}` or `{base_url}/comments/{id}` returns
///   `{ "title": string | null, "body": string }` or 404.
/// - DELETE to the same path removes the content. 404 means that
///   the content is already removed.
pub struct HttpContentService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpContentService {
    pub fn new(config: &ContentServiceConfig) -> Result<Self, ContentServiceError> {
        if config.base_url.cannot_be_a_base() {
            return Err(ContentServiceError::InvalidBaseUrl.report())
                .attach_printable(config.base_url.to_string());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds()))
            .build()
            .change_context(ContentServiceError::ClientInit)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn content_url(&self, content: ContentRef) -> Result<Url, ContentServiceError> {
        let collection = match content.content_type {
            ContentType::Thread => "threads",
            ContentType::Comment => "comments",
        };

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ContentServiceError::InvalidBaseUrl.report())?
            .pop_if_empty()
            .push(collection)
            .push(&content.content_id.to_string());
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ContentService for HttpContentService {
    async fn fetch_content(
        &self,
        content: ContentRef,
    ) -> Result<ContentLookup, ContentServiceError> {
        let url = self.content_url(content)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .change_context(ContentServiceError::Unavailable)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(ContentLookup::NotFound),
            status if status.is_success() => {
                let preview: ContentPreview = response
                    .json()
                    .await
                    .change_context(ContentServiceError::InvalidResponse)?;
                Ok(ContentLookup::Found(preview))
            }
            status => Err(ContentServiceError::Unavailable.report())
                .attach_printable(format!("status: {}", status)),
        }
    }

    async fn remove_content(
        &self,
        content: ContentRef,
    ) -> Result<ContentRemoval, ContentServiceError> {
        let url = self.content_url(content)?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .change_context(ContentServiceError::Unavailable)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(ContentRemoval::AlreadyRemoved),
            status if status.is_success() => Ok(ContentRemoval::Removed),
            status => Err(ContentServiceError::Unavailable.report())
                .attach_printable(format!("status: {}", status)),
        }
    }
}

/// Used when the content service URL is not configured.
pub struct DisabledContentService;

#[async_trait::async_trait]
impl ContentService for DisabledContentService {
    async fn fetch_content(
        &self,
        _content: ContentRef,
    ) -> Result<ContentLookup, ContentServiceError> {
        Ok(ContentLookup::Unknown)
    }

    async fn remove_content(
        &self,
        content: ContentRef,
    ) -> Result<ContentRemoval, ContentServiceError> {
        warn!(
            "Content removal skipped, content service is not configured: {:?}",
            content
        );
        Ok(ContentRemoval::Skipped)
    }
}
