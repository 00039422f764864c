//! AniList GraphQL client.

use super::query::MEDIA_LIST_QUERY;
use super::types::*;
use crate::error::{ExportError, Result};
use reqwest::Client;
use serde_json::json;
use shared::config::AniListConfig;
use shared::MediaType;
use std::time::Duration;
use tracing::{debug, info, warn};

/// AniList GraphQL client
pub struct AniListClient {
    /// HTTP client
    client: Client,
    /// GraphQL endpoint
    api_url: String,
}

impl AniListClient {
    /// Create a new AniList client
    pub fn new(api_url: String, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, api_url })
    }

    /// Create a client from the `[anilist]` config section
    pub fn from_config(config: &AniListConfig) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_seconds),
            &config.user_agent,
        )
    }

    /// Fetch every list of `media_type` for `username`
    pub async fn fetch_list(
        &self,
        username: &str,
        media_type: MediaType,
    ) -> Result<MediaListCollection> {
        info!(username = %username, media_type = %media_type, "Fetching media list");

        let body = json!({
            "query": MEDIA_LIST_QUERY,
            "variables": {
                "username": username,
                "type": media_type.as_str(),
            },
        });

        let response = self.client.post(&self.api_url).json(&body).send().await?;
        let status = response.status();
        debug!(url = %self.api_url, status = %status, "AniList responded");

        // GraphQL errors come with 4xx statuses, so the body is decoded
        // regardless of the status code.
        let response: GraphQlResponse<MediaListData> = response.json().await?;
        let collection = into_collection(response)?;

        info!(
            username = %username,
            media_type = %media_type,
            lists = collection.lists.len(),
            "Fetched media list"
        );

        Ok(collection)
    }
}

/// Turn a decoded response into a collection or a classified error
pub fn into_collection(response: GraphQlResponse<MediaListData>) -> Result<MediaListCollection> {
    if let Some(error) = response.errors.into_iter().next() {
        warn!(message = %error.message, status = ?error.status, "AniList returned an error");
        return Err(classify_error(error.message));
    }

    response
        .data
        .and_then(|data| data.media_list_collection)
        .ok_or_else(|| ExportError::InvalidResponse("missing MediaListCollection".to_string()))
}

/// Map an AniList error message onto the error taxonomy.
///
/// AniList only reports plain-text messages; anything mentioning the user is a
/// lookup failure, everything else is blamed on the media type variable.
pub fn classify_error(message: String) -> ExportError {
    if message.contains("User") {
        ExportError::UserNotFound(message)
    } else {
        ExportError::InvalidMediaType(message)
    }
}
