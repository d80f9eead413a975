// ABOUTME: HTTP client for the posts API
// ABOUTME: Builds publish requests, sends them with bearer auth, and reads JSON replies

use anyhow::{anyhow, Context, Result};
use reqwest::{header, Client as HttpClient, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{Settings, DEFAULT_CATEGORY};

/// Post types accepted by the posts API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// Long-form post with a title
    #[default]
    Timeline,
    /// Short-form post
    Bubble,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishRequest {
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<u64>,
}

impl PublishRequest {
    /// Timeline post with tags defaulting to empty and the default category
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Option<Vec<String>>,
        category: Option<&str>,
    ) -> Self {
        Self {
            kind: PostKind::Timeline,
            title: title.into(),
            content: content.into(),
            tags: tags.unwrap_or_default(),
            category: category.unwrap_or(DEFAULT_CATEGORY).to_string(),
            mood_tag: None,
            board_id: None,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize request")
    }
}

/// How the API answered, read from the `success` convention.
///
/// Nothing here is validated: a missing or non-boolean `success` reads as failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApiOutcome<'a> {
    Success { data: Option<&'a Value> },
    Failure { message: Option<&'a str> },
}

impl<'a> ApiOutcome<'a> {
    pub fn from_response(response: &'a Value) -> Self {
        if response.get("success").and_then(Value::as_bool).unwrap_or(false) {
            ApiOutcome::Success {
                data: response.get("data"),
            }
        } else {
            ApiOutcome::Failure {
                message: response.get("message").and_then(Value::as_str),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success { .. })
    }
}

pub struct PostClient {
    http_client: HttpClient,
    base_url: String,
    token: String,
}

impl PostClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base.clone(), settings.api_token.clone())
    }

    pub fn posts_endpoint(&self) -> String {
        format!("{}/api/posts", self.base_url)
    }

    fn post_url(&self, id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.posts_endpoint())
            .with_context(|| format!("Invalid API base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base URL cannot carry a path: {}", self.base_url))?
            .push(id);
        Ok(url)
    }

    /// Send a publish request and return the reply body as-is
    pub async fn publish(&self, request: &PublishRequest) -> Result<Value> {
        let json = request.to_json()?;
        let endpoint = self.posts_endpoint();
        info!(%endpoint, kind = ?request.kind, "publishing post");

        let response = self
            .http_client
            .post(&endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .body(json)
            .send()
            .await
            .context("Failed to send request")?;

        read_json(response).await
    }

    /// Fetch a single post. The route is public, so no token is sent.
    pub async fn fetch(&self, id: &str) -> Result<Value> {
        let url = self.post_url(id)?;
        info!(%url, "fetching post");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .context("Failed to fetch post")?;

        read_json(response).await
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        let url = self.post_url(id)?;
        info!(%url, "deleting post");

        let response = self
            .http_client
            .delete(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await
            .context("Failed to send delete request")?;

        read_json(response).await
    }
}

/// Parse the body as JSON whatever the status; status and `success` are separate signals
async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    debug!(%status, "received response");
    if !status.is_success() {
        warn!(%status, "posts API returned a non-success status");
    }

    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    serde_json::from_str(&body)
        .with_context(|| format!("Failed to parse response as JSON (HTTP {})", status))
}
