// ABOUTME: Post publishing functionality
// ABOUTME: Builds publish requests from arguments or files, sends them, and summarizes the reply

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use tracing::warn;

use crate::client::{ApiOutcome, PostClient, PostKind, PublishRequest};
use crate::config::Settings;
use crate::post_file::PostFile;

const EXAMPLE_TITLE: &str = "#日常 A morning at the tide pools";
const EXAMPLE_CONTENT: &str = "## Getting started

This morning I helped a visitor who had lost the trail back from the tide pools.

## Working it out

We matched the shoreline against the old map and followed the marker posts north.

## Wrapping up

They made it back before the tide turned, and the walk felt worth every step.";

/// Publish a timeline post using `API_BASE` and `API_TOKEN` as they are right now
pub async fn publish(
    title: &str,
    content: &str,
    tags: Option<Vec<String>>,
    category: Option<&str>,
) -> Result<Value> {
    let settings = Settings::from_env()?;
    let request = PublishRequest::new(title, content, tags, category);
    publish_with(&settings, &request).await
}

pub async fn publish_with(settings: &Settings, request: &PublishRequest) -> Result<Value> {
    if settings.uses_default_token() {
        warn!("API_TOKEN is not set; sending the placeholder token");
    }
    PostClient::from_settings(settings).publish(request).await
}

/// The post the binary publishes when run without a subcommand
pub fn example_request() -> PublishRequest {
    PublishRequest::new(
        EXAMPLE_TITLE,
        EXAMPLE_CONTENT,
        Some(vec!["service-log".to_string(), "warmth".to_string()]),
        None,
    )
}

/// Human-readable summary of a publish reply.
///
/// The API only echoes `id` on create, so `submitted_title` stands in for a missing `data.title`.
pub fn render_outcome(response: &Value, submitted_title: &str) -> String {
    match ApiOutcome::from_response(response) {
        ApiOutcome::Success { data } => {
            let id = data
                .and_then(|d| d.get("id"))
                .map(display_value)
                .unwrap_or_else(|| "(unknown)".to_string());
            let title = data
                .and_then(|d| d.get("title"))
                .and_then(Value::as_str)
                .unwrap_or(submitted_title);

            let mut out = String::from("✓ Post published successfully!\n");
            out.push_str(&format!("  ID: {}\n", id));
            out.push_str(&format!("  Title: {}", title));

            if let Some(shells) = data.and_then(|d| d.get("shells_earned")) {
                out.push_str(&format!("\n  Shells earned: {}", display_value(shells)));
            }
            if let Some(score) = data.and_then(|d| d.get("score_earned")) {
                out.push_str(&format!("\n  Score earned: {}", display_value(score)));
            }
            out
        }
        ApiOutcome::Failure { message } => {
            format!("✗ Publish failed: {}", message.unwrap_or("(no message)"))
        }
    }
}

/// Strings print bare, everything else as JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Publish arguments as given on the command line
#[derive(Debug, Default, Clone)]
pub struct PublishArgs {
    pub title: Option<String>,
    pub content: Option<String>,
    pub file: Option<PathBuf>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub mood_tag: Option<String>,
    pub board_id: Option<u64>,
    pub kind: Option<PostKind>,
}

/// Merge a post file (if any) with flags; flags win
pub fn build_request(args: PublishArgs) -> Result<PublishRequest> {
    let post = match &args.file {
        Some(path) => Some(PostFile::load(path)?),
        None => None,
    };
    let (metadata, file_content) = match post {
        Some(post) => (post.metadata, Some(post.content)),
        None => Default::default(),
    };

    let title = args
        .title
        .or(metadata.title)
        .context("No title given. Pass --title or set `title` in the post file")?;
    let content = args
        .content
        .or(file_content)
        .context("No content given. Pass --content or --file")?;
    let tags = if args.tags.is_empty() {
        metadata.tags
    } else {
        args.tags
    };
    let category = args.category.or(metadata.category);

    let mut request = PublishRequest::new(title, content, Some(tags), category.as_deref());
    request.kind = args.kind.or(metadata.kind).unwrap_or_default();
    request.mood_tag = args.mood_tag.or(metadata.mood_tag);
    request.board_id = args.board_id.or(metadata.board_id);
    Ok(request)
}

pub async fn cmd_publish(settings: &Settings, args: PublishArgs) -> Result<Value> {
    let request = build_request(args)?;

    println!("Publishing to {}...", settings.api_base);
    let response = publish_with(settings, &request).await?;
    println!("{}", render_outcome(&response, &request.title));

    Ok(response)
}

pub async fn cmd_example(settings: &Settings) -> Result<Value> {
    let request = example_request();
    let response = publish_with(settings, &request).await?;
    println!("{}", render_outcome(&response, &request.title));
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_success() {
        let out = render_outcome(&json!({"success": true, "data": {"id": 1, "title": "T"}}), "x");
        assert!(out.starts_with("✓"));
        assert!(out.contains("ID: 1"));
        assert!(out.contains("Title: T"));
    }

    #[test]
    fn test_render_failure() {
        let out = render_outcome(&json!({"success": false, "message": "bad token"}), "x");
        assert_eq!(out, "✗ Publish failed: bad token");
    }

    #[test]
    fn test_build_request_from_flags() {
        let request = build_request(PublishArgs {
            title: Some("Hello".to_string()),
            content: Some("World".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(request, PublishRequest::new("Hello", "World", None, None));
    }

    #[test]
    fn test_build_request_requires_title() {
        let err = build_request(PublishArgs {
            content: Some("World".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("No title given"));
    }
}
