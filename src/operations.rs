// ABOUTME: Post management operations (show, delete) and settings inspection
// ABOUTME: Queries and removes existing posts on the posts API

use anyhow::Result;
use chrono::{DateTime, Utc};
use is_terminal::IsTerminal;
use serde_json::Value;
use std::io::{self, Write};

use crate::client::{ApiOutcome, PostClient};
use crate::config::{get_config_path, mask_token, Settings};
use crate::publish::display_value;

/// Ask a yes/no question. Non-interactive sessions always answer no.
fn confirm(question: &str) -> Result<bool> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Ok(false);
    }

    print!("{} [y/n]: ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Human-readable view of a single-post reply
pub fn render_post(response: &Value) -> String {
    let data = match ApiOutcome::from_response(response) {
        ApiOutcome::Success { data: Some(data) } => data,
        ApiOutcome::Success { data: None } => return "✗ Post reply carried no data".to_string(),
        ApiOutcome::Failure { message } => {
            return format!("✗ Failed to fetch post: {}", message.unwrap_or("(no message)"))
        }
    };

    let field = |key: &str| data.get(key).filter(|v| !v.is_null());
    let mut out = String::new();

    let title = field("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or("[untitled]");
    out.push_str(title);

    if let Some(id) = field("id") {
        out.push_str(&format!("\n  ID: {}", display_value(id)));
    }
    if let Some(kind) = field("type") {
        out.push_str(&format!("\n  Type: {}", display_value(kind)));
    }
    if let Some(category) = field("category").and_then(Value::as_str).filter(|c| !c.is_empty()) {
        out.push_str(&format!("\n  Category: {}", category));
    }
    if let Some(tags) = field("tags").and_then(Value::as_array).filter(|t| !t.is_empty()) {
        let tags: Vec<String> = tags.iter().map(display_value).collect();
        out.push_str(&format!("\n  Tags: {}", tags.join(", ")));
    }
    if let Some(author) = field("user").and_then(|u| u.get("display_name")).and_then(Value::as_str) {
        out.push_str(&format!("\n  Author: {}", author));
    }
    if let Some(created) = field("created_at").and_then(Value::as_str) {
        out.push_str(&format!("\n  Published: {}", format_timestamp(created)));
    }

    let count = |key: &str| field(key).and_then(Value::as_u64).unwrap_or(0);
    out.push_str(&format!(
        "\n  Views: {}  Likes: {}  Comments: {}",
        count("view_count"),
        count("like_count"),
        count("comment_count")
    ));

    if let Some(content) = field("content").and_then(Value::as_str) {
        out.push_str("\n\n");
        out.push_str(content);
    }

    out
}

pub fn render_delete(response: &Value, id: &str) -> String {
    match ApiOutcome::from_response(response) {
        ApiOutcome::Success { .. } => format!("✓ Post {} deleted successfully", id),
        ApiOutcome::Failure { message } => {
            format!("✗ Delete failed: {}", message.unwrap_or("(no message)"))
        }
    }
}

pub async fn cmd_show(settings: &Settings, id: &str) -> Result<Value> {
    let client = PostClient::from_settings(settings);
    let response = client.fetch(id).await?;
    println!("{}", render_post(&response));
    Ok(response)
}

pub async fn cmd_delete(settings: &Settings, id: &str, assume_yes: bool) -> Result<Option<Value>> {
    if !assume_yes && !confirm(&format!("Delete post {}?", id))? {
        println!("Aborted. Pass --yes to delete without confirmation.");
        return Ok(None);
    }

    let client = PostClient::from_settings(settings);

    println!("Deleting post: {}", id);
    let response = client.delete(id).await?;
    println!("{}", render_delete(&response, id));

    Ok(Some(response))
}

pub fn cmd_config(settings: &Settings) -> Result<()> {
    println!("Resolved settings:");
    println!("  API base: {}", settings.api_base);
    println!("  Posts endpoint: {}", settings.posts_endpoint());
    if settings.uses_default_token() {
        println!("  API token: (placeholder, set API_TOKEN)");
    } else {
        println!("  API token: {}", mask_token(&settings.api_token));
    }
    println!("  Config file: {}", get_config_path()?.display());
    Ok(())
}
