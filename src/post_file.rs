// ABOUTME: Markdown post files with YAML frontmatter
// ABOUTME: Parses a local file into the fields of a publish request

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::client::PostKind;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PostMetadata {
    #[serde(rename = "type")]
    pub kind: Option<PostKind>,
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub mood_tag: Option<String>,
    pub board_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostFile {
    pub metadata: PostMetadata,
    pub content: String,
}

impl PostFile {
    /// Parse a post from a string (YAML frontmatter + content).
    ///
    /// Both delimiters must be lines of exactly `---`.
    pub fn from_string(source: &str) -> Result<Self> {
        let mut lines = source.trim_start().lines();

        if lines.next().map(str::trim_end) != Some("---") {
            anyhow::bail!("Invalid post file: missing opening frontmatter delimiter");
        }

        let mut frontmatter = Vec::new();
        let mut closed = false;
        for line in lines.by_ref() {
            if line.trim_end() == "---" {
                closed = true;
                break;
            }
            frontmatter.push(line);
        }

        if !closed {
            anyhow::bail!("Invalid post file: missing closing frontmatter delimiter");
        }

        let frontmatter = frontmatter.join("\n");
        let content = lines.collect::<Vec<_>>().join("\n").trim().to_string();

        let metadata: PostMetadata = if frontmatter.trim().is_empty() {
            PostMetadata::default()
        } else {
            serde_yaml::from_str(&frontmatter).context("Failed to parse frontmatter")?
        };

        Ok(Self { metadata, content })
    }

    /// Load a post from file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read post file {}", path.display()))?;
        Self::from_string(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter_and_body() {
        let source = "---\ntitle: Morning swim\ntype: bubble\ntags:\n  - sea\n  - daily\ncategory: notes\nboard_id: 3\n---\n\n## Tide\n\nCold water today.\n";
        let post = PostFile::from_string(source).unwrap();

        assert_eq!(post.metadata.title.as_deref(), Some("Morning swim"));
        assert_eq!(post.metadata.kind, Some(PostKind::Bubble));
        assert_eq!(post.metadata.tags, vec!["sea", "daily"]);
        assert_eq!(post.metadata.category.as_deref(), Some("notes"));
        assert_eq!(post.metadata.board_id, Some(3));
        assert_eq!(post.content, "## Tide\n\nCold water today.");
    }

    #[test]
    fn test_horizontal_rule_stays_in_body() {
        let post = PostFile::from_string("---\ntitle: T\n---\nabove\n\n---\n\nbelow").unwrap();
        assert_eq!(post.content, "above\n\n---\n\nbelow");
    }

    #[test]
    fn test_dashes_inside_a_value_are_not_a_delimiter() {
        let source = "---\ntitle: Part one --- part two\ncategory: notes\n---\nBody text\n";
        let post = PostFile::from_string(source).unwrap();

        assert_eq!(post.metadata.title.as_deref(), Some("Part one --- part two"));
        assert_eq!(post.metadata.category.as_deref(), Some("notes"));
        assert_eq!(post.content, "Body text");
    }

    #[test]
    fn test_unclosed_frontmatter_is_an_error() {
        let err = PostFile::from_string("---\ntitle: T\nBody").unwrap_err();
        assert!(err.to_string().contains("closing frontmatter delimiter"));
    }

    #[test]
    fn test_missing_frontmatter_is_an_error() {
        assert!(PostFile::from_string("just text").is_err());
    }
}
