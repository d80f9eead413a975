// ABOUTME: Main entry point for the postpub CLI
// ABOUTME: Parses commands and dispatches to appropriate handlers

use clap::{Parser, Subcommand};
use postpub::client::PostKind;
use postpub::config::{Overrides, Settings};
use postpub::publish::PublishArgs;
use postpub::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postpub")]
#[command(about = "Publish timeline posts to a posts API", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the posts API (overrides API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Bearer token (overrides API_TOKEN)
    #[arg(long, global = true)]
    api_token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a post
    Publish {
        /// Post title
        #[arg(short, long)]
        title: Option<String>,
        /// Post content (Markdown)
        #[arg(short, long)]
        content: Option<String>,
        /// Markdown file with YAML frontmatter
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Category (default: 日常)
        #[arg(long)]
        category: Option<String>,
        /// Mood tag
        #[arg(long)]
        mood_tag: Option<String>,
        /// Board to post into
        #[arg(long)]
        board_id: Option<u64>,
        /// Post type (default: timeline)
        #[arg(long, value_enum)]
        kind: Option<PostKind>,
    },
    /// Show a published post
    Show {
        /// Post ID
        id: String,
    },
    /// Delete a post
    Delete {
        /// Post ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the resolved API settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    postpub::logging::init_tracing(cli.verbose)?;

    let overrides = Overrides {
        api_base: cli.api_base,
        api_token: cli.api_token,
    };
    let settings = Settings::load_with(&overrides)?;

    // Without a command, publish the built-in example post
    let Some(command) = cli.command else {
        postpub::publish::cmd_example(&settings).await?;
        return Ok(());
    };

    match command {
        Commands::Publish {
            title,
            content,
            file,
            tags,
            category,
            mood_tag,
            board_id,
            kind,
        } => {
            let args = PublishArgs {
                title,
                content,
                file,
                tags,
                category,
                mood_tag,
                board_id,
                kind,
            };
            postpub::publish::cmd_publish(&settings, args).await?;
            Ok(())
        }
        Commands::Show { id } => {
            postpub::operations::cmd_show(&settings, &id).await?;
            Ok(())
        }
        Commands::Delete { id, yes } => {
            postpub::operations::cmd_delete(&settings, &id, yes).await?;
            Ok(())
        }
        Commands::Config => postpub::operations::cmd_config(&settings),
    }
}
