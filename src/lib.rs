// ABOUTME: Main library file for the postpub CLI
// ABOUTME: Exports all public modules and types

pub mod config;
pub mod client;
pub mod logging;
pub mod operations;
pub mod post_file;
pub mod publish;

pub use anyhow::{Result, Error};
pub use publish::publish;
