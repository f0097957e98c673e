//! Quill CLI - main entry point.
//!
//! - `quill` / `quill chat` - interactive chat with typewriter replies
//! - `quill play` - reveal a text on stdout

use anyhow::Result;
use clap::Parser;

use quill_cli::cli::{Cli, dispatch_command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dispatch_command(cli).await
}
