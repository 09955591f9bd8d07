//! pagesync CLI - Confluence page sync.
//!
//! Provides commands for:
//! - `post`: Create a page from a document with a page header
//! - `get`: Search pages by title and save one as HTML
//! - `update`: Push a document to its page
//! - `delete`: Delete the page a document is attached to
//! - `history`: Show the edit history of an attached page

mod commands;
mod error;
mod output;
mod runner;
mod store;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::{GlobalArgs, PageCommand};
use output::Output;

/// pagesync - Edit Confluence pages as local documents.
#[derive(Parser)]
#[command(name = "pagesync", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: PageCommand,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = cli.command.execute(&cli.global) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
