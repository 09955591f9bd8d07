//! CLI command implementations.

mod document;
mod get;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use pagesync_config::{CliSettings, Config};
use pagesync_confluence::ClientOptions;
use pagesync_editor::{CommandSettings, ConfluenceConnector, ViewController};

use crate::error::CliError;

pub(crate) use document::DocumentArgs;
pub(crate) use get::GetArgs;

/// Options shared by all commands.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover pagesync.toml).
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Confluence REST API root, e.g. `https://wiki.example.com/rest/api` (overrides config).
    #[arg(long, global = true, env = "PAGESYNC_BASE_URI")]
    pub(crate) base_uri: Option<String>,

    /// Confluence username (overrides config).
    #[arg(short, long, global = true, env = "PAGESYNC_USERNAME")]
    pub(crate) username: Option<String>,

    /// Document syntax, e.g. `Markdown` (default: from the file extension).
    #[arg(long, global = true)]
    pub(crate) syntax: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

impl GlobalArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            base_uri: self.base_uri.clone(),
            username: self.username.clone(),
            ..Default::default()
        }
    }
}

/// Page commands.
#[derive(Subcommand)]
pub(crate) enum PageCommand {
    /// Create a page from a document with a Space / Ancestor Title / Title header.
    Post(DocumentArgs),
    /// Search pages by title and save the chosen one as HTML.
    Get(GetArgs),
    /// Push a document to its page.
    Update(DocumentArgs),
    /// Delete the page a document is attached to.
    Delete(DocumentArgs),
    /// Show the edit history of the page a document is attached to.
    History(DocumentArgs),
}

impl PageCommand {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the command fails.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        use pagesync_editor::Command;

        match self {
            Self::Post(args) => args.execute(Command::Post, global),
            Self::Get(args) => args.execute(global),
            Self::Update(args) => args.execute(Command::Update, global),
            Self::Delete(args) => args.execute(Command::Delete, global),
            Self::History(args) => args.execute(Command::History, global),
        }
    }
}

/// Configured controller and settings for one command.
struct Session {
    controller: ViewController,
    settings: CommandSettings,
}

impl Session {
    fn load(global: &GlobalArgs, cli_settings: &CliSettings) -> Result<Self, CliError> {
        let config = Config::load(global.config.as_deref(), Some(cli_settings))?;
        let base_uri = config.confluence.require_base_uri()?.to_owned();

        let connector = ConfluenceConnector {
            options: ClientOptions {
                verify_tls: config.confluence.verify_tls,
            },
        };
        let settings = CommandSettings {
            base_uri,
            username: config.confluence.username,
            password: config.confluence.password,
            default_space_key: config.confluence.default_space_key,
            rst_command: config.markup.rst_command,
            pretty_print: config.markup.pretty_print,
        };

        Ok(Self {
            controller: ViewController::new(connector),
            settings,
        })
    }
}
