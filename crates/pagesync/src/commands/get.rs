//! `pagesync get` command implementation.

use std::path::PathBuf;

use clap::Args;
use pagesync_config::CliSettings;
use pagesync_editor::{Command, DocumentSession, GetScope, Panel};

use super::{GlobalArgs, Session};
use crate::error::CliError;
use crate::runner;
use crate::terminal::TerminalHost;

/// Arguments for the get command.
#[derive(Args)]
pub(crate) struct GetArgs {
    /// Space to search (default: `confluence.default_space_key`).
    #[arg(long, conflicts_with_all = ["ask_space", "all_spaces"])]
    space: Option<String>,

    /// Ask for the space even when a default is configured.
    #[arg(long, conflicts_with = "all_spaces")]
    ask_space: bool,

    /// Search every space.
    #[arg(long)]
    all_spaces: bool,

    /// Title to search for; asked when omitted.
    #[arg(short, long)]
    title: Option<String>,

    /// Directory to save the page into.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Keep the storage body as fetched instead of re-indenting it.
    #[arg(long)]
    raw: bool,
}

impl GetArgs {
    /// Execute the get command.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let Session {
            mut controller,
            settings,
        } = Session::load(global, &self.cli_settings(global))?;

        let scope = self.scope();
        let mut host = TerminalHost::new(self.output_dir);
        if let Some(title) = self.title {
            host.preset(Panel::PageTitle, title);
        }

        let mut doc = DocumentSession::default();
        runner::run(&mut controller, Command::Get(scope), settings, &mut doc, &mut host);
        host.finish()
    }

    /// Global overrides plus `--space` and `--raw`.
    fn cli_settings(&self, global: &GlobalArgs) -> CliSettings {
        let mut settings = global.cli_settings();
        settings.default_space_key.clone_from(&self.space);
        if self.raw {
            settings.pretty_print = Some(false);
        }
        settings
    }

    fn scope(&self) -> GetScope {
        if self.all_spaces {
            GetScope::AllSpaces
        } else if self.ask_space {
            GetScope::AskSpace
        } else {
            GetScope::DefaultSpace
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        global: GlobalArgs,
        #[command(flatten)]
        args: GetArgs,
    }

    fn parse(argv: &[&str]) -> TestCli {
        TestCli::try_parse_from(std::iter::once("get").chain(argv.iter().copied())).unwrap()
    }

    fn scope(argv: &[&str]) -> GetScope {
        parse(argv).args.scope()
    }

    #[test]
    fn test_scope_from_flags() {
        assert_eq!(scope(&[]), GetScope::DefaultSpace);
        assert_eq!(scope(&["--ask-space"]), GetScope::AskSpace);
        assert_eq!(scope(&["--space", "OPS"]), GetScope::DefaultSpace);
        assert_eq!(scope(&["--all-spaces"]), GetScope::AllSpaces);
    }

    #[test]
    fn test_space_overrides_default_space_key() {
        let cli = parse(&["--space", "OPS", "--raw"]);
        let settings = cli.args.cli_settings(&cli.global);
        assert_eq!(settings.default_space_key.as_deref(), Some("OPS"));
        assert_eq!(settings.pretty_print, Some(false));

        let cli = parse(&[]);
        let settings = cli.args.cli_settings(&cli.global);
        assert_eq!(settings.default_space_key, None);
        assert_eq!(settings.pretty_print, None);
    }

    #[test]
    fn test_space_conflicts_with_all_spaces() {
        let result = TestCli::try_parse_from(["get", "--space", "OPS", "--all-spaces"]);
        assert!(result.is_err());
    }
}
