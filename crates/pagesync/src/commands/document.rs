//! Commands operating on a document file.

use std::path::{Path, PathBuf};

use clap::Args;
use pagesync_editor::Command;

use super::{GlobalArgs, Session};
use crate::error::CliError;
use crate::runner;
use crate::store;
use crate::terminal::TerminalHost;

/// Arguments for post, update, delete and history.
#[derive(Args)]
pub(crate) struct DocumentArgs {
    /// Path to the document.
    file: PathBuf,
}

impl DocumentArgs {
    /// Run `command` on the document and save its settings.
    pub(crate) fn execute(self, command: Command, global: &GlobalArgs) -> Result<(), CliError> {
        let Session {
            mut controller,
            settings,
        } = Session::load(global, &global.cli_settings())?;

        let mut doc = store::load(&self.file, global.syntax.as_deref())?;
        let dir = self
            .file
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let mut host = TerminalHost::new(dir);

        runner::run(&mut controller, command, settings, &mut doc, &mut host);

        store::save_settings(&self.file, &doc)?;
        host.finish()
    }
}
