//! Terminal editor host.
//!
//! Input panels become `inquire` prompts, quick panels become selection
//! lists and new documents are written to an output directory. The password
//! panel reads raw keys and reports every change so the controller can
//! redraw it masked.

use std::collections::HashMap;
use std::path::PathBuf;

use cli_clipboard::{ClipboardContext, ClipboardProvider};
use console::{Key, Term};
use inquire::{Select, Text};
use pagesync_editor::{EditorHost, NewDocument, Panel, UiEvent};
use tracing::{debug, warn};

use crate::error::CliError;
use crate::output::Output;
use crate::store;

struct OpenPanel {
    panel: Panel,
    caption: String,
    text: String,
}

/// [`EditorHost`] on a terminal.
pub(crate) struct TerminalHost {
    output: Output,
    term: Term,
    output_dir: PathBuf,
    presets: HashMap<Panel, String>,
    panel: Option<OpenPanel>,
    quick_panel: Option<Vec<String>>,
    written: Vec<PathBuf>,
    error: Option<String>,
    cancelled: bool,
}

impl TerminalHost {
    /// Create a host writing fetched pages into `output_dir`.
    pub(crate) fn new(output_dir: PathBuf) -> Self {
        Self {
            output: Output::new(),
            term: Term::stderr(),
            output_dir,
            presets: HashMap::new(),
            panel: None,
            quick_panel: None,
            written: Vec::new(),
            error: None,
            cancelled: false,
        }
    }

    /// Answer the next `panel` prompt with `value` without asking.
    pub(crate) fn preset(&mut self, panel: Panel, value: String) {
        self.presets.insert(panel, value);
    }

    /// Collect the user's answer to the open panel, if any.
    pub(crate) fn next_event(&mut self) -> Option<UiEvent> {
        if let Some(items) = self.quick_panel.take() {
            return Some(self.select(items));
        }

        let panel = self.panel.as_ref()?.panel;
        if let Some(value) = self.presets.remove(&panel) {
            self.panel = None;
            return Some(UiEvent::InputDone { panel, value });
        }
        if panel == Panel::Password {
            return Some(self.read_password_key());
        }

        let open = self.panel.take()?;
        let answer = Text::new(&open.caption)
            .with_initial_value(&open.text)
            .prompt();
        Some(match answer {
            Ok(value) => UiEvent::InputDone { panel, value },
            Err(e) => {
                debug!("Prompt closed: {e}");
                self.cancelled = true;
                UiEvent::Cancelled
            }
        })
    }

    /// Files written for fetched pages.
    #[cfg(test)]
    pub(crate) fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Outcome of the command.
    pub(crate) fn finish(self) -> Result<(), CliError> {
        if let Some(message) = self.error {
            return Err(CliError::Command(message));
        }
        if self.cancelled {
            return Err(CliError::Cancelled);
        }
        Ok(())
    }

    fn select(&mut self, items: Vec<String>) -> UiEvent {
        match Select::new("Page:", items).raw_prompt() {
            Ok(choice) => UiEvent::QuickPanelDone(Some(choice.index)),
            Err(e) => {
                debug!("Selection closed: {e}");
                self.cancelled = true;
                UiEvent::QuickPanelDone(None)
            }
        }
    }

    /// Read one key of the password panel.
    fn read_password_key(&mut self) -> UiEvent {
        let Some(open) = self.panel.as_mut() else {
            return UiEvent::Cancelled;
        };
        let key = self
            .term
            .clear_line()
            .and_then(|()| self.term.write_str(&format!("{} {}", open.caption, open.text)))
            .and_then(|()| self.term.read_key());

        let key = match key {
            Ok(key) => key,
            Err(e) => {
                debug!("Can not read password: {e}");
                Key::Escape
            }
        };

        match key {
            Key::Enter => {
                let value = std::mem::take(&mut open.text);
                self.close_password_panel();
                UiEvent::InputDone {
                    panel: Panel::Password,
                    value,
                }
            }
            Key::Escape | Key::CtrlC => {
                self.close_password_panel();
                self.cancelled = true;
                UiEvent::Cancelled
            }
            Key::Backspace => {
                open.text.pop();
                UiEvent::InputChanged {
                    panel: Panel::Password,
                    value: open.text.clone(),
                }
            }
            Key::Char(c) if !c.is_control() => {
                open.text.push(c);
                UiEvent::InputChanged {
                    panel: Panel::Password,
                    value: open.text.clone(),
                }
            }
            _ => UiEvent::InputChanged {
                panel: Panel::Password,
                value: open.text.clone(),
            },
        }
    }

    fn close_password_panel(&mut self) {
        self.panel = None;
        let _ = self.term.write_line("");
    }
}

impl EditorHost for TerminalHost {
    fn status_message(&mut self, message: &str) {
        self.output.info(message);
    }

    fn error_message(&mut self, message: &str) {
        self.error = Some(message.to_owned());
    }

    fn set_clipboard(&mut self, text: &str) {
        let copied = ClipboardContext::new().and_then(|mut ctx| ctx.set_contents(text.to_owned()));
        if let Err(e) = copied {
            warn!("Can not set clipboard: {e}");
        }
        self.output.highlight(text);
    }

    fn show_input_panel(&mut self, panel: Panel, caption: &str, initial_text: &str) {
        self.panel = Some(OpenPanel {
            panel,
            caption: caption.to_owned(),
            text: initial_text.to_owned(),
        });
    }

    fn hide_panel(&mut self) {
        self.panel = None;
    }

    fn show_quick_panel(&mut self, items: &[String]) {
        self.quick_panel = Some(items.to_vec());
    }

    fn open_document(&mut self, document: NewDocument) {
        let title = document.name.clone();
        match store::write_new(&self.output_dir, document) {
            Ok(path) => {
                self.output
                    .success(&format!("Saved \"{title}\" to {}", path.display()));
                self.written.push(path);
            }
            Err(e) => self.error = Some(format!("Can not save \"{title}\": {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preset_answers_panel() {
        let mut host = TerminalHost::new(PathBuf::from("."));
        host.preset(Panel::PageTitle, "Release".to_owned());
        host.show_input_panel(Panel::PageTitle, "Page title:", "");

        assert_eq!(
            host.next_event(),
            Some(UiEvent::InputDone {
                panel: Panel::PageTitle,
                value: "Release".to_owned(),
            })
        );
        assert_eq!(host.next_event(), None);
    }

    #[test]
    fn test_hidden_panel_produces_no_event() {
        let mut host = TerminalHost::new(PathBuf::from("."));
        host.show_input_panel(Panel::SpaceKey, "Confluence space key:", "");
        host.hide_panel();
        assert_eq!(host.next_event(), None);
    }

    #[test]
    fn test_error_fails_command() {
        let mut host = TerminalHost::new(PathBuf::from("."));
        host.error_message("No result found for x");
        let err = host.finish().unwrap_err();
        assert_eq!(err.to_string(), "No result found for x");
    }

    #[test]
    fn test_open_document_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = TerminalHost::new(dir.path().to_path_buf());
        let page = serde_json::from_value(serde_json::json!({"id": "1", "title": "Home"})).unwrap();
        host.open_document(NewDocument {
            name: "Home".to_owned(),
            text: "<p>home</p>".to_owned(),
            syntax: pagesync_markup::HTML_SYNTAX.to_owned(),
            page,
        });

        assert_eq!(host.written(), [dir.path().join("Home.html")]);
        host.finish().unwrap();
    }
}
