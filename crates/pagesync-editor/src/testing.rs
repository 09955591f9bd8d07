//! Recording host for tests.

use crate::host::{EditorHost, NewDocument, Panel};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HostCall {
    Status(String),
    Error(String),
    Clipboard(String),
    Input {
        panel: Panel,
        caption: String,
        initial: String,
    },
    HidePanel,
    QuickPanel(Vec<String>),
    Open(Box<NewDocument>),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn statuses(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Status(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Error(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn opened(&self) -> Vec<NewDocument> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Open(doc) => Some((**doc).clone()),
                _ => None,
            })
            .collect()
    }

    /// Panels opened so far, in order.
    pub fn panels(&self) -> Vec<Panel> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Input { panel, .. } => Some(*panel),
                _ => None,
            })
            .collect()
    }
}

impl EditorHost for RecordingHost {
    fn status_message(&mut self, message: &str) {
        self.calls.push(HostCall::Status(message.to_owned()));
    }

    fn error_message(&mut self, message: &str) {
        self.calls.push(HostCall::Error(message.to_owned()));
    }

    fn set_clipboard(&mut self, text: &str) {
        self.calls.push(HostCall::Clipboard(text.to_owned()));
    }

    fn show_input_panel(&mut self, panel: Panel, caption: &str, initial_text: &str) {
        self.calls.push(HostCall::Input {
            panel,
            caption: caption.to_owned(),
            initial: initial_text.to_owned(),
        });
    }

    fn hide_panel(&mut self) {
        self.calls.push(HostCall::HidePanel);
    }

    fn show_quick_panel(&mut self, items: &[String]) {
        self.calls.push(HostCall::QuickPanel(items.to_vec()));
    }

    fn open_document(&mut self, document: NewDocument) {
        self.calls.push(HostCall::Open(Box::new(document)));
    }
}
