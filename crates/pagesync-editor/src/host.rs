//! Host editor primitives.

use pagesync_confluence::Page;

/// Input panels the commands open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Username,
    Password,
    SpaceKey,
    PageTitle,
}

/// New document to open in the host, attached to a fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    /// Display name, the page title.
    pub name: String,
    pub text: String,
    /// Syntax identifier in the host's naming.
    pub syntax: String,
    pub page: Page,
}

/// UI primitives provided by the editor hosting the commands.
///
/// Panels never block: answers arrive later as [`UiEvent`]s passed to
/// [`ViewController::handle_event`](crate::ViewController::handle_event).
pub trait EditorHost {
    /// Show a transient status message.
    fn status_message(&mut self, message: &str);

    /// Show a modal error message.
    fn error_message(&mut self, message: &str);

    fn set_clipboard(&mut self, text: &str);

    /// Open a single-line input panel with `initial_text` filled in.
    fn show_input_panel(&mut self, panel: Panel, caption: &str, initial_text: &str);

    /// Close the current panel, if any.
    fn hide_panel(&mut self);

    /// Offer a list of items to choose from.
    fn show_quick_panel(&mut self, items: &[String]);

    /// Open a new document window.
    fn open_document(&mut self, document: NewDocument);
}

/// User interaction reported back by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The visible text of an input panel changed.
    InputChanged { panel: Panel, value: String },
    /// An input panel was confirmed.
    InputDone { panel: Panel, value: String },
    /// A quick panel closed; `None` when nothing was chosen.
    QuickPanelDone(Option<usize>),
    /// An input panel was dismissed.
    Cancelled,
}
