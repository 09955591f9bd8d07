//! Editor-hosted Confluence page commands.
//!
//! This crate contains everything that runs inside a host text editor:
//!
//! - [`EditorHost`]: the UI primitives the host provides (input panels,
//!   quick panels, clipboard, status messages, new documents)
//! - [`Scheduler`]: deferred steps, the host's `set_timeout`
//! - [`CredentialFlow`]: asks for the username and password that are not
//!   configured, emulating a masked password field
//! - [`DocumentSession`]: per-document record holding text, syntax and the
//!   attached page resource
//! - [`ViewController`]: runs one [`Command`] at a time for a view
//!
//! Nothing here blocks on user input. A command schedules its first step,
//! the host runs due steps from its event loop and feeds [`UiEvent`]s back
//! when the user answers a panel.
//!
//! # Example
//!
//! ```ignore
//! use pagesync_editor::{Command, CommandSettings, ConfluenceConnector, ViewController};
//!
//! let mut controller = ViewController::new(ConfluenceConnector::default());
//! controller.invoke(Command::Post, settings, &document, &mut host);
//! while controller.is_busy() {
//!     // sleep until controller.next_due(), run_due(), forward UI events
//! }
//! ```

mod commands;
mod controller;
mod credentials;
mod document;
pub mod error;
mod host;
mod mask;
mod scheduler;
#[cfg(test)]
mod testing;

pub use commands::{Command, GetScope};
pub use controller::{CommandSettings, ConfluenceConnector, Connector, ViewController};
pub use credentials::{CredentialFlow, CredentialState, CredentialStep, Credentials};
pub use document::{DocumentSession, PAGE_SETTING};
pub use error::CommandError;
pub use host::{EditorHost, NewDocument, Panel, UiEvent};
pub use mask::PasswordMask;
pub use scheduler::{STEP_DELAY, Scheduler};
