//! Event loop driving a command to completion.

use std::thread;
use std::time::Instant;

use pagesync_editor::{Command, CommandSettings, DocumentSession, ViewController};
use tracing::debug;

use crate::terminal::TerminalHost;

/// Run `command` until it finishes, fails or is cancelled.
///
/// Scheduled steps run when due; whenever a panel is open the user's answer
/// is fed back before anything else.
pub(crate) fn run(
    controller: &mut ViewController,
    command: Command,
    settings: CommandSettings,
    doc: &mut DocumentSession,
    host: &mut TerminalHost,
) {
    controller.invoke(command, settings, doc, host);

    while controller.is_busy() {
        if let Some(event) = host.next_event() {
            controller.handle_event(event, host);
            continue;
        }

        let Some(due) = controller.next_due() else {
            debug!("Nothing left to run");
            controller.reset();
            break;
        };
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
        controller.run_due(Instant::now(), doc, host);
    }
}
