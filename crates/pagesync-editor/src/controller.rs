//! Per-view command runner.
//!
//! A [`ViewController`] belongs to one editor view. It runs at most one
//! command at a time: credential prompts, space and title prompts and the
//! remote calls are steps on its [`Scheduler`], and panel answers come back
//! through [`ViewController::handle_event`].

use std::time::Instant;

use pagesync_confluence::{ClientOptions, ConfluenceClient, ContentApi, Page, PageSummary};
use pagesync_markup::Markup;
use tracing::{debug, info, warn};

use crate::commands::{self, Command, GetScope};
use crate::credentials::{CredentialFlow, CredentialStep, Credentials};
use crate::document::DocumentSession;
use crate::error::CommandError;
use crate::host::{EditorHost, Panel, UiEvent};
use crate::scheduler::{STEP_DELAY, Scheduler};

const MSG_USERNAME: &str = "Confluence username:";
const MSG_PASSWORD: &str = "Confluence password:";
const MSG_SPACE_KEY: &str = "Confluence space key:";
const MSG_PAGE_TITLE: &str = "Page title:";
const MSG_BUSY: &str = "Another Confluence command is still running.";

/// Settings read when a command is invoked.
#[derive(Debug, Clone)]
pub struct CommandSettings {
    /// API root, e.g. `https://wiki.example.com/rest/api`.
    pub base_uri: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub default_space_key: Option<String>,
    /// reStructuredText converter command line.
    pub rst_command: String,
    /// Re-indent storage bodies opened by get.
    pub pretty_print: bool,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            base_uri: String::new(),
            username: None,
            password: None,
            default_space_key: None,
            rst_command: "rst2html".to_owned(),
            pretty_print: true,
        }
    }
}

/// Opens an authenticated content API session.
pub trait Connector {
    fn connect(&self, base_uri: &str, credentials: &Credentials) -> Box<dyn ContentApi>;
}

impl<F> Connector for F
where
    F: Fn(&str, &Credentials) -> Box<dyn ContentApi>,
{
    fn connect(&self, base_uri: &str, credentials: &Credentials) -> Box<dyn ContentApi> {
        self(base_uri, credentials)
    }
}

/// Connector creating [`ConfluenceClient`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfluenceConnector {
    pub options: ClientOptions,
}

impl Connector for ConfluenceConnector {
    fn connect(&self, base_uri: &str, credentials: &Credentials) -> Box<dyn ContentApi> {
        Box::new(ConfluenceClient::new(
            base_uri,
            &credentials.username,
            &credentials.password,
            self.options,
        ))
    }
}

/// Action waiting for credentials.
#[derive(Debug)]
enum Continuation {
    Post,
    Get(GetScope),
    UpdateAttached(Box<Page>),
    UpdateFromSource,
    Delete(Box<Page>),
    History(Box<Page>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    RequestCredentials,
    PromptUsername,
    PromptPassword,
    Resume,
    ChooseSpace(GetScope),
    PromptSpaceKey,
    PromptPageTitle,
    SearchPages,
}

impl From<CredentialStep> for Step {
    fn from(step: CredentialStep) -> Self {
        match step {
            CredentialStep::PromptUsername => Self::PromptUsername,
            CredentialStep::PromptPassword => Self::PromptPassword,
            CredentialStep::Resume => Self::Resume,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Awaiting {
    Input(Panel),
    QuickPanel,
}

/// State of the running command.
struct Invocation {
    command: Command,
    settings: CommandSettings,
    markup: Markup,
    credentials: CredentialFlow<Continuation>,
    api: Option<Box<dyn ContentApi>>,
    space_key: Option<String>,
    title: String,
    pages: Vec<PageSummary>,
    awaiting: Option<Awaiting>,
}

/// Runs commands for one editor view.
pub struct ViewController {
    connector: Box<dyn Connector>,
    scheduler: Scheduler<Step>,
    active: Option<Invocation>,
}

impl ViewController {
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self {
            connector: Box::new(connector),
            scheduler: Scheduler::new(),
            active: None,
        }
    }

    /// Whether a command is running.
    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    /// When the next step is due.
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Whether the running command waits for the user.
    pub fn is_waiting_for_input(&self) -> bool {
        self.active.as_ref().is_some_and(|inv| inv.awaiting.is_some())
    }

    /// Start `command` on the document.
    ///
    /// A command that needs an attached page fails immediately on an
    /// untracked document. Invoking while another command runs is rejected.
    pub fn invoke(
        &mut self,
        command: Command,
        settings: CommandSettings,
        doc: &DocumentSession,
        host: &mut dyn EditorHost,
    ) {
        if self.is_busy() {
            host.status_message(MSG_BUSY);
            return;
        }

        let continuation = match command {
            Command::Post => Continuation::Post,
            Command::Get(scope) => Continuation::Get(scope),
            Command::Update => doc
                .attached_page()
                .map_or(Continuation::UpdateFromSource, |page| {
                    Continuation::UpdateAttached(Box::new(page))
                }),
            Command::Delete | Command::History => {
                let Some(page) = doc.attached_page() else {
                    let err = CommandError::UntrackedDocument(command.verb());
                    host.error_message(&err.to_string());
                    return;
                };
                if command == Command::Delete {
                    Continuation::Delete(Box::new(page))
                } else {
                    Continuation::History(Box::new(page))
                }
            }
        };

        info!("Running {} on {}", command.verb(), doc.name);
        let mut credentials =
            CredentialFlow::new(settings.username.clone(), settings.password.clone());
        credentials.begin(continuation);
        self.active = Some(Invocation {
            command,
            markup: Markup::new(&settings.rst_command),
            settings,
            credentials,
            api: None,
            space_key: None,
            title: String::new(),
            pages: Vec::new(),
            awaiting: None,
        });
        schedule(&mut self.scheduler, Step::RequestCredentials);
    }

    /// Run the steps due at `now`.
    pub fn run_due(
        &mut self,
        now: Instant,
        doc: &mut DocumentSession,
        host: &mut dyn EditorHost,
    ) {
        while let Some(step) = self.scheduler.pop_due(now) {
            self.execute(step, doc, host);
        }
        self.settle();
    }

    /// Run every pending step in order without waiting for its delay.
    pub fn run_pending(&mut self, doc: &mut DocumentSession, host: &mut dyn EditorHost) {
        while let Some(step) = self.scheduler.pop_next() {
            self.execute(step, doc, host);
        }
        self.settle();
    }

    /// Feed a panel answer to the running command.
    pub fn handle_event(&mut self, event: UiEvent, host: &mut dyn EditorHost) {
        let Self {
            scheduler, active, ..
        } = self;
        let Some(inv) = active.as_mut() else {
            return;
        };

        if matches!(event, UiEvent::Cancelled | UiEvent::QuickPanelDone(None))
            && inv.awaiting.is_some()
        {
            info!("{} cancelled", inv.command.verb());
            self.reset();
            return;
        }

        if let Err(e) = inv.on_event(event, scheduler, host) {
            self.fail(&e, host);
        }
        self.settle();
    }

    /// Abandon the running command.
    pub fn reset(&mut self) {
        self.active = None;
        self.scheduler.clear();
    }

    fn execute(&mut self, step: Step, doc: &mut DocumentSession, host: &mut dyn EditorHost) {
        let Self {
            connector,
            scheduler,
            active,
        } = self;
        let Some(inv) = active.as_mut() else {
            return;
        };
        debug!("Running step {step:?}");
        if let Err(e) = inv.run_step(step, &**connector, scheduler, doc, host) {
            self.fail(&e, host);
        }
    }

    fn fail(&mut self, err: &CommandError, host: &mut dyn EditorHost) {
        if let Some(body) = err.response_body() {
            warn!("{body}");
        }
        host.error_message(&err.to_string());
        self.reset();
    }

    /// End the command once nothing is scheduled or awaited.
    fn settle(&mut self) {
        let idle = self
            .active
            .as_ref()
            .is_some_and(|inv| inv.awaiting.is_none())
            && self.scheduler.is_empty();
        if idle && let Some(inv) = self.active.take() {
            debug!("{} finished", inv.command.verb());
        }
    }
}

fn schedule(scheduler: &mut Scheduler<Step>, step: Step) {
    scheduler.set_timeout(step, STEP_DELAY);
}

fn schedule_credential_step(
    step: CredentialStep,
    scheduler: &mut Scheduler<Step>,
    host: &mut dyn EditorHost,
) {
    if let Some(message) = step.status_message() {
        host.status_message(message);
    }
    schedule(scheduler, step.into());
}

impl Invocation {
    fn run_step(
        &mut self,
        step: Step,
        connector: &dyn Connector,
        scheduler: &mut Scheduler<Step>,
        doc: &mut DocumentSession,
        host: &mut dyn EditorHost,
    ) -> Result<(), CommandError> {
        match step {
            Step::RequestCredentials => {
                schedule_credential_step(self.credentials.next_step(), scheduler, host);
            }
            Step::PromptUsername => self.prompt(Panel::Username, MSG_USERNAME, "", host),
            Step::PromptPassword => {
                let mask = self.credentials.password_mask();
                self.prompt(Panel::Password, MSG_PASSWORD, &mask, host);
            }
            Step::Resume => {
                let (Some(continuation), Some(credentials)) = (
                    self.credentials.take_continuation(),
                    self.credentials.credentials(),
                ) else {
                    return Ok(());
                };
                let api = connector.connect(&self.settings.base_uri, &credentials);
                let result = self.resume(continuation, &*api, scheduler, doc, host);
                self.api = Some(api);
                result?;
            }
            Step::ChooseSpace(scope) => {
                let next = match scope {
                    GetScope::AllSpaces => {
                        self.space_key = None;
                        Step::PromptPageTitle
                    }
                    GetScope::AskSpace => Step::PromptSpaceKey,
                    GetScope::DefaultSpace => match &self.settings.default_space_key {
                        Some(key) => {
                            self.space_key = Some(key.clone());
                            Step::PromptPageTitle
                        }
                        None => Step::PromptSpaceKey,
                    },
                };
                schedule(scheduler, next);
            }
            Step::PromptSpaceKey => {
                host.status_message("Waiting for space key");
                self.prompt(Panel::SpaceKey, MSG_SPACE_KEY, "", host);
            }
            Step::PromptPageTitle => {
                host.status_message("Waiting for page title");
                self.prompt(Panel::PageTitle, MSG_PAGE_TITLE, "", host);
            }
            Step::SearchPages => {
                let Some(api) = self.api.as_deref() else {
                    return Ok(());
                };
                let pages = commands::search_pages(api, self.space_key.as_deref(), &self.title)?;
                let items: Vec<String> = pages.iter().map(|p| p.title.clone()).collect();
                self.pages = pages;
                self.awaiting = Some(Awaiting::QuickPanel);
                host.show_quick_panel(&items);
            }
        }
        Ok(())
    }

    fn resume(
        &self,
        continuation: Continuation,
        api: &dyn ContentApi,
        scheduler: &mut Scheduler<Step>,
        doc: &mut DocumentSession,
        host: &mut dyn EditorHost,
    ) -> Result<(), CommandError> {
        match continuation {
            Continuation::Post => commands::post(api, &self.markup, doc, host),
            Continuation::Get(scope) => {
                schedule(scheduler, Step::ChooseSpace(scope));
                Ok(())
            }
            Continuation::UpdateAttached(page) => {
                commands::update_from_editor(api, &self.markup, &page, doc, host)
            }
            Continuation::UpdateFromSource => {
                commands::update_from_source(api, &self.markup, doc, host)
            }
            Continuation::Delete(page) => commands::delete(api, &page, host),
            Continuation::History(page) => commands::history(api, &page, host),
        }
    }

    fn prompt(&mut self, panel: Panel, caption: &str, initial: &str, host: &mut dyn EditorHost) {
        self.awaiting = Some(Awaiting::Input(panel));
        host.show_input_panel(panel, caption, initial);
    }

    fn on_event(
        &mut self,
        event: UiEvent,
        scheduler: &mut Scheduler<Step>,
        host: &mut dyn EditorHost,
    ) -> Result<(), CommandError> {
        match (self.awaiting, event) {
            (
                Some(Awaiting::Input(Panel::Password)),
                UiEvent::InputChanged {
                    panel: Panel::Password,
                    value,
                },
            ) => {
                if let Some(mask) = self.credentials.password_changed(&value) {
                    host.hide_panel();
                    host.show_input_panel(Panel::Password, MSG_PASSWORD, &mask);
                }
            }
            (Some(Awaiting::Input(expected)), UiEvent::InputDone { panel, value })
                if expected == panel =>
            {
                self.awaiting = None;
                match panel {
                    Panel::Username => {
                        let next = self.credentials.submit_username(value);
                        schedule_credential_step(next, scheduler, host);
                    }
                    Panel::Password => {
                        self.credentials.password_changed(&value);
                        let next = self.credentials.submit_password();
                        schedule_credential_step(next, scheduler, host);
                    }
                    Panel::SpaceKey => {
                        self.space_key = Some(value);
                        schedule(scheduler, Step::PromptPageTitle);
                    }
                    Panel::PageTitle => {
                        self.title = value;
                        schedule(scheduler, Step::SearchPages);
                    }
                }
            }
            (Some(Awaiting::QuickPanel), UiEvent::QuickPanelDone(Some(index))) => {
                self.awaiting = None;
                if let (Some(api), Some(summary)) = (self.api.as_deref(), self.pages.get(index)) {
                    commands::open_page(api, summary, self.settings.pretty_print, host)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}
