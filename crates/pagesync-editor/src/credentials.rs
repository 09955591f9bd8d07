//! Credential acquisition.

use std::fmt;

use crate::mask::PasswordMask;

/// Username and password for HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Which credentials are still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    NeedBoth,
    NeedUsernameOnly,
    NeedPasswordOnly,
    Ready,
}

/// What the host should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStep {
    PromptUsername,
    PromptPassword,
    /// Credentials are complete; run the stored continuation.
    Resume,
}

impl CredentialStep {
    /// Status message shown while the step waits for input.
    pub fn status_message(self) -> Option<&'static str> {
        match self {
            Self::PromptUsername => Some("Waiting for username"),
            Self::PromptPassword => Some("Waiting for password"),
            Self::Resume => None,
        }
    }
}

/// Collects missing credentials, then hands back the action waiting for them.
///
/// Configured values are never prompted for. The continuation stored with
/// [`CredentialFlow::begin`] is handed out exactly once.
#[derive(Debug)]
pub struct CredentialFlow<C> {
    username: Option<String>,
    password: Option<String>,
    mask: PasswordMask,
    continuation: Option<C>,
}

impl<C> CredentialFlow<C> {
    /// Start from the configured credentials.
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self {
            username,
            password,
            mask: PasswordMask::new(),
            continuation: None,
        }
    }

    pub fn state(&self) -> CredentialState {
        match (&self.username, &self.password) {
            (None, None) => CredentialState::NeedBoth,
            (None, Some(_)) => CredentialState::NeedUsernameOnly,
            (Some(_), None) => CredentialState::NeedPasswordOnly,
            (Some(_), Some(_)) => CredentialState::Ready,
        }
    }

    /// Store the action to run once credentials are complete.
    pub fn begin(&mut self, continuation: C) {
        self.continuation = Some(continuation);
    }

    /// Next step for the current state.
    pub fn next_step(&self) -> CredentialStep {
        match self.state() {
            CredentialState::NeedBoth | CredentialState::NeedUsernameOnly => {
                CredentialStep::PromptUsername
            }
            CredentialState::NeedPasswordOnly => CredentialStep::PromptPassword,
            CredentialState::Ready => CredentialStep::Resume,
        }
    }

    /// Record the entered username.
    pub fn submit_username(&mut self, username: String) -> CredentialStep {
        self.username = Some(username);
        self.next_step()
    }

    /// Mask currently displayed in the password panel.
    pub fn password_mask(&self) -> String {
        self.mask.mask()
    }

    /// Track a change of the password panel text.
    ///
    /// Returns the mask to redisplay, if the panel must be refreshed.
    pub fn password_changed(&mut self, visible: &str) -> Option<String> {
        self.mask.on_change(visible)
    }

    /// Accept the password typed so far.
    pub fn submit_password(&mut self) -> CredentialStep {
        self.password = Some(self.mask.password());
        self.next_step()
    }

    /// Take the stored continuation.
    pub fn take_continuation(&mut self) -> Option<C> {
        self.continuation.take()
    }

    /// Complete credentials, once both parts are known.
    pub fn credentials(&self) -> Option<Credentials> {
        Some(Credentials {
            username: self.username.clone()?,
            password: self.password.clone()?,
        })
    }
}
