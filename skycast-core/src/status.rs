//! Progress reporting shared by every async operation.

use std::fmt;

/// Phase of the operation currently reporting through a [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusState {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Tri-state status plus a human readable message.
///
/// Reset when an operation starts and finalized when it ends. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    state: StatusState,
    message: String,
}

impl Status {
    /// Create a new idle status with an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StatusState {
        self.state
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_idle(&mut self, message: impl Into<String>) {
        self.set(StatusState::Idle, message);
    }

    /// Show `message` with a spinner.
    pub fn set_loading(&mut self, message: impl Into<String>) {
        self.set(StatusState::Loading, message);
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.set(StatusState::Error, message);
    }

    pub fn is_idle(&self) -> bool {
        self.state == StatusState::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.state == StatusState::Loading
    }

    pub fn is_error(&self) -> bool {
        self.state == StatusState::Error
    }

    fn set(&mut self, state: StatusState, message: impl Into<String>) {
        self.state = state;
        self.message = message.into();
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
