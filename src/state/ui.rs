//! UI status state

/// Banner messages shown above the tabs
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Error message to display in UI (banner)
    pub error_message: Option<String>,

    /// Last informational message (export done, selection saved, ...)
    pub status_message: Option<String>,
}

impl UiState {
    /// Set an error message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Clear the current error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
