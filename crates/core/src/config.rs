//! Workflow runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the wizard: how long the duplicate check may run before the gate fails open,
//! and whether the check re-runs after the user edits demographics or stays one-check-per-draft.

use std::time::Duration;

/// Intake workflow configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct IntakeConfig {
    check_timeout: Option<Duration>,
    recheck_on_demographics_change: bool,
}

impl IntakeConfig {
    /// Create a config with no gate timeout (the HTTP client's own default applies)
    /// and the one-check-per-draft policy.
    pub fn new() -> Self {
        Self {
            check_timeout: None,
            recheck_on_demographics_change: false,
        }
    }

    /// Bound the duplicate check to `timeout`; on elapse the gate fails open.
    pub fn with_check_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout = Some(timeout);
        self
    }

    /// Re-run the duplicate check whenever first name, last name, date of birth
    /// or sex changed since the last check.
    pub fn with_recheck_on_demographics_change(mut self, recheck: bool) -> Self {
        self.recheck_on_demographics_change = recheck;
        self
    }

    pub fn check_timeout(&self) -> Option<Duration> {
        self.check_timeout
    }

    pub fn recheck_on_demographics_change(&self) -> bool {
        self.recheck_on_demographics_change
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self::new()
    }
}
