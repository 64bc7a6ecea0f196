//! Explicit session context.
//!
//! The session is a value passed to whoever needs it, not a process-wide
//! singleton. The idle timer is plain bookkeeping: callers call [`touch`] on
//! observed activity and [`is_expired`] before acting on the session, instead
//! of an ambient timer firing callbacks.
//!
//! [`touch`]: SessionContext::touch
//! [`is_expired`]: SessionContext::is_expired

use intake_types::NonEmptyText;
use std::time::{Duration, Instant};

/// A bearer token plus idle-timeout tracking for one user session.
#[derive(Clone, Debug)]
pub struct SessionContext {
    token: NonEmptyText,
    idle_timeout: Option<Duration>,
    last_activity: Instant,
}

impl SessionContext {
    /// Create a session that never idles out.
    pub fn new(token: NonEmptyText) -> Self {
        Self {
            token,
            idle_timeout: None,
            last_activity: Instant::now(),
        }
    }

    /// Create a session that expires after `idle_timeout` without activity.
    pub fn with_idle_timeout(token: NonEmptyText, idle_timeout: Duration) -> Self {
        Self {
            token,
            idle_timeout: Some(idle_timeout),
            last_activity: Instant::now(),
        }
    }

    /// The bearer token for the `Authorization` header.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Record observed activity, resetting the idle timer.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Whether the idle timeout has elapsed since the last observed activity.
    pub fn is_expired(&self) -> bool {
        match self.idle_timeout {
            Some(timeout) => self.last_activity.elapsed() >= timeout,
            None => false,
        }
    }

    /// Time since the last observed activity.
    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }
}
