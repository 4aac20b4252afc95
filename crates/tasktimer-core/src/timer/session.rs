//! Countdown session state machine.
//!
//! A session does not run its own thread. The caller drives it by calling
//! `tick()` periodically; each tick recomputes the remaining time from the
//! deadline, so late or missed ticks never cause drift.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed | Cancelled)
//! Paused -> (Running | Cancelled)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = TimerSession::for_minutes(SessionKind::Work, "Write report", 25, SystemClock);
//! session.start()?;
//! // In a loop:
//! session.tick(); // Returns Some(Event::SessionCompleted) exactly once
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::band::Band;
use super::clock::{Clock, SystemClock};
use crate::error::{CoreError, Result};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Work,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    Completed,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Cancelled)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Completed => "completed",
            SessionState::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Point-in-time view handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub kind: SessionKind,
    pub label: String,
    pub state: SessionState,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub band: Band,
}

/// One countdown, work or break.
#[derive(Debug, Clone)]
pub struct TimerSession<C = SystemClock> {
    kind: SessionKind,
    label: String,
    total: Duration,
    state: SessionState,
    /// Remaining time as of the last tick or transition.
    remaining: Duration,
    /// Only set while Running.
    deadline: Option<Instant>,
    clock: C,
}

impl<C: Clock> TimerSession<C> {
    pub fn with_clock(kind: SessionKind, label: impl Into<String>, total: Duration, clock: C) -> Self {
        Self {
            kind,
            label: label.into(),
            total,
            state: SessionState::Idle,
            remaining: total,
            deadline: None,
            clock,
        }
    }

    pub fn for_minutes(kind: SessionKind, label: impl Into<String>, minutes: u32, clock: C) -> Self {
        Self::with_clock(kind, label, Duration::from_secs(u64::from(minutes) * 60), clock)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn total_secs(&self) -> u64 {
        self.total.as_secs()
    }

    /// Whole seconds left, rounded up so a display never shows 00:00 early.
    pub fn remaining_secs(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// Classified on the exact remaining time, not the rounded display value.
    pub fn band(&self) -> Band {
        Band::classify_duration(self.remaining, self.total)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            kind: self.kind,
            label: self.label.clone(),
            state: self.state,
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs(),
            band: self.band(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Result<Event> {
        if self.state != SessionState::Idle {
            return Err(self.invalid("start"));
        }
        self.state = SessionState::Running;
        self.deadline = Some(self.clock.now() + self.remaining);
        Ok(Event::SessionStarted {
            kind: self.kind,
            label: self.label.clone(),
            total_secs: self.total_secs(),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Result<Event> {
        if self.state != SessionState::Running {
            return Err(self.invalid("pause"));
        }
        self.flush_remaining();
        self.state = SessionState::Paused;
        self.deadline = None;
        Ok(Event::SessionPaused {
            kind: self.kind,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Starts a fresh countdown of the paused remainder; paused time is not elapsed time.
    pub fn resume(&mut self) -> Result<Event> {
        if self.state != SessionState::Paused {
            return Err(self.invalid("resume"));
        }
        self.state = SessionState::Running;
        self.deadline = Some(self.clock.now() + self.remaining);
        Ok(Event::SessionResumed {
            kind: self.kind,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Returns `Ok(None)` when the session has already ended; a completed
    /// session stays completed.
    pub fn cancel(&mut self) -> Result<Option<Event>> {
        match self.state {
            SessionState::Idle | SessionState::Running | SessionState::Paused => {
                if self.state == SessionState::Running {
                    self.flush_remaining();
                }
                self.state = SessionState::Cancelled;
                self.deadline = None;
                Ok(Some(Event::SessionCancelled {
                    kind: self.kind,
                    remaining_secs: self.remaining_secs(),
                    at: Utc::now(),
                }))
            }
            SessionState::Cancelled | SessionState::Completed => Ok(None),
        }
    }

    /// Call periodically. Returns `Some(Event::SessionCompleted)` once, when time runs out.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        self.flush_remaining();
        if !self.remaining.is_zero() {
            return None;
        }
        self.state = SessionState::Completed;
        self.deadline = None;
        tracing::debug!(kind = ?self.kind, label = %self.label, "session completed");
        Some(Event::SessionCompleted {
            kind: self.kind,
            label: self.label.clone(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_remaining(&mut self) {
        if let Some(deadline) = self.deadline {
            self.remaining = deadline.saturating_duration_since(self.clock.now());
        }
    }

    fn invalid(&self, action: &'static str) -> CoreError {
        CoreError::InvalidState {
            action,
            state: self.state,
        }
    }
}
