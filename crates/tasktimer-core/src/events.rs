use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SessionKind;

/// Every state change in a session run produces an Event.
/// Renderers display them; the orchestrator acts on the completion ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        kind: SessionKind,
        label: String,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        kind: SessionKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        kind: SessionKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        kind: SessionKind,
        label: String,
        at: DateTime<Utc>,
    },
    SessionCancelled {
        kind: SessionKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TaskCompleted {
        task_id: u64,
        completed_at: DateTime<Utc>,
    },
    BreakOffered {
        task_id: u64,
        minutes: u32,
    },
    BreakSkipped {
        task_id: u64,
    },
}
