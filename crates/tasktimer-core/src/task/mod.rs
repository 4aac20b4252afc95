//! Task model.
//!
//! A task is a named unit of planned work with a duration in minutes. It is
//! completed at most once; `completed_at` is present exactly when `completed`
//! is true.

mod store;
mod timestamp;

pub use store::{Completion, TaskStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One unit of planned work.
///
/// Field names follow the persisted record shape (`duration`, `created_at`,
/// `completed_at`) so files written by earlier versions load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub completed: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Records written before tagging existed have no `tags` field.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    pub(crate) fn new(id: u64, name: String, duration_minutes: u32, tags: Vec<String>) -> Self {
        Task {
            id,
            name,
            duration_minutes,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
            tags,
        }
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = normalize_tag(tag);
        self.tags.iter().any(|t| *t == needle)
    }

    /// Repair a record that violates the completion invariant.
    /// Returns true when something changed.
    pub(crate) fn repair(&mut self) -> bool {
        let mut changed = false;
        match (self.completed, self.completed_at) {
            (true, None) => {
                self.completed_at = Some(self.created_at);
                changed = true;
            }
            (false, Some(_)) => {
                self.completed_at = None;
                changed = true;
            }
            _ => {}
        }
        let tags = normalize_tags(&self.tags);
        if tags != self.tags {
            self.tags = tags;
            changed = true;
        }
        changed
    }
}

pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Lowercase, trim, drop empties and duplicates; first occurrence wins.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = normalize_tag(tag.as_ref());
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
