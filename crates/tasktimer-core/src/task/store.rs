//! Authoritative in-memory task collection, synchronized to a
//! [`TaskRepository`] on every mutation.
//!
//! Callers that live for one command load once; long-lived callers call
//! [`TaskStore::reload`] before each command to pick up outside edits.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{normalize_tags, Task};
use crate::error::{CoreError, Result, ValidationError};
use crate::stats::{self, TaskStats};
use crate::storage::TaskRepository;

/// Result of [`TaskStore::complete_task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Completed { completed_at: DateTime<Utc> },
    /// The task was already done; nothing was changed or saved.
    AlreadyCompleted { completed_at: DateTime<Utc> },
}

pub struct TaskStore<R> {
    repo: R,
    tasks: Vec<Task>,
    /// Highest id ever seen by this instance, so deleting the newest task
    /// does not free its id for the next `add`.
    high_water: u64,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Load the collection from `repo`.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be read or parsed.
    pub fn open(repo: R) -> Result<Self> {
        let mut store = Self {
            repo,
            tasks: Vec::new(),
            high_water: 0,
        };
        store.reload()?;
        Ok(store)
    }

    /// Replace the in-memory view with what the repository holds now.
    pub fn reload(&mut self) -> Result<()> {
        let loaded = self.repo.load_all()?;
        let mut tasks: Vec<Task> = Vec::with_capacity(loaded.len());
        for mut task in loaded {
            if tasks.iter().any(|t| t.id == task.id) {
                warn!(id = task.id, "dropping duplicate task id from storage");
                continue;
            }
            if task.repair() {
                warn!(id = task.id, "repaired inconsistent task record");
            }
            tasks.push(task);
        }
        let max_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        self.high_water = self.high_water.max(max_id);
        self.tasks = tasks;
        Ok(())
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// All tasks in insertion (id) order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Write the current collection again, e.g. after a failed save.
    pub fn persist(&self) -> Result<()> {
        self.repo.save_all(&self.tasks)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a task.
    ///
    /// # Errors
    /// `Validation` for an empty name or zero duration; `Io`/`Json` when the
    /// save fails (the task stays in memory).
    pub fn add<I, S>(&mut self, name: &str, duration_minutes: u32, tags: I) -> Result<Task>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if duration_minutes == 0 {
            return Err(ValidationError::NonPositiveDuration(duration_minutes).into());
        }

        let id = self.high_water + 1;
        let task = Task::new(id, name.to_string(), duration_minutes, normalize_tags(tags));
        self.high_water = id;
        self.tasks.push(task.clone());
        self.persist()?;

        info!(id, name = %task.name, duration_minutes, "task added");
        Ok(task)
    }

    /// Mark a task completed. A second call leaves `completed_at` untouched.
    pub fn complete_task(&mut self, id: u64) -> Result<Completion> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CoreError::NotFound(id))?;

        if let (true, Some(completed_at)) = (task.completed, task.completed_at) {
            return Ok(Completion::AlreadyCompleted { completed_at });
        }

        let completed_at = Utc::now();
        task.completed = true;
        task.completed_at = Some(completed_at);
        self.persist()?;

        info!(id, "task completed");
        Ok(Completion::Completed { completed_at })
    }

    /// Hard-delete a task, returning it.
    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(CoreError::NotFound(id))?;
        let task = self.tasks.remove(index);
        self.persist()?;

        info!(id, "task deleted");
        Ok(task)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn get_task(&self, id: u64) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or(CoreError::NotFound(id))
    }

    /// Tasks in id order, optionally only those carrying `filter_tag`.
    pub fn list(&self, filter_tag: Option<&str>) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| filter_tag.map_or(true, |tag| t.has_tag(tag)))
            .collect()
    }

    pub fn stats(&self, filter_tag: Option<&str>) -> TaskStats {
        stats::compute(&self.tasks, filter_tag)
    }
}
