//! Task persistence providers.
//!
//! The store hands the provider the whole collection on every mutation;
//! there is no partial-update format.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tempfile::NamedTempFile;
use tracing::debug;

use super::data_dir;
use crate::error::Result;
use crate::task::Task;

/// Whole-collection load/replace.
pub trait TaskRepository {
    fn load_all(&self) -> Result<Vec<Task>>;
    fn save_all(&self, tasks: &[Task]) -> Result<()>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for Box<R> {
    fn load_all(&self) -> Result<Vec<Task>> {
        (**self).load_all()
    }

    fn save_all(&self, tasks: &[Task]) -> Result<()> {
        (**self).save_all(tasks)
    }
}

/// Pretty-printed JSON array on disk, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `tasks.json` in the data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?.join("tasks.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskRepository for JsonFileRepository {
    fn load_all(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    fn save_all(&self, tasks: &[Task]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        // Write next to the target so the rename stays on one filesystem.
        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, tasks)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// In-memory provider. Clones share the same backing vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    tasks: Arc<Mutex<Vec<Task>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(tasks)),
            saves: Arc::default(),
        }
    }

    /// Number of `save_all` calls so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl TaskRepository for MemoryRepository {
    fn load_all(&self) -> Result<Vec<Task>> {
        Ok(self.snapshot())
    }

    fn save_all(&self, tasks: &[Task]) -> Result<()> {
        *self.tasks.lock().unwrap_or_else(PoisonError::into_inner) = tasks.to_vec();
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
