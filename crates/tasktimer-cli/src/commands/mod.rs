pub mod config;
pub mod export;
pub mod stats;
pub mod task;
pub mod timer;

use tasktimer_core::{Config, JsonFileRepository, TaskStore};

use crate::render::Palette;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// The on-disk store. Each CLI invocation loads once and saves per mutation.
pub fn open_store() -> Result<TaskStore<JsonFileRepository>, Box<dyn std::error::Error>> {
    Ok(TaskStore::open(JsonFileRepository::open_default()?)?)
}

pub fn palette(config: &Config) -> Palette {
    Palette::for_stdout(config.ui.color)
}
