//! # tasktimer Core Library
//!
//! Business logic for the tasktimer productivity timer. The CLI binary is a
//! thin front end over this crate; any other front end drives the same
//! types through the collaborator traits in [`session`].
//!
//! ## Architecture
//!
//! - **Task store**: the persisted task collection, its invariants and the
//!   completion statistics
//! - **Timer session**: a monotonic-clock countdown state machine that the
//!   caller advances with `tick()`
//! - **Orchestrator**: runs a work session and an optional break against one
//!   task, completing the task at the single well-defined point
//!
//! ## Key Components
//!
//! - [`TaskStore`]: CRUD and aggregation over a [`TaskRepository`]
//! - [`TimerSession`]: countdown state machine
//! - [`SessionOrchestrator`]: work/break sequencing
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod export;
pub mod notify;
pub mod session;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timer;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use notify::Notifier;
pub use session::{
    BreakOutcome, BreakPlan, BreakPrompt, Control, Outcome, Renderer, SessionOrchestrator,
    TickSource,
};
pub use stats::{TagStats, TaskStats};
pub use storage::{Config, JsonFileRepository, MemoryRepository, TaskRepository};
pub use task::{Completion, Task, TaskStore};
pub use timer::{Band, Clock, ManualClock, SessionKind, SessionState, SessionView, SystemClock, TimerSession};
