//! Work/break sequencing around a single task.
//!
//! The orchestrator talks to the outside world only through the collaborator
//! traits defined here, so a terminal front end and a windowed one drive the
//! same code:
//!
//! - [`TickSource`]: waits for the next tick and delivers pause/resume/cancel
//! - [`BreakPrompt`]: the single yes/no break confirmation
//! - [`Renderer`]: shows per-tick views and lifecycle events
//! - [`crate::notify::Notifier`]: the completion bell

mod orchestrator;
mod ticker;

pub use orchestrator::{BreakOutcome, BreakPlan, Outcome, SessionOrchestrator};
pub use ticker::{ChannelTicker, SimulatedTicker};

use std::time::Duration;

use crate::events::Event;
use crate::timer::SessionView;

/// User input that can arrive between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pause,
    Resume,
    /// Pause when running, resume when paused.
    TogglePause,
    Cancel,
}

pub trait TickSource {
    /// Block for at most `interval`, returning early with any control
    /// command that arrives meanwhile.
    fn next_tick(&mut self, interval: Duration) -> Option<Control>;
}

pub trait BreakPrompt {
    fn confirm_break(&mut self, minutes: u32) -> bool;
}

/// Always answers the same way. Useful for `--yes` and for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl BreakPrompt for FixedAnswer {
    fn confirm_break(&mut self, _minutes: u32) -> bool {
        self.0
    }
}

pub trait Renderer {
    fn on_event(&mut self, _event: &Event) {}
    fn on_tick(&mut self, _view: &SessionView) {}
}

/// Renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}
