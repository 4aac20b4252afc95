use std::time::Duration;

use tracing::{debug, info, warn};

use super::{BreakPrompt, Control, NullRenderer, Renderer, TickSource};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::notify::{NoopNotifier, Notifier};
use crate::storage::TaskRepository;
use crate::task::{Completion, TaskStore};
use crate::timer::{Clock, SessionKind, SessionState, SystemClock, TimerSession};

const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Whether to offer a break after the work session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakPlan {
    #[default]
    None,
    /// Use the orchestrator's configured default length.
    Default,
    Minutes(u32),
}

impl BreakPlan {
    pub fn minutes(self, default: u32) -> Option<u32> {
        match self {
            BreakPlan::None => None,
            BreakPlan::Default => Some(default),
            BreakPlan::Minutes(m) => Some(m),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOutcome {
    NotRequested,
    Declined,
    Completed,
    Cancelled,
}

/// How a `start_task` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The task was already done; nothing ran.
    AlreadyCompleted,
    /// The work countdown was interrupted; the task is untouched.
    WorkCancelled,
    /// The work countdown finished and the task is now completed.
    Completed { break_outcome: BreakOutcome },
}

/// Runs one work session, and optionally one break, against a task.
///
/// Each run builds fresh [`TimerSession`] values; nothing about a run
/// survives in the orchestrator except its collaborators.
pub struct SessionOrchestrator<C = SystemClock> {
    clock: C,
    ticker: Box<dyn TickSource>,
    prompt: Box<dyn BreakPrompt>,
    renderer: Box<dyn Renderer>,
    notifier: Box<dyn Notifier>,
    default_break_minutes: u32,
    tick_interval: Duration,
}

impl<C: Clock + Clone> SessionOrchestrator<C> {
    pub fn new(clock: C, ticker: Box<dyn TickSource>, prompt: Box<dyn BreakPrompt>) -> Self {
        Self {
            clock,
            ticker,
            prompt,
            renderer: Box::new(NullRenderer),
            notifier: Box::new(NoopNotifier),
            default_break_minutes: DEFAULT_BREAK_MINUTES,
            tick_interval: Duration::from_secs(1),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_default_break(mut self, minutes: u32) -> Self {
        self.default_break_minutes = minutes;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Run the task's work countdown and, if planned and accepted, a break.
    ///
    /// The store is touched exactly once, when the work session completes.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `Validation` for a zero-minute break
    /// (checked before anything starts), and any persistence error from
    /// marking the task completed.
    pub fn start_task<R: TaskRepository>(
        &mut self,
        store: &mut TaskStore<R>,
        task_id: u64,
        plan: BreakPlan,
    ) -> Result<Outcome> {
        let task = store.get_task(task_id)?;
        if task.completed {
            info!(task_id, "task already completed; not starting");
            return Ok(Outcome::AlreadyCompleted);
        }

        let break_minutes = plan.minutes(self.default_break_minutes);
        if break_minutes == Some(0) {
            return Err(ValidationError::InvalidValue {
                field: "break".into(),
                message: "break length must be at least one minute".into(),
            }
            .into());
        }

        let name = task.name.clone();
        let work = TimerSession::for_minutes(
            SessionKind::Work,
            name.clone(),
            task.duration_minutes,
            self.clock.clone(),
        );
        info!(task_id, minutes = task.duration_minutes, "work session starting");

        if self.run_session(work)? == SessionState::Cancelled {
            info!(task_id, "work session cancelled; task left incomplete");
            return Ok(Outcome::WorkCancelled);
        }

        match store.complete_task(task_id)? {
            Completion::Completed { completed_at } => {
                self.renderer.on_event(&Event::TaskCompleted {
                    task_id,
                    completed_at,
                });
            }
            Completion::AlreadyCompleted { .. } => {
                warn!(task_id, "task was completed elsewhere during the session");
            }
        }
        self.ring();

        let Some(minutes) = break_minutes else {
            return Ok(Outcome::Completed {
                break_outcome: BreakOutcome::NotRequested,
            });
        };

        self.renderer.on_event(&Event::BreakOffered { task_id, minutes });
        if !self.prompt.confirm_break(minutes) {
            self.renderer.on_event(&Event::BreakSkipped { task_id });
            return Ok(Outcome::Completed {
                break_outcome: BreakOutcome::Declined,
            });
        }

        let rest = TimerSession::for_minutes(
            SessionKind::Break,
            format!("Break after {name}"),
            minutes,
            self.clock.clone(),
        );
        let break_outcome = match self.run_session(rest)? {
            SessionState::Completed => {
                self.ring();
                BreakOutcome::Completed
            }
            _ => BreakOutcome::Cancelled,
        };
        Ok(Outcome::Completed { break_outcome })
    }

    /// Drive `session` until it completes or is cancelled.
    fn run_session(&mut self, mut session: TimerSession<C>) -> Result<SessionState> {
        let started = session.start()?;
        debug!(kind = ?session.kind(), label = session.label(), "session running");
        self.renderer.on_event(&started);
        self.renderer.on_tick(&session.view());

        loop {
            if let Some(control) = self.ticker.next_tick(self.tick_interval) {
                debug!(?control, state = %session.state(), "control received");
                let event = match (control, session.state()) {
                    (Control::Cancel, _) => session.cancel()?,
                    (Control::Pause | Control::TogglePause, SessionState::Running) => {
                        Some(session.pause()?)
                    }
                    (Control::Resume | Control::TogglePause, SessionState::Paused) => {
                        Some(session.resume()?)
                    }
                    // Pausing a paused session and the like: nothing to do.
                    _ => None,
                };
                if let Some(event) = event {
                    self.renderer.on_event(&event);
                }
                if session.state().is_terminal() {
                    return Ok(session.state());
                }
            }

            let completed = session.tick();
            self.renderer.on_tick(&session.view());
            if let Some(event) = completed {
                self.renderer.on_event(&event);
                return Ok(SessionState::Completed);
            }
        }
    }

    fn ring(&self) {
        if let Err(e) = self.notifier.notify() {
            warn!("notification failed: {e}");
        }
    }
}
