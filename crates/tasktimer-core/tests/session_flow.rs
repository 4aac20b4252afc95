//! End-to-end runs of the orchestrator against an in-memory store with a
//! simulated clock.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tasktimer_core::notify::NotifyError;
use tasktimer_core::session::{FixedAnswer, SimulatedTicker};
use tasktimer_core::{
    BreakOutcome, BreakPlan, BreakPrompt, Control, CoreError, Event, ManualClock,
    MemoryRepository, Notifier, Outcome, Renderer, SessionKind, SessionOrchestrator, SessionView,
    Task, TaskRepository, TaskStore,
};

const NO_TAGS: [&str; 0] = [];

#[derive(Clone, Default)]
struct CountingNotifier(Arc<AtomicUsize>);

impl CountingNotifier {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Notifier for CountingNotifier {
    fn notify(&self) -> Result<(), NotifyError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct BrokenSpeaker;

impl Notifier for BrokenSpeaker {
    fn notify(&self) -> Result<(), NotifyError> {
        Err("no audio device".into())
    }
}

#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
    views: Arc<Mutex<Vec<SessionView>>>,
}

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn views(&self) -> Vec<SessionView> {
        self.views.lock().unwrap().clone()
    }
}

impl Renderer for Recorder {
    fn on_event(&mut self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn on_tick(&mut self, view: &SessionView) {
        self.views.lock().unwrap().push(view.clone());
    }
}

/// Answers yes and remembers how many saves had happened when asked.
#[derive(Clone, Default)]
struct WatchingPrompt {
    asked_with: Arc<Mutex<Vec<u32>>>,
}

impl BreakPrompt for WatchingPrompt {
    fn confirm_break(&mut self, minutes: u32) -> bool {
        self.asked_with.lock().unwrap().push(minutes);
        true
    }
}

fn store_with(name: &str, minutes: u32) -> TaskStore<MemoryRepository> {
    let mut store = TaskStore::open(MemoryRepository::new()).unwrap();
    store.add(name, minutes, NO_TAGS).unwrap();
    store
}

#[test]
fn work_then_accepted_break() {
    let clock = ManualClock::new();
    let notifier = CountingNotifier::default();
    let recorder = Recorder::default();
    let prompt = WatchingPrompt::default();

    let mut store = store_with("Write report", 25);
    let mut orch = SessionOrchestrator::new(
        clock.clone(),
        Box::new(SimulatedTicker::new(clock.clone())),
        Box::new(prompt.clone()),
    )
    .with_notifier(Box::new(notifier.clone()))
    .with_renderer(Box::new(recorder.clone()));

    let outcome = orch.start_task(&mut store, 1, BreakPlan::Minutes(5)).unwrap();
    assert_eq!(
        outcome,
        Outcome::Completed { break_outcome: BreakOutcome::Completed }
    );

    let task = store.get_task(1).unwrap();
    assert!(task.completed);
    let completed_at = task.completed_at.expect("completed_at set");

    // One save for add, one for completion; the break touched nothing.
    assert_eq!(store.repository().save_count(), 2);
    assert_eq!(notifier.count(), 2);
    assert_eq!(*prompt.asked_with.lock().unwrap(), vec![5]);
    assert_eq!(clock.elapsed(), Duration::from_secs(30 * 60));

    let events = recorder.events();
    let completed: Vec<SessionKind> = events
        .iter()
        .filter_map(|e| match e {
            Event::SessionCompleted { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![SessionKind::Work, SessionKind::Break]);
    assert!(events.contains(&Event::TaskCompleted { task_id: 1, completed_at }));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::SessionStarted { kind: SessionKind::Break, label, .. } if label == "Break after Write report"
    )));
    assert_eq!(store.repository().snapshot()[0].completed_at, Some(completed_at));
}

#[test]
fn declined_break_skips_second_session() {
    let clock = ManualClock::new();
    let notifier = CountingNotifier::default();
    let mut store = store_with("Inbox zero", 10);
    let mut orch = SessionOrchestrator::new(
        clock.clone(),
        Box::new(SimulatedTicker::new(clock.clone())),
        Box::new(FixedAnswer(false)),
    )
    .with_notifier(Box::new(notifier.clone()))
    .with_default_break(7);

    let outcome = orch.start_task(&mut store, 1, BreakPlan::Default).unwrap();
    assert_eq!(
        outcome,
        Outcome::Completed { break_outcome: BreakOutcome::Declined }
    );
    assert_eq!(notifier.count(), 1);
    assert_eq!(clock.elapsed(), Duration::from_secs(10 * 60));
}

#[test]
fn default_break_uses_configured_length() {
    let clock = ManualClock::new();
    let prompt = WatchingPrompt::default();
    let mut store = store_with("Inbox zero", 1);
    let mut orch = SessionOrchestrator::new(
        clock.clone(),
        Box::new(SimulatedTicker::new(clock.clone())),
        Box::new(prompt.clone()),
    )
    .with_default_break(3);

    orch.start_task(&mut store, 1, BreakPlan::Default).unwrap();
    assert_eq!(*prompt.asked_with.lock().unwrap(), vec![3]);
    assert_eq!(clock.elapsed(), Duration::from_secs(4 * 60));
}

#[test]
fn cancelled_work_leaves_task_alone() {
    let clock = ManualClock::new();
    let notifier = CountingNotifier::default();
    let prompt = WatchingPrompt::default();
    let mut store = store_with("Write report", 25);
    let ticker = SimulatedTicker::new(clock.clone()).at(120, Control::Cancel);
    let mut orch = SessionOrchestrator::new(clock.clone(), Box::new(ticker), Box::new(prompt.clone()))
        .with_notifier(Box::new(notifier.clone()));

    let outcome = orch.start_task(&mut store, 1, BreakPlan::Minutes(5)).unwrap();
    assert_eq!(outcome, Outcome::WorkCancelled);

    let task = store.get_task(1).unwrap();
    assert!(!task.completed);
    assert!(task.completed_at.is_none());
    assert_eq!(store.repository().save_count(), 1);
    assert_eq!(notifier.count(), 0);
    assert!(prompt.asked_with.lock().unwrap().is_empty());
}

#[test]
fn cancelled_break_keeps_completion() {
    let clock = ManualClock::new();
    let notifier = CountingNotifier::default();
    let recorder = Recorder::default();
    let mut store = store_with("Write report", 1);
    // 60 ticks of work, then cancel on the 10th tick of the break.
    let ticker = SimulatedTicker::new(clock.clone()).at(70, Control::Cancel);
    let mut orch = SessionOrchestrator::new(clock.clone(), Box::new(ticker), Box::new(FixedAnswer(true)))
        .with_notifier(Box::new(notifier.clone()))
        .with_renderer(Box::new(recorder.clone()));

    let outcome = orch.start_task(&mut store, 1, BreakPlan::Minutes(5)).unwrap();
    assert_eq!(
        outcome,
        Outcome::Completed { break_outcome: BreakOutcome::Cancelled }
    );
    assert!(store.get_task(1).unwrap().completed);
    assert_eq!(notifier.count(), 1);
    assert!(recorder.events().iter().any(|e| matches!(
        e,
        Event::SessionCancelled { kind: SessionKind::Break, remaining_secs: 291, .. }
    )));
}

#[test]
fn pause_time_is_not_counted() {
    let clock = ManualClock::new();
    let recorder = Recorder::default();
    let mut store = store_with("Write report", 1);
    // Run 10s, pause, sit paused for 500 ticks, resume.
    let ticker = SimulatedTicker::new(clock.clone())
        .at(11, Control::Pause)
        .at(512, Control::Resume);
    let mut orch = SessionOrchestrator::new(clock.clone(), Box::new(ticker), Box::new(FixedAnswer(false)))
        .with_renderer(Box::new(recorder.clone()));

    orch.start_task(&mut store, 1, BreakPlan::None).unwrap();

    let events = recorder.events();
    assert!(events.iter().any(|e| matches!(e, Event::SessionPaused { remaining_secs: 50, .. })));
    assert!(events.iter().any(|e| matches!(e, Event::SessionResumed { remaining_secs: 50, .. })));
    // 10s before the pause, 500s paused, 50s after.
    assert_eq!(clock.elapsed(), Duration::from_secs(560));
    assert!(store.get_task(1).unwrap().completed);

    // Views never tick down while paused.
    let paused: Vec<u64> = recorder
        .views()
        .iter()
        .filter(|v| v.state == tasktimer_core::SessionState::Paused)
        .map(|v| v.remaining_secs)
        .collect();
    assert!(!paused.is_empty());
    assert!(paused.iter().all(|&r| r == 50));
}

#[test]
fn notifier_failures_are_swallowed() {
    let clock = ManualClock::new();
    let mut store = store_with("Write report", 1);
    let mut orch = SessionOrchestrator::new(
        clock.clone(),
        Box::new(SimulatedTicker::new(clock.clone())),
        Box::new(FixedAnswer(true)),
    )
    .with_notifier(Box::new(BrokenSpeaker));

    let outcome = orch.start_task(&mut store, 1, BreakPlan::Minutes(1)).unwrap();
    assert_eq!(
        outcome,
        Outcome::Completed { break_outcome: BreakOutcome::Completed }
    );
    assert!(store.get_task(1).unwrap().completed);
}

#[test]
fn work_views_walk_through_bands() {
    use tasktimer_core::Band;

    let clock = ManualClock::new();
    let recorder = Recorder::default();
    let mut store = store_with("Write report", 1);
    let mut orch = SessionOrchestrator::new(
        clock.clone(),
        Box::new(SimulatedTicker::new(clock.clone())),
        Box::new(FixedAnswer(false)),
    )
    .with_renderer(Box::new(recorder.clone()));

    orch.start_task(&mut store, 1, BreakPlan::None).unwrap();

    let views = recorder.views();
    let band_at = |remaining: u64| {
        views
            .iter()
            .find(|v| v.remaining_secs == remaining)
            .map(|v| v.band)
    };
    assert_eq!(band_at(31), Some(Band::High));
    assert_eq!(band_at(30), Some(Band::Medium));
    assert_eq!(band_at(16), Some(Band::Medium));
    assert_eq!(band_at(15), Some(Band::Low));
    assert_eq!(views.last().map(|v| v.remaining_secs), Some(0));
}

/// Saves succeed until `down` is set.
#[derive(Clone, Default)]
struct FlakyRepository {
    inner: MemoryRepository,
    down: Arc<AtomicBool>,
}

impl TaskRepository for FlakyRepository {
    fn load_all(&self) -> Result<Vec<Task>, CoreError> {
        self.inner.load_all()
    }

    fn save_all(&self, tasks: &[Task]) -> Result<(), CoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("disk full").into());
        }
        self.inner.save_all(tasks)
    }
}

#[test]
fn failed_completion_save_stops_the_run() {
    let clock = ManualClock::new();
    let notifier = CountingNotifier::default();
    let recorder = Recorder::default();
    let prompt = WatchingPrompt::default();

    let repo = FlakyRepository::default();
    let mut store = TaskStore::open(repo.clone()).unwrap();
    store.add("Write report", 1, NO_TAGS).unwrap();
    repo.down.store(true, Ordering::SeqCst);

    let mut orch = SessionOrchestrator::new(
        clock.clone(),
        Box::new(SimulatedTicker::new(clock.clone())),
        Box::new(prompt.clone()),
    )
    .with_notifier(Box::new(notifier.clone()))
    .with_renderer(Box::new(recorder.clone()));

    let result = orch.start_task(&mut store, 1, BreakPlan::Default);
    assert!(matches!(result, Err(CoreError::Io(_))), "{result:?}");

    assert_eq!(notifier.count(), 0);
    assert!(prompt.asked_with.lock().unwrap().is_empty());
    let events = recorder.events();
    assert!(events.iter().any(|e| matches!(e, Event::SessionCompleted { kind: SessionKind::Work, .. })));
    assert!(!events.iter().any(|e| matches!(
        e,
        Event::TaskCompleted { .. } | Event::BreakOffered { .. }
    )));

    // Still completed in memory, so the caller can retry the save.
    assert!(store.get_task(1).unwrap().completed);
    assert!(!repo.inner.snapshot()[0].completed);
    repo.down.store(false, Ordering::SeqCst);
    store.persist().unwrap();
    assert!(repo.inner.snapshot()[0].completed);
}
