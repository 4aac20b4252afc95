use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use super::{Control, TickSource};
use crate::timer::ManualClock;

/// Sleeps one interval per tick, waking early when a control command is
/// sent on the channel. Once every sender is gone it degrades to plain
/// sleeping.
#[derive(Debug)]
pub struct ChannelTicker {
    rx: Receiver<Control>,
    disconnected: bool,
}

impl ChannelTicker {
    pub fn new(rx: Receiver<Control>) -> Self {
        Self {
            rx,
            disconnected: false,
        }
    }
}

impl TickSource for ChannelTicker {
    fn next_tick(&mut self, interval: Duration) -> Option<Control> {
        if self.disconnected {
            std::thread::sleep(interval);
            return None;
        }
        match self.rx.recv_timeout(interval) {
            Ok(control) => Some(control),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.disconnected = true;
                std::thread::sleep(interval);
                None
            }
        }
    }
}

/// Advances a [`ManualClock`] by one interval per tick and replays a script
/// of controls, for deterministic runs without real waiting.
#[derive(Debug)]
pub struct SimulatedTicker {
    clock: ManualClock,
    script: VecDeque<(u64, Control)>,
    ticks: u64,
}

impl SimulatedTicker {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            script: VecDeque::new(),
            ticks: 0,
        }
    }

    /// Deliver `control` on tick number `tick` (1-based, before the clock moves).
    pub fn at(mut self, tick: u64, control: Control) -> Self {
        let pos = self.script.partition_point(|(t, _)| *t <= tick);
        self.script.insert(pos, (tick, control));
        self
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl TickSource for SimulatedTicker {
    fn next_tick(&mut self, interval: Duration) -> Option<Control> {
        self.ticks += 1;
        if let Some(&(tick, control)) = self.script.front() {
            if tick <= self.ticks {
                self.script.pop_front();
                return Some(control);
            }
        }
        self.clock.advance(interval);
        None
    }
}
