//! Where countdown controls and the break answer come from.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tasktimer_core::session::ChannelTicker;
use tasktimer_core::{BreakPrompt, Control, TickSource};
use tracing::{debug, warn};

/// Reads single keys while the countdown waits for its next tick.
///
/// Raw mode is only held inside `next_tick`, so everything printed between
/// ticks (and the break prompt) sees a normal cooked terminal.
pub struct KeyboardTicker;

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn control_for(key: KeyEvent) -> Option<Control> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Control::Cancel),
        KeyCode::Char('p') | KeyCode::Char(' ') => Some(Control::TogglePause),
        KeyCode::Char('r') => Some(Control::Resume),
        KeyCode::Char('q') | KeyCode::Esc => Some(Control::Cancel),
        _ => None,
    }
}

impl TickSource for KeyboardTicker {
    fn next_tick(&mut self, interval: Duration) -> Option<Control> {
        let _raw = match RawModeGuard::enable() {
            Ok(guard) => guard,
            Err(e) => {
                warn!("raw mode unavailable, keys disabled: {e}");
                std::thread::sleep(interval);
                return None;
            }
        };

        let deadline = Instant::now() + interval;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return None;
            }
            match event::poll(left) {
                Ok(true) => match event::read() {
                    Ok(TermEvent::Key(key)) => {
                        if let Some(control) = control_for(key) {
                            debug!(?control, "key control");
                            return Some(control);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("failed to read terminal event: {e}");
                        std::thread::sleep(left);
                        return None;
                    }
                },
                Ok(false) => return None,
                Err(e) => {
                    warn!("failed to poll terminal: {e}");
                    std::thread::sleep(left);
                    return None;
                }
            }
        }
    }
}

/// Ticker for non-interactive runs: Ctrl-C (SIGINT) cancels the countdown
/// instead of killing the process mid-write.
pub fn interrupt_ticker() -> io::Result<ChannelTicker> {
    let (tx, rx) = mpsc::channel();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("tasktimer-signal".into())
        .spawn(move || {
            runtime.block_on(async {
                while tokio::signal::ctrl_c().await.is_ok() {
                    debug!("interrupt received");
                    if tx.send(Control::Cancel).is_err() {
                        break;
                    }
                }
            });
        })?;

    Ok(ChannelTicker::new(rx))
}

/// Asks on stdin. Anything other than `n` accepts; end of input declines.
pub struct StdinPrompt;

fn accepts(answer: &str) -> bool {
    !answer.trim().eq_ignore_ascii_case("n")
}

impl BreakPrompt for StdinPrompt {
    fn confirm_break(&mut self, minutes: u32) -> bool {
        print!("Start {minutes}-minute break? (Y/n): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => false,
            Ok(_) => accepts(&line),
            Err(e) => {
                warn!("could not read break answer: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn keys_map_to_controls() {
        let none = KeyModifiers::NONE;
        assert_eq!(control_for(press(KeyCode::Char('p'), none)), Some(Control::TogglePause));
        assert_eq!(control_for(press(KeyCode::Char('r'), none)), Some(Control::Resume));
        assert_eq!(control_for(press(KeyCode::Char('q'), none)), Some(Control::Cancel));
        assert_eq!(control_for(press(KeyCode::Esc, none)), Some(Control::Cancel));
        assert_eq!(
            control_for(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Control::Cancel)
        );
        assert_eq!(control_for(press(KeyCode::Char('c'), none)), None);
        assert_eq!(control_for(press(KeyCode::Char('x'), none)), None);
    }

    #[test]
    fn only_n_declines() {
        assert!(accepts("\n"));
        assert!(accepts("y\n"));
        assert!(accepts("yes"));
        assert!(accepts("whatever"));
        assert!(!accepts("n\n"));
        assert!(!accepts(" N "));
    }
}
