//! Terminal output: colors, task lines and the live countdown.

use std::io::{IsTerminal, Write};

use crossterm::style::{Color, Stylize};
use tasktimer_core::{Band, Event, Renderer, SessionKind, SessionState, SessionView, Task};

/// Color switch shared by every printing command.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    /// Colors only when enabled in config and stdout is a terminal.
    pub fn for_stdout(enabled: bool) -> Self {
        Self {
            color: enabled && std::io::stdout().is_terminal(),
        }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn rule(&self) -> String {
        "-".repeat(60)
    }

    pub fn task_line(&self, task: &Task) -> String {
        let (mark, color) = if task.completed {
            ("✓", Color::Green)
        } else {
            ("○", Color::Yellow)
        };
        let mut line = format!(
            "{} [{}] {} ({} min)",
            self.paint(mark, color),
            task.id,
            task.name,
            task.duration_minutes
        );
        if !task.tags.is_empty() {
            line.push(' ');
            line.push_str(&self.paint(&format!("#{}", task.tags.join(" #")), Color::Cyan));
        }
        line
    }

    fn band_color(kind: SessionKind, band: Band) -> Color {
        match (kind, band) {
            (SessionKind::Work, Band::High) => Color::Green,
            (SessionKind::Work, Band::Medium) => Color::Yellow,
            (SessionKind::Work, Band::Low) => Color::Red,
            (SessionKind::Break, Band::High) => Color::Cyan,
            (SessionKind::Break, Band::Medium) => Color::Blue,
            (SessionKind::Break, Band::Low) => Color::Magenta,
        }
    }
}

pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Draws the countdown in place and prints lifecycle messages.
pub struct TerminalRenderer {
    palette: Palette,
    show_keys: bool,
}

impl TerminalRenderer {
    pub fn new(palette: Palette, show_keys: bool) -> Self {
        Self { palette, show_keys }
    }

    fn line(&self, text: &str, color: Color) {
        println!("{}", self.palette.paint(text, color));
    }
}

impl Renderer for TerminalRenderer {
    fn on_event(&mut self, event: &Event) {
        let p = self.palette;
        match event {
            Event::SessionStarted { kind: SessionKind::Work, label, total_secs, .. } => {
                println!(
                    "\n{} {}",
                    p.bold(&p.paint("⏱️  Starting timer for:", Color::Blue)),
                    p.bold(label)
                );
                println!("Duration: {} minutes", total_secs / 60);
                if self.show_keys {
                    self.line("(p pause/resume, q quit)", Color::DarkGrey);
                }
                println!();
            }
            Event::SessionStarted { kind: SessionKind::Break, total_secs, .. } => {
                println!(
                    "\n{}",
                    p.bold(&p.paint(&format!("☕ Starting {}-minute break", total_secs / 60), Color::Cyan))
                );
                self.line("💡 Time to relax and recharge!", Color::Cyan);
                println!();
            }
            Event::SessionCompleted { kind: SessionKind::Work, .. } => {
                println!("\n\n{}", p.bold(&p.paint("🎉 Time's up! Great work!", Color::Green)));
            }
            Event::SessionCompleted { kind: SessionKind::Break, .. } => {
                println!(
                    "\n\n{}",
                    p.bold(&p.paint("✨ Break time is over! Ready to get back to work?", Color::Green))
                );
            }
            Event::SessionCancelled { kind: SessionKind::Work, .. } => {
                println!("\n\n{}", p.paint("⏸️  Timer stopped.", Color::Yellow));
            }
            Event::SessionCancelled { kind: SessionKind::Break, .. } => {
                println!("\n\n{}", p.paint("⏸️  Break interrupted. Back to work early!", Color::Yellow));
            }
            Event::TaskCompleted { task_id, .. } => {
                self.line(&format!("✓ Task {task_id} marked as completed"), Color::Green);
            }
            Event::BreakOffered { .. } => {
                println!("\n{}", "=".repeat(50));
            }
            Event::BreakSkipped { .. } => {
                self.line("Break skipped. Keep up the momentum!", Color::Yellow);
            }
            Event::SessionPaused { .. } | Event::SessionResumed { .. } => {}
        }
    }

    fn on_tick(&mut self, view: &SessionView) {
        let icon = match view.kind {
            SessionKind::Work => "⏰",
            SessionKind::Break => "☕",
        };
        let clock = format_clock(view.remaining_secs);
        let text = if view.state == SessionState::Paused {
            format!("{icon} {clock} paused   ")
        } else {
            format!("{icon} {clock} remaining")
        };
        let color = Palette::band_color(view.kind, view.band);
        print!("\r{}", self.palette.paint(&text, color));
        let _ = std::io::stdout().flush();
    }
}
