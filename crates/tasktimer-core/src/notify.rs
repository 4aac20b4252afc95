//! Completion notifications.
//!
//! Notification is cosmetic: the orchestrator logs a failed `notify()` and
//! carries on. Playback runs on its own thread so a slow player never holds
//! up the next countdown.

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::storage::NotificationsConfig;

pub type NotifyError = Box<dyn Error + Send + Sync>;

pub trait Notifier {
    fn notify(&self) -> Result<(), NotifyError>;
}

/// Does nothing. Selected by `--silent` or `notifications.enabled = false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Rings the terminal bell on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify(&self) -> Result<(), NotifyError> {
        let mut stderr = std::io::stderr();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

/// Plays a sound file with the platform's command-line player
/// (fire-and-forget, non-blocking).
#[derive(Debug, Clone)]
pub struct SoundNotifier {
    path: PathBuf,
}

impl SoundNotifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn player(&self) -> &'static str {
        if cfg!(target_os = "macos") {
            return "afplay";
        }
        let is_ogg = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("ogg"));
        // paplay handles ogg; aplay (ALSA) only does wav.
        if is_ogg {
            "paplay"
        } else {
            "aplay"
        }
    }
}

impl Notifier for SoundNotifier {
    fn notify(&self) -> Result<(), NotifyError> {
        if !self.path.exists() {
            return Err(format!("sound file not found: {}", self.path.display()).into());
        }

        let cmd = self.player();
        let path = self.path.clone();
        std::thread::Builder::new()
            .name("tasktimer-bell".into())
            .spawn(move || {
                let result = Command::new(cmd)
                    .arg(&path)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status();
                match result {
                    Ok(status) if status.success() => {
                        tracing::debug!(player = cmd, "bell played");
                    }
                    Ok(status) => {
                        tracing::debug!(player = cmd, code = ?status.code(), "bell player failed");
                    }
                    Err(e) => {
                        tracing::debug!(player = cmd, "failed to run bell player: {e}");
                    }
                }
            })?;
        Ok(())
    }
}

/// Pick the notifier for this run.
pub fn from_config(config: &NotificationsConfig, silent: bool) -> Box<dyn Notifier + Send> {
    if silent || !config.enabled {
        return Box::new(NoopNotifier);
    }
    match config.sound_file.as_deref() {
        Some(path) if !path.is_empty() => Box::new(SoundNotifier::new(path)),
        _ => Box::new(TerminalBell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sound_file_is_an_error() {
        let notifier = SoundNotifier::new("/definitely/not/here.wav");
        assert!(notifier.notify().is_err());
    }

    #[test]
    fn player_follows_extension() {
        if cfg!(target_os = "macos") {
            return;
        }
        assert_eq!(SoundNotifier::new("bell.ogg").player(), "paplay");
        assert_eq!(SoundNotifier::new("bell.wav").player(), "aplay");
    }

    #[test]
    fn silent_selects_noop() {
        let config = NotificationsConfig::default();
        assert!(from_config(&config, true).notify().is_ok());
        let disabled = NotificationsConfig {
            enabled: false,
            sound_file: Some("/nowhere.wav".into()),
        };
        // A sound notifier would fail on the missing file; the no-op does not.
        assert!(from_config(&disabled, false).notify().is_ok());
    }
}
