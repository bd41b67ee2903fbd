use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::domain::{TimerDurations, TimerMode};
use crate::ports::Ledger;

pub const MIN_EDIT_MINUTES: u32 = 1;
pub const MAX_EDIT_MINUTES: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRules {
    pub sessions_before_long_break: u32,
    pub focus_reward: u64,
}

impl Default for TimerRules {
    fn default() -> Self {
        Self {
            sessions_before_long_break: 4,
            focus_reward: 1,
        }
    }
}

/// Pending change to one mode's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationEdit {
    pub mode: TimerMode,
    pub minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub finished: TimerMode,
    pub next: TimerMode,
    pub sessions_completed: u32,
    /// Chips actually credited, zero for breaks or when the ledger failed.
    pub reward: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Counted { seconds_remaining: u64 },
    Completed(Completion),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub seconds_remaining: u64,
    pub duration_seconds: u64,
    pub running: bool,
    pub sessions_completed: u32,
    pub display: String,
    pub progress: f64,
    pub session_dots: Vec<bool>,
    pub editing: Option<DurationEdit>,
    pub durations: TimerDurations,
}

/// Focus/break countdown that credits chips for every finished focus session.
///
/// The engine has no clock of its own: whoever owns it calls [`tick`]
/// once per second while it is running.
///
/// [`tick`]: PomodoroTimer::tick
pub struct PomodoroTimer {
    ledger: Arc<dyn Ledger>,
    durations: TimerDurations,
    rules: TimerRules,
    mode: TimerMode,
    seconds_remaining: u64,
    running: bool,
    sessions_completed: u32,
    edit: Option<DurationEdit>,
}

impl PomodoroTimer {
    pub fn new(ledger: Arc<dyn Ledger>, durations: TimerDurations, rules: TimerRules) -> Self {
        Self {
            ledger,
            durations,
            rules,
            mode: TimerMode::Focus,
            seconds_remaining: durations.focus,
            running: false,
            sessions_completed: 0,
            edit: None,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    pub fn durations(&self) -> TimerDurations {
        self.durations
    }

    pub fn pending_edit(&self) -> Option<DurationEdit> {
        self.edit
    }

    pub fn set_mode(&mut self, mode: TimerMode) {
        self.pause();
        self.edit = None;
        self.mode = mode;
        self.seconds_remaining = self.durations.get(mode);
    }

    pub fn start(&mut self) {
        if self.running {
            debug!("start ignored, already running");
            return;
        }
        self.edit = None;
        if self.seconds_remaining == 0 {
            self.seconds_remaining = self.durations.get(self.mode);
        }
        self.running = true;
        info!(mode = %self.mode, remaining = self.seconds_remaining, "countdown started");
    }

    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            info!(mode = %self.mode, remaining = self.seconds_remaining, "countdown paused");
        }
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }
        if self.seconds_remaining <= 1 {
            return TickOutcome::Completed(self.complete());
        }
        self.seconds_remaining -= 1;
        TickOutcome::Counted {
            seconds_remaining: self.seconds_remaining,
        }
    }

    /// Ends the current countdown and moves on to the next mode.
    pub fn complete(&mut self) -> Completion {
        self.pause();
        self.seconds_remaining = 0;
        let finished = self.mode;

        let mut reward = 0;
        let next = if finished == TimerMode::Focus {
            self.sessions_completed += 1;
            match self.ledger.credit(self.rules.focus_reward) {
                Ok(()) => reward = self.rules.focus_reward,
                Err(error) => error!(%error, "failed to credit focus reward"),
            }
            if self.sessions_completed % self.cycle_length() == 0 {
                TimerMode::LongBreak
            } else {
                TimerMode::ShortBreak
            }
        } else {
            TimerMode::Focus
        };

        self.set_mode(next);
        info!(%finished, %next, sessions = self.sessions_completed, reward, "countdown completed");

        Completion {
            finished,
            next,
            sessions_completed: self.sessions_completed,
            reward,
        }
    }

    pub fn reset(&mut self) {
        self.pause();
        self.edit = None;
        self.seconds_remaining = self.durations.get(self.mode);
    }

    pub fn start_edit(&mut self) {
        self.start_edit_for(self.mode);
    }

    pub fn start_edit_for(&mut self, mode: TimerMode) {
        if self.running {
            debug!("edit ignored while running");
            return;
        }
        let minutes = u32::try_from(self.durations.get(mode) / 60).unwrap_or(MAX_EDIT_MINUTES);
        self.edit = Some(DurationEdit { mode, minutes });
    }

    pub fn confirm_edit(&mut self, minutes: u32) {
        if self.running {
            debug!("edit confirmation ignored while running");
            return;
        }
        let Some(edit) = self.edit.take() else {
            debug!("edit confirmation ignored, nothing to confirm");
            return;
        };

        let minutes = minutes.clamp(MIN_EDIT_MINUTES, MAX_EDIT_MINUTES);
        let seconds = u64::from(minutes) * 60;
        self.durations.set(edit.mode, seconds);
        if edit.mode == self.mode {
            self.seconds_remaining = seconds;
        }
        info!(mode = %edit.mode, minutes, "duration changed");
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Remaining time as `mm:ss`.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.seconds_remaining / 60,
            self.seconds_remaining % 60
        )
    }

    /// Fraction of the current countdown already elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let total = self.durations.get(self.mode);
        if total == 0 {
            return 0.0;
        }
        let remaining = self.seconds_remaining.min(total);
        1.0 - remaining as f64 / total as f64
    }

    /// Filled dots for the sessions of the current long-break cycle.
    pub fn session_dots(&self) -> Vec<bool> {
        let cycle = self.cycle_length();
        let in_cycle = self.sessions_completed % cycle;
        let cycle_closed = self.sessions_completed > 0 && in_cycle == 0;

        (0..cycle)
            .map(|index| cycle_closed || index < in_cycle)
            .collect()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            duration_seconds: self.durations.get(self.mode),
            running: self.running,
            sessions_completed: self.sessions_completed,
            display: self.display(),
            progress: self.progress(),
            session_dots: self.session_dots(),
            editing: self.edit,
            durations: self.durations,
        }
    }

    fn cycle_length(&self) -> u32 {
        self.rules.sessions_before_long_break.max(1)
    }
}
