mod pomodoro;
mod table;

pub use pomodoro::{
    Completion, DurationEdit, PomodoroTimer, TickOutcome, TimerRules, TimerSnapshot,
    MAX_EDIT_MINUTES, MIN_EDIT_MINUTES,
};
pub use table::{BlackjackTable, TableSnapshot};
