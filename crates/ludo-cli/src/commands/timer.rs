use super::{timer_request, translator};
use anyhow::{bail, Result};
use clap::Subcommand;
use ludo_core::{TimerMode, Translator};
use ludo_protocol::{Request, TimerSnapshot};

const PROGRESS_WIDTH: usize = 20;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TimerAction {
    /// Show the timer
    Show,
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start when paused, pause when running
    Toggle,
    /// Stop and restore the full duration of the current mode
    Reset,
    /// Switch to focus, short-break or long-break
    Mode { mode: TimerMode },
    /// Change the duration of a mode, in minutes (1-99)
    Edit {
        minutes: Option<u32>,
        /// Mode to edit (defaults to the current one)
        #[arg(short, long)]
        mode: Option<TimerMode>,
    },
    /// Confirm a pending duration edit
    Confirm { minutes: u32 },
    /// Drop a pending duration edit
    CancelEdit,
}

pub async fn execute(action: TimerAction) -> Result<()> {
    let translator = translator();

    let snapshot = match action {
        TimerAction::Show => timer_request(Request::TimerStatus, &translator).await?,
        TimerAction::Start => timer_request(Request::TimerStart, &translator).await?,
        TimerAction::Pause => timer_request(Request::TimerPause, &translator).await?,
        TimerAction::Toggle => timer_request(Request::TimerToggle, &translator).await?,
        TimerAction::Reset => timer_request(Request::TimerReset, &translator).await?,
        TimerAction::Mode { mode } => {
            timer_request(Request::TimerSetMode { mode }, &translator).await?
        }
        TimerAction::Edit { minutes, mode } => {
            let editing = timer_request(Request::TimerBeginEdit { mode }, &translator).await?;
            if editing.editing.is_none() {
                bail!(translator.get("timer.edit_rejected"));
            }
            match minutes {
                Some(minutes) => {
                    timer_request(Request::TimerConfirmEdit { minutes }, &translator).await?
                }
                None => editing,
            }
        }
        TimerAction::Confirm { minutes } => {
            timer_request(Request::TimerConfirmEdit { minutes }, &translator).await?
        }
        TimerAction::CancelEdit => timer_request(Request::TimerCancelEdit, &translator).await?,
    };

    println!("{}", render(&snapshot, &translator));
    Ok(())
}

pub(super) fn render(snapshot: &TimerSnapshot, translator: &Translator) -> String {
    let state = if snapshot.running {
        translator.get("timer.running")
    } else {
        translator.get("timer.paused")
    };

    let mut lines = vec![
        format!(
            "{}  {}  ({})",
            translator.get(snapshot.mode.label_key()),
            snapshot.display,
            state
        ),
        progress_bar(snapshot.progress),
        format!(
            "{}  {}",
            translator.format(
                "timer.sessions",
                &[("count", snapshot.sessions_completed.to_string().as_str())]
            ),
            session_dots(&snapshot.session_dots)
        ),
    ];

    if let Some(edit) = snapshot.editing {
        let mode = translator.get(edit.mode.label_key());
        let minutes = edit.minutes.to_string();
        lines.push(translator.format(
            "timer.editing",
            &[("mode", mode.as_str()), ("minutes", minutes.as_str())],
        ));
    }

    lines.join("\n")
}

fn progress_bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 1.0) * PROGRESS_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}

fn session_dots(dots: &[bool]) -> String {
    dots.iter()
        .map(|&filled| if filled { '●' } else { '○' })
        .collect()
}
