use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use ludo_core::engine::{PomodoroTimer, TickOutcome};
use ludo_core::{TimerMode, TimerSnapshot};

use super::NotifierHandle;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Status,
    Start,
    Pause,
    Toggle,
    Reset,
    SetMode(TimerMode),
    BeginEdit(Option<TimerMode>),
    ConfirmEdit(u32),
    CancelEdit,
}

pub struct TimerMessage {
    command: TimerCommand,
    reply: oneshot::Sender<TimerSnapshot>,
}

/// Owns the pomodoro engine and the one-second tick that drives it.
pub struct TimerActor {
    receiver: mpsc::Receiver<TimerMessage>,
    timer: PomodoroTimer,
    ticker: Option<Interval>,
    notifier: Option<NotifierHandle>,
}

#[derive(Clone)]
pub struct TimerHandle {
    sender: mpsc::Sender<TimerMessage>,
}

impl TimerHandle {
    /// Applies `command` and returns the resulting state.
    pub async fn execute(&self, command: TimerCommand) -> Option<TimerSnapshot> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(TimerMessage {
                command,
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }

    pub async fn status(&self) -> Option<TimerSnapshot> {
        self.execute(TimerCommand::Status).await
    }
}

impl TimerActor {
    pub fn new(timer: PomodoroTimer, notifier: Option<NotifierHandle>) -> (Self, TimerHandle) {
        let (sender, receiver) = mpsc::channel(32);

        let actor = Self {
            receiver,
            timer,
            ticker: None,
            notifier,
        };

        let handle = TimerHandle { sender };

        (actor, handle)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                message = self.receiver.recv() => {
                    let Some(TimerMessage { command, reply }) = message else {
                        break;
                    };
                    self.apply(command);
                    let _ = reply.send(self.timer.snapshot());
                }
                _ = next_tick(&mut self.ticker) => {
                    self.on_tick();
                }
            }
        }

        debug!("timer actor stopped");
    }

    fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Status => {}
            TimerCommand::Start => self.timer.start(),
            TimerCommand::Pause => self.timer.pause(),
            TimerCommand::Toggle => self.timer.toggle(),
            TimerCommand::Reset => self.timer.reset(),
            TimerCommand::SetMode(mode) => self.timer.set_mode(mode),
            TimerCommand::BeginEdit(Some(mode)) => self.timer.start_edit_for(mode),
            TimerCommand::BeginEdit(None) => self.timer.start_edit(),
            TimerCommand::ConfirmEdit(minutes) => self.timer.confirm_edit(minutes),
            TimerCommand::CancelEdit => self.timer.cancel_edit(),
        }
        self.sync_ticker();
    }

    fn on_tick(&mut self) {
        if let TickOutcome::Completed(completion) = self.timer.tick() {
            info!(
                finished = %completion.finished,
                next = %completion.next,
                sessions = completion.sessions_completed,
                "timer completed"
            );
            if let Some(ref notifier) = self.notifier {
                if completion.finished == TimerMode::Focus {
                    notifier.send_focus_complete(completion.reward, completion.next);
                } else {
                    notifier.send_break_over();
                }
            }
        }
        self.sync_ticker();
    }

    /// Keeps exactly one tick source while the engine runs and none otherwise.
    fn sync_ticker(&mut self) {
        match (self.timer.is_running(), self.ticker.is_some()) {
            (true, false) => {
                let mut ticker = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.ticker = Some(ticker);
                debug!("tick scheduled");
            }
            (false, true) => {
                self.ticker = None;
                debug!("tick cancelled");
            }
            _ => {}
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
