use ludo_core::{NotificationUrgency, TimerMode, Translator};
use notify_rust::{Notification, Urgency};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub enum NotifierMessage {
    FocusComplete { reward: u64, next: TimerMode },
    BreakOver,
}

#[derive(Clone)]
pub struct NotifierHandle {
    sender: mpsc::Sender<NotifierMessage>,
}

impl NotifierHandle {
    pub fn send_focus_complete(&self, reward: u64, next: TimerMode) {
        self.dispatch(NotifierMessage::FocusComplete { reward, next });
    }

    pub fn send_break_over(&self) {
        self.dispatch(NotifierMessage::BreakOver);
    }

    fn dispatch(&self, message: NotifierMessage) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            if let Err(error) = sender.send(message).await {
                error!(%error, "failed to send notification message");
            }
        });
    }
}

pub struct NotifierActor {
    receiver: mpsc::Receiver<NotifierMessage>,
    urgency: Urgency,
    sound_enabled: bool,
    translator: Translator,
}

impl NotifierActor {
    pub fn new(
        urgency: NotificationUrgency,
        sound_enabled: bool,
        translator: Translator,
    ) -> (Self, NotifierHandle) {
        let (sender, receiver) = mpsc::channel(32);

        let urgency = match urgency {
            NotificationUrgency::Low => Urgency::Low,
            NotificationUrgency::Normal => Urgency::Normal,
            NotificationUrgency::Critical => Urgency::Critical,
        };

        let actor = Self {
            receiver,
            urgency,
            sound_enabled,
            translator,
        };

        let handle = NotifierHandle { sender };

        (actor, handle)
    }

    pub async fn run(mut self) {
        info!("notifier actor started");

        while let Some(message) = self.receiver.recv().await {
            let (title, body) = self.render(&message);
            match self.build_notification(&title, &body).show() {
                Ok(_) => debug!(%title, "notification sent"),
                Err(error) => warn!(%error, %title, "failed to show notification"),
            }
        }

        debug!("notifier actor stopped");
    }

    fn render(&self, message: &NotifierMessage) -> (String, String) {
        match message {
            NotifierMessage::FocusComplete { reward, next } => {
                let reward = reward.to_string();
                let next = self.translator.get(next.label_key()).to_lowercase();
                (
                    self.translator.get("notification.focus_complete_title"),
                    self.translator.format(
                        "notification.focus_complete_body",
                        &[("reward", reward.as_str()), ("next", next.as_str())],
                    ),
                )
            }
            NotifierMessage::BreakOver => (
                self.translator.get("notification.break_over_title"),
                self.translator.get("notification.break_over_body"),
            ),
        }
    }

    fn build_notification(&self, summary: &str, body: &str) -> Notification {
        let mut notification = Notification::new();
        notification
            .summary(summary)
            .body(body)
            .urgency(self.urgency)
            .appname("Ludo");

        if self.sound_enabled {
            notification.sound_name("complete");
        }

        notification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludo_core::Language;

    #[test]
    fn focus_completion_mentions_reward_and_break() {
        let (actor, _handle) =
            NotifierActor::new(NotificationUrgency::Normal, false, Translator::default());

        let (title, body) = actor.render(&NotifierMessage::FocusComplete {
            reward: 1,
            next: TimerMode::LongBreak,
        });

        assert_eq!(title, "Focus session complete");
        assert_eq!(body, "+1 chip. Time for a long break.");
    }

    #[test]
    fn messages_follow_configured_language() {
        let (actor, _handle) = NotifierActor::new(
            NotificationUrgency::Low,
            false,
            Translator::new(Language::Es),
        );

        let (title, _) = actor.render(&NotifierMessage::BreakOver);

        assert_eq!(title, "Fin del descanso");
    }

    #[tokio::test]
    async fn handle_can_send_messages() {
        let (actor, handle) =
            NotifierActor::new(NotificationUrgency::Normal, false, Translator::default());

        let actor_task = tokio::spawn(async move {
            tokio::time::timeout(std::time::Duration::from_millis(100), actor.run()).await
        });

        handle.send_focus_complete(1, TimerMode::ShortBreak);
        handle.send_break_over();

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        drop(handle);

        let _ = actor_task.await;
    }
}
