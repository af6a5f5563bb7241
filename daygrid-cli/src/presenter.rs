//! Desktop notification presenter.

use daygrid_core::schedule::Notifier;
use notify_rust::{Notification, Timeout};
use owo_colors::OwoColorize;
use tracing::warn;

/// How long the popup stays up before auto-dismissing.
const POPUP_TIMEOUT_MS: u32 = 5_000;

/// Presents reminders as a terminal line plus a desktop notification with
/// an optional sound hint. Display and sound failures are logged, never
/// propagated.
pub struct DesktopPresenter {
    sound: Option<String>,
}

impl DesktopPresenter {
    pub fn new(sound: Option<String>) -> Self {
        DesktopPresenter { sound }
    }
}

impl Notifier for DesktopPresenter {
    fn notify(&self, title: &str, time: &str) {
        println!(
            "  {} {}",
            "Reminder:".bold(),
            format!("\"{}\" at {}", title, time)
        );

        let mut notification = Notification::new();
        notification
            .summary("daygrid reminder")
            .body(&format!("\"{}\" at {}", title, time))
            .timeout(Timeout::Milliseconds(POPUP_TIMEOUT_MS));

        if let Some(sound) = &self.sound {
            notification.sound_name(sound);
        }

        if let Err(err) = notification.show() {
            warn!(error = %err, "failed to show reminder notification");
        }
    }
}
