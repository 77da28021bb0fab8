//! Visual output: a live countdown line on the terminal plus desktop
//! notifications via notify-rust (D-Bus).

use std::io::{IsTerminal, Write};

use chrono::{NaiveTime, Timelike};
use notify_rust::{Notification, Timeout, Urgency};
use tracing::{debug, warn};

use crate::config::NotificationConfig;
use crate::countdown::TargetTime;

pub trait VisualNotifier {
    /// Show a reminder with an optional gallery image.
    fn show(&mut self, message: &str, image: Option<&str>);
    fn set_late_mode(&mut self, late: bool);
    /// Refresh the clock and countdown readout. Called every tick.
    fn render_countdown(&mut self, clock: NaiveTime, countdown: &str);
}

pub struct DesktopNotifier {
    enabled: bool,
    timeout_ms: u32,
    target: TargetTime,
    late: bool,
    status: String,
    /// Notification currently on screen, replaced in place by the next one.
    shown_id: Option<u32>,
    shown_text: Option<String>,
    terminal: bool,
}

impl DesktopNotifier {
    pub fn new(config: &NotificationConfig, target: TargetTime) -> Self {
        Self {
            enabled: config.enabled,
            timeout_ms: config.timeout_ms,
            target,
            late: false,
            status: String::new(),
            shown_id: None,
            shown_text: None,
            terminal: std::io::stdout().is_terminal(),
        }
    }

    fn post(&mut self, message: &str, image: Option<&str>) {
        if !should_post(self.late, self.shown_text.as_deref(), message) {
            return;
        }

        let (summary, urgency, timeout) = if self.late {
            ("LATE!", Urgency::Critical, Timeout::Never)
        } else {
            ("morning-nag", Urgency::Normal, Timeout::Milliseconds(self.timeout_ms))
        };

        let mut notification = Notification::new();
        notification
            .summary(summary)
            .body(message)
            .icon(image.unwrap_or("alarm-symbolic"))
            .urgency(urgency)
            .timeout(timeout);
        if let Some(id) = self.shown_id {
            notification.id(id);
        }

        match notification.show() {
            Ok(handle) => {
                self.shown_id = Some(handle.id());
                self.shown_text = Some(message.to_string());
            }
            Err(e) => warn!("Failed to show notification: {e}"),
        }
    }

    fn redraw(&self, line: &str) {
        if !self.terminal {
            return;
        }
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\x1b[2K\r{line}");
        let _ = out.flush();
    }
}

impl VisualNotifier for DesktopNotifier {
    fn show(&mut self, message: &str, image: Option<&str>) {
        self.status = message.to_string();

        if self.enabled {
            self.post(message, image);
        }
    }

    fn set_late_mode(&mut self, late: bool) {
        if self.late == late {
            return;
        }
        debug!("Late mode display: {late}");
        self.late = late;
        // Re-post so urgency follows the mode.
        self.shown_text = None;
        if !late {
            self.status.clear();
        }
    }

    fn render_countdown(&mut self, clock: NaiveTime, countdown: &str) {
        let line = status_line(clock, self.target, countdown, &self.status);
        self.redraw(&line);
    }
}

/// Late mode shows the same banner every tick; only post it when it changes.
/// Every reminder while counting down is posted, even if its text repeats.
fn should_post(late: bool, shown: Option<&str>, message: &str) -> bool {
    !late || shown != Some(message)
}

pub fn status_line(clock: NaiveTime, target: TargetTime, countdown: &str, status: &str) -> String {
    let mut line = format!(
        "now {:02}:{:02} | target {target} | {countdown}",
        clock.hour(),
        clock.minute()
    );
    if !status.is_empty() {
        line.push_str(" | ");
        line.push_str(status);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_reminder_is_posted_again() {
        let text = "Almost late. 3 minutes left!";
        assert!(should_post(false, None, text));
        assert!(should_post(false, Some(text), text));
    }

    #[test]
    fn test_late_banner_posted_once() {
        let banner = "You're late! Get out the door!";
        assert!(should_post(true, None, banner));
        assert!(should_post(true, Some("Time's up. Out the door!"), banner));
        assert!(!should_post(true, Some(banner), banner));
    }

    #[test]
    fn test_status_line() {
        let clock = NaiveTime::from_hms_opt(7, 4, 59).unwrap();
        let target = TargetTime::new(7, 30).unwrap();

        assert_eq!(
            status_line(clock, target, "25:01", ""),
            "now 07:04 | target 07:30 | 25:01"
        );
        assert_eq!(
            status_line(clock, target, "LATE!", "Get out the door!"),
            "now 07:04 | target 07:30 | LATE! | Get out the door!"
        );
    }
}
