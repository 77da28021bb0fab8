//! Offline dry run of a whole countdown: which reminders a profile produces
//! and when, without speaking or waiting.

use std::fmt;

use chrono::TimeDelta;

use crate::countdown::{format_countdown, TargetTime};
use crate::late::LateHandler;
use crate::messages::Messages;
use crate::profile::IntensityProfile;
use crate::scheduler::NagScheduler;

/// How far past the deadline the preview keeps going.
pub const LATE_PREVIEW_SECS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    /// Seconds remaining; negative once late.
    pub remaining: i64,
    pub label: String,
    pub message: String,
}

impl fmt::Display for PreviewLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.remaining < 0 { '+' } else { '-' };
        write!(
            f,
            "T{sign}{:>7}  {:<4}  {}",
            format_countdown(self.remaining.abs()),
            self.label,
            self.message
        )
    }
}

/// Run a `minutes`-long countdown to `target` second by second.
pub fn simulate(
    target: TargetTime,
    profile: &IntensityProfile,
    messages: &Messages,
    minutes: u32,
) -> Vec<PreviewLine> {
    let deadline = target.as_time();
    let mut scheduler = NagScheduler::new();
    let mut late = LateHandler::new();
    let mut lines = Vec::new();

    for remaining in (-LATE_PREVIEW_SECS..=i64::from(minutes) * 60).rev() {
        if remaining < 0 {
            if let Some(message) = late.handle(-remaining, messages).repeat {
                lines.push(PreviewLine {
                    remaining,
                    label: "LATE".into(),
                    message,
                });
            }
            continue;
        }

        let clock = deadline - TimeDelta::seconds(remaining);
        if let Some(event) = scheduler.evaluate(remaining, clock, profile, messages) {
            lines.push(PreviewLine {
                remaining,
                label: event.phase.to_string(),
                message: event.message,
            });
        }
    }

    lines
}
