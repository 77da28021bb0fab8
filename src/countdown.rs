//! Countdown arithmetic against today's target time.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime};

use crate::error::NagError;

/// Wall-clock deadline for today. No date component: it is re-anchored to
/// whatever day `now` falls on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetTime {
    hour: u32,
    minute: u32,
}

impl TargetTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, NagError> {
        if hour > 23 || minute > 59 {
            return Err(NagError::InvalidTarget(format!("{hour}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    pub fn as_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for TargetTime {
    type Err = NagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NagError::InvalidTarget(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for TargetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Source of the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Whole seconds from `now` until today's target, floored. Negative once late.
pub fn seconds_remaining(now: NaiveDateTime, target: TargetTime) -> i64 {
    let deadline = now.date().and_time(target.as_time());
    (deadline - now).num_milliseconds().div_euclid(1000)
}

/// `H:MM:SS` with at least an hour left, `MM:SS` otherwise.
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;

    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}
