//! Phase classification and the once-per-second nag decision.
//!
//! Every cadence is reduced to a number of seconds and a reminder fires when
//! the remaining time is an exact multiple of it. For whole-minute cadences
//! this is the same as "minutes divisible by the interval, on second zero";
//! fractional cadences (e.g. 0.5 min) fall out of the same rule without a
//! special case.

use std::fmt;

use chrono::NaiveTime;
use tracing::debug;

use crate::messages::Messages;
use crate::profile::IntensityProfile;

/// At or above this many minutes the countdown is in the far phase.
pub const FAR_PHASE_MINUTES: i64 = 20;
/// Below this many minutes the countdown is in the near phase.
pub const NEAR_PHASE_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Far,
    Mid,
    Near,
}

impl Phase {
    pub fn classify(total_minutes: i64) -> Self {
        if total_minutes >= FAR_PHASE_MINUTES {
            Self::Far
        } else if total_minutes >= NEAR_PHASE_MINUTES {
            Self::Mid
        } else {
            Self::Near
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Far => write!(f, "FAR"),
            Self::Mid => write!(f, "MID"),
            Self::Near => write!(f, "NEAR"),
        }
    }
}

/// A reminder to be spoken and shown right away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NagEvent {
    pub phase: Phase,
    pub message: String,
}

pub struct NagScheduler {
    /// Second-within-minute of the last evaluation; -1 before the first.
    last_second: i64,
}

impl Default for NagScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl NagScheduler {
    pub fn new() -> Self {
        Self { last_second: -1 }
    }

    #[cfg(test)]
    pub fn last_second(&self) -> i64 {
        self.last_second
    }

    /// Decide whether a nag fires for `seconds_remaining`.
    ///
    /// `clock` is only used for the wording of far-phase reminders. Negative
    /// input belongs to the late handler and never fires here.
    pub fn evaluate(
        &mut self,
        seconds_remaining: i64,
        clock: NaiveTime,
        profile: &IntensityProfile,
        messages: &Messages,
    ) -> Option<NagEvent> {
        if seconds_remaining < 0 {
            return None;
        }

        let total_minutes = seconds_remaining / 60;
        let second = seconds_remaining % 60;

        if second == self.last_second {
            return None;
        }
        self.last_second = second;

        let phase = Phase::classify(total_minutes);
        let message = match phase {
            Phase::Far => {
                let cadence = profile.long_cadence_secs();
                (seconds_remaining % cadence == 0).then(|| messages.far(clock, total_minutes))
            }
            Phase::Mid => {
                let cadence = profile.medium_cadence_secs();
                (seconds_remaining % cadence == 0).then(|| {
                    if cadence < 60 {
                        messages.mid_fast(total_minutes)
                    } else {
                        messages.mid_now(total_minutes)
                    }
                })
            }
            Phase::Near => {
                let cadence = profile.short_cadence_secs();
                (second % cadence == 0).then(|| match (total_minutes, second) {
                    (0, 0) => messages.deadline(),
                    (0, s) => messages.near_seconds(s),
                    (m, _) => messages.near_minutes(m),
                })
            }
        };

        debug!(
            "Nag check: {total_minutes}m {second:02}s phase={phase} fire={}",
            message.is_some()
        );

        message.map(|message| NagEvent { phase, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Language;

    fn clock() -> NaiveTime {
        NaiveTime::from_hms_opt(7, 35, 0).unwrap()
    }

    fn eval(profile: &str, minutes: i64, second: i64) -> Option<NagEvent> {
        let profile = IntensityProfile::lookup(profile).unwrap();
        let messages = Messages::new(Language::English);
        NagScheduler::new().evaluate(minutes * 60 + second, clock(), profile, &messages)
    }

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(Phase::classify(120), Phase::Far);
        assert_eq!(Phase::classify(20), Phase::Far);
        assert_eq!(Phase::classify(19), Phase::Mid);
        assert_eq!(Phase::classify(5), Phase::Mid);
        assert_eq!(Phase::classify(4), Phase::Near);
        assert_eq!(Phase::classify(0), Phase::Near);
    }

    #[test]
    fn test_standard_far_phase_fires_on_interval() {
        let event = eval("standard", 25, 0).expect("should fire");
        assert_eq!(event.phase, Phase::Far);
        assert!(event.message.contains("25"));
        assert!(event.message.contains("7:35"));

        assert!(eval("standard", 24, 0).is_none());
        assert!(eval("standard", 25, 1).is_none());
    }

    #[test]
    fn test_hell_near_phase_every_ten_seconds() {
        let event = eval("hell", 3, 10).expect("should fire");
        assert_eq!(event.phase, Phase::Near);
        assert_eq!(event.message, "Almost late. 3 minutes left!");

        assert!(eval("hell", 3, 15).is_none());
    }

    #[test]
    fn test_gentle_mid_phase_minute_cadence() {
        let event = eval("gentle", 10, 0).expect("should fire");
        assert_eq!(event.phase, Phase::Mid);
        assert!(event.message.contains("Move now"));

        assert!(eval("gentle", 9, 0).is_none());
    }

    #[test]
    fn test_hell_mid_phase_sub_minute_cadence() {
        let event = eval("hell", 12, 30).expect("should fire");
        assert!(event.message.contains("Move fast"));
        assert!(event.message.contains("12"));

        assert!(eval("hell", 12, 0).is_some());
        assert!(eval("hell", 12, 15).is_none());
    }

    #[test]
    fn test_final_minute_reports_seconds() {
        let event = eval("standard", 0, 30).expect("should fire");
        assert_eq!(event.message, "Last 30 seconds. Run!");
    }

    #[test]
    fn test_deadline_second_does_not_say_zero_seconds() {
        let event = eval("standard", 0, 0).expect("should fire");
        assert_eq!(event.phase, Phase::Near);
        assert_eq!(event.message, "Time's up. Out the door!");
    }

    #[test]
    fn test_same_second_is_deduplicated() {
        let profile = IntensityProfile::lookup("standard").unwrap();
        let messages = Messages::new(Language::English);
        let mut scheduler = NagScheduler::new();
        assert_eq!(scheduler.last_second(), -1);

        assert!(scheduler.evaluate(25 * 60, clock(), profile, &messages).is_some());
        assert!(scheduler.evaluate(25 * 60, clock(), profile, &messages).is_none());
        assert_eq!(scheduler.last_second(), 0);

        assert!(scheduler.evaluate(25 * 60 - 1, clock(), profile, &messages).is_none());
        assert_eq!(scheduler.last_second(), 59);
    }

    #[test]
    fn test_negative_remaining_never_fires() {
        let profile = IntensityProfile::lookup("hell").unwrap();
        let messages = Messages::new(Language::English);
        let mut scheduler = NagScheduler::new();
        assert!(scheduler.evaluate(-10, clock(), profile, &messages).is_none());
        assert_eq!(scheduler.last_second(), -1);
    }

    #[test]
    fn test_full_standard_countdown() {
        let profile = IntensityProfile::lookup("standard").unwrap();
        let messages = Messages::new(Language::English);
        let mut scheduler = NagScheduler::new();

        let events: Vec<NagEvent> = (0..=30 * 60)
            .rev()
            .filter_map(|s| scheduler.evaluate(s, clock(), profile, &messages))
            .collect();

        let count = |phase: Phase| events.iter().filter(|e| e.phase == phase).count();
        assert_eq!(count(Phase::Far), 3); // 30, 25, 20
        assert_eq!(count(Phase::Mid), 15); // every minute 19..=5
        assert_eq!(count(Phase::Near), 10); // every 30s under 5 minutes
    }
}
