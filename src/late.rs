//! Late mode: sustained alert once the deadline has passed.

use tracing::info;

use crate::messages::Messages;

/// Spoken repeat cadence while late.
pub const LATE_REPEAT_SECS: i64 = 10;

/// What the session should do for one late tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LateTick {
    pub seconds_late: i64,
    /// True on the first late tick after counting down.
    pub entered: bool,
    pub banner: String,
    pub repeat: Option<String>,
}

#[derive(Default)]
pub struct LateHandler {
    active: bool,
}

impl LateHandler {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn handle(&mut self, seconds_late: i64, messages: &Messages) -> LateTick {
        let entered = !self.active;
        if entered {
            info!("Deadline passed, entering late mode");
        }
        self.active = true;

        let repeat = (seconds_late % LATE_REPEAT_SECS == 0).then(|| messages.late_repeat());

        LateTick {
            seconds_late,
            entered,
            banner: messages.late_banner(),
            repeat,
        }
    }

    /// Leave late mode. Returns whether it was active.
    pub fn clear(&mut self) -> bool {
        let was_active = self.active;
        if was_active {
            info!("Countdown is back above zero, leaving late mode");
        }
        self.active = false;
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Language;

    #[test]
    fn test_first_late_second_is_silent() {
        let msgs = Messages::new(Language::English);
        let mut late = LateHandler::new();

        let tick = late.handle(1, &msgs);
        assert!(tick.entered);
        assert!(tick.repeat.is_none());
        assert!(late.is_active());

        let tick = late.handle(2, &msgs);
        assert!(!tick.entered);
    }

    #[test]
    fn test_repeats_every_ten_seconds() {
        let msgs = Messages::new(Language::English);
        let mut late = LateHandler::new();

        let spoken: Vec<i64> = (1..=35)
            .filter(|&s| late.handle(s, &msgs).repeat.is_some())
            .collect();
        assert_eq!(spoken, [10, 20, 30]);
    }

    #[test]
    fn test_clear_reports_previous_state() {
        let msgs = Messages::new(Language::English);
        let mut late = LateHandler::new();
        assert!(!late.clear());

        late.handle(4, &msgs);
        assert!(late.clear());
        assert!(!late.is_active());
    }
}
