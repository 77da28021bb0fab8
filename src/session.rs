//! Countdown session: the per-second tick and the loop that drives it.
//!
//! COUNTING → LATE (and back, if the clock ever moves backwards)

use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::alarm::ToneAlarm;
use crate::announcer::Announcer;
use crate::countdown::{self, Clock, TargetTime};
use crate::gallery::Gallery;
use crate::late::{LateHandler, LateTick};
use crate::messages::Messages;
use crate::notifier::VisualNotifier;
use crate::profile::IntensityProfile;
use crate::scheduler::{NagEvent, NagScheduler};

const LATE_COUNTDOWN: &str = "LATE!";

#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub locale: String,
    pub rate: f32,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Counting {
        seconds_remaining: i64,
        nag: Option<NagEvent>,
    },
    Late(LateTick),
}

pub struct Session {
    target: TargetTime,
    profile: &'static IntensityProfile,
    messages: Messages,
    speech: SpeechSettings,
    scheduler: NagScheduler,
    late: LateHandler,
    gallery: Gallery,
    announcer: Box<dyn Announcer>,
    notifier: Box<dyn VisualNotifier>,
    alarm: Option<ToneAlarm>,
}

impl Session {
    pub fn new(
        target: TargetTime,
        profile: &'static IntensityProfile,
        messages: Messages,
        speech: SpeechSettings,
        gallery: Gallery,
        announcer: Box<dyn Announcer>,
        notifier: Box<dyn VisualNotifier>,
    ) -> Self {
        Self {
            target,
            profile,
            messages,
            speech,
            scheduler: NagScheduler::new(),
            late: LateHandler::new(),
            gallery,
            announcer,
            notifier,
            alarm: None,
        }
    }

    pub fn with_alarm(mut self, alarm: Option<ToneAlarm>) -> Self {
        self.alarm = alarm;
        self
    }

    #[cfg(test)]
    pub fn is_late(&self) -> bool {
        self.late.is_active()
    }

    /// Announce the session start.
    pub fn start(&mut self) {
        info!(
            "Countdown to {} started (profile: {})",
            self.target, self.profile.name
        );
        let text = self.messages.session_start();
        self.speak(&text);
    }

    /// Evaluate one second of the countdown at `now`.
    pub fn tick(&mut self, now: NaiveDateTime) -> TickOutcome {
        let remaining = countdown::seconds_remaining(now, self.target);

        if remaining < 0 {
            return TickOutcome::Late(self.tick_late(now, remaining.abs()));
        }

        if self.late.clear() {
            self.notifier.set_late_mode(false);
            if let Some(alarm) = self.alarm.as_mut() {
                alarm.silence();
            }
        }

        let nag = self
            .scheduler
            .evaluate(remaining, now.time(), self.profile, &self.messages);

        if let Some(event) = &nag {
            info!("Nag [{}]: {}", event.phase, event.message);
            self.speak(&event.message);
            let image = self.gallery.pick();
            self.notifier.show(&event.message, image);
        }

        self.notifier
            .render_countdown(now.time(), &countdown::format_countdown(remaining));

        TickOutcome::Counting {
            seconds_remaining: remaining,
            nag,
        }
    }

    fn tick_late(&mut self, now: NaiveDateTime, seconds_late: i64) -> LateTick {
        let tick = self.late.handle(seconds_late, &self.messages);

        if tick.entered {
            self.notifier.set_late_mode(true);
        }
        let image = self.gallery.pick();
        self.notifier.show(&tick.banner, image);
        self.notifier.render_countdown(now.time(), LATE_COUNTDOWN);

        if let Some(alarm) = self.alarm.as_mut() {
            alarm.pulse();
        }

        if let Some(repeat) = &tick.repeat {
            info!("Late by {seconds_late}s: {repeat}");
            self.speak(repeat);
        }

        tick
    }

    fn speak(&mut self, text: &str) {
        self.announcer
            .speak(text, &self.speech.locale, self.speech.rate);
    }

    /// Tick once per second until Ctrl-C.
    pub async fn run(mut self, clock: impl Clock) {
        self.start();

        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.tick(clock.now()) {
                        TickOutcome::Counting { seconds_remaining, nag } => {
                            debug!("Tick: {seconds_remaining}s left, nag={}", nag.is_some());
                        }
                        TickOutcome::Late(tick) => {
                            debug!("Tick: {}s late", tick.seconds_late);
                        }
                    }
                }
                _ = &mut shutdown => {
                    println!();
                    info!("Interrupted, stopping countdown");
                    break;
                }
            }
        }

        self.announcer.cancel();
        if let Some(alarm) = self.alarm.as_mut() {
            alarm.silence();
        }
    }
}
