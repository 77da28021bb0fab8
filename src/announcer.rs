//! Spoken announcements through an external speech synthesizer.
//!
//! Only one utterance is ever in flight: each `speak` kills whatever the
//! previous call started before spawning the next one.

use std::io::ErrorKind;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::config::SpeechConfig;

/// espeak-ng's default speaking rate in words per minute.
const BASE_WPM: f32 = 175.0;

pub trait Announcer {
    /// Speak `text`, superseding anything still being spoken. Never blocks.
    fn speak(&mut self, text: &str, locale: &str, rate: f32);

    /// Stop the current utterance, if any.
    fn cancel(&mut self) {}
}

/// Used when speech is disabled: reminders stay visual only.
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn speak(&mut self, text: &str, _locale: &str, _rate: f32) {
        debug!("Speech muted: {text}");
    }
}

/// Speaks through an espeak-compatible command line synthesizer.
pub struct SpeechAnnouncer {
    command: String,
    voice: String,
    current: Option<Child>,
    available: bool,
}

impl SpeechAnnouncer {
    pub fn new(config: &SpeechConfig) -> Self {
        info!("Speech via '{}' (locale {}, rate {})", config.command, config.locale, config.rate);
        Self {
            command: config.command.clone(),
            voice: config.voice.trim().to_string(),
            current: None,
            available: true,
        }
    }

    #[cfg(test)]
    pub fn is_available(&self) -> bool {
        self.available
    }

    fn args(&self, text: &str, locale: &str, rate: f32) -> Vec<String> {
        let voice = if self.voice.is_empty() {
            voice_for_locale(locale)
        } else {
            self.voice.clone()
        };
        vec![
            "-v".into(),
            voice,
            "-s".into(),
            words_per_minute(rate).to_string(),
            text.into(),
        ]
    }
}

impl Announcer for SpeechAnnouncer {
    fn speak(&mut self, text: &str, locale: &str, rate: f32) {
        if !self.available || text.trim().is_empty() {
            return;
        }

        self.cancel();

        let spawned = Command::new(&self.command)
            .args(self.args(text, locale, rate))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        match spawned {
            Ok(child) => {
                debug!("Speaking: {text}");
                self.current = Some(child);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Speech command '{}' not found, continuing without voice output",
                    self.command
                );
                self.available = false;
            }
            Err(e) => warn!("Failed to start speech: {e}"),
        }
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            // Already-finished children just report an error here.
            if child.start_kill().is_ok() {
                debug!("Previous utterance cancelled");
            }
        }
    }
}

impl Drop for SpeechAnnouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Map a BCP 47 locale onto an espeak-ng voice name.
pub fn voice_for_locale(locale: &str) -> String {
    let locale = locale.trim().to_ascii_lowercase();
    match locale.as_str() {
        "" => "en-us".into(),
        "zh-hk" => "yue".into(),
        l if l.starts_with("zh") => "cmn".into(),
        l => l.replace('_', "-"),
    }
}

fn words_per_minute(rate: f32) -> u32 {
    let rate = if rate.is_finite() && rate > 0.0 { rate } else { 1.0 };
    (BASE_WPM * rate).round() as u32
}
