//! Named nagging intensity profiles.

use tracing::warn;

/// Reminder cadences for each urgency phase.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityProfile {
    pub name: &'static str,
    /// Cadence while 20+ minutes out.
    pub long_interval_minutes: f64,
    /// Cadence between 5 and 20 minutes out. May be fractional (0.5 = every 30s).
    pub medium_interval_minutes: f64,
    /// Cadence inside the last 5 minutes.
    pub short_interval_seconds: u32,
}

pub const DEFAULT_PROFILE: &str = "standard";

pub static PROFILES: [IntensityProfile; 3] = [
    IntensityProfile {
        name: "standard",
        long_interval_minutes: 5.0,
        medium_interval_minutes: 1.0,
        short_interval_seconds: 30,
    },
    IntensityProfile {
        name: "gentle",
        long_interval_minutes: 10.0,
        medium_interval_minutes: 5.0,
        short_interval_seconds: 60,
    },
    IntensityProfile {
        name: "hell",
        long_interval_minutes: 2.0,
        medium_interval_minutes: 0.5,
        short_interval_seconds: 10,
    },
];

impl IntensityProfile {
    pub fn lookup(name: &str) -> Option<&'static IntensityProfile> {
        let name = name.trim();
        PROFILES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Look up `name`, falling back to the standard profile.
    pub fn resolve(name: &str) -> &'static IntensityProfile {
        Self::lookup(name).unwrap_or_else(|| {
            let known: Vec<_> = Self::names().collect();
            warn!(
                "Unknown intensity profile '{name}' (expected one of {}), using '{DEFAULT_PROFILE}'",
                known.join(", ")
            );
            &PROFILES[0]
        })
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        PROFILES.iter().map(|p| p.name)
    }

    pub fn long_cadence_secs(&self) -> i64 {
        minutes_to_secs(self.long_interval_minutes)
    }

    pub fn medium_cadence_secs(&self) -> i64 {
        minutes_to_secs(self.medium_interval_minutes)
    }

    pub fn short_cadence_secs(&self) -> i64 {
        i64::from(self.short_interval_seconds.max(1))
    }
}

fn minutes_to_secs(minutes: f64) -> i64 {
    ((minutes * 60.0).round() as i64).max(1)
}
