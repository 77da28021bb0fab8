//! Configuration management for morning-nag.
//!
//! Loads config from YAML files in standard locations. Every section is
//! optional and falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::countdown::TargetTime;
use crate::error::NagError;
use crate::profile::DEFAULT_PROFILE;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Deadline as "HH:MM". Required before a session can start.
    pub time: Option<String>,
    pub profile: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            time: None,
            profile: DEFAULT_PROFILE.into(),
        }
    }
}

impl TargetConfig {
    pub fn target_time(&self) -> Result<TargetTime, NagError> {
        self.time
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(NagError::MissingTarget)?
            .parse()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub command: String,
    pub locale: String,
    pub rate: f32,
    /// Synthesizer voice; derived from `locale` when empty.
    pub voice: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "espeak-ng".into(),
            locale: "en-US".into(),
            rate: 1.1,
            voice: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub timeout_ms: u32,
    /// Icon names or image paths, one picked at random per reminder.
    pub images: Vec<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 8000,
            images: vec![
                "alarm-symbolic".into(),
                "appointment-soon".into(),
                "dialog-warning".into(),
                "face-worried".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlarmConfig {
    pub enabled: bool,
    pub frequency_hz: f32,
    pub volume: f32,
    pub beep_ms: u64,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_hz: 880.0,
            volume: 0.2,
            beep_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub target: TargetConfig,
    pub speech: SpeechConfig,
    pub notifications: NotificationConfig,
    pub alarm: AlarmConfig,
    pub keep_awake: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            speech: SpeechConfig::default(),
            notifications: NotificationConfig::default(),
            alarm: AlarmConfig::default(),
            keep_awake: true,
        }
    }
}

impl Config {
    /// Find the config file to use.
    ///
    /// An explicit path always wins. Otherwise the first existing file of:
    /// 1. ./config.yaml
    /// 2. ~/.config/morning-nag/config.yaml
    /// 3. /etc/morning-nag/config.yaml
    pub fn locate(path: Option<&Path>) -> Option<PathBuf> {
        path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir().ok().map(|d| d.join("config.yaml")),
                dirs::config_dir().map(|c| c.join("morning-nag/config.yaml")),
                Some(PathBuf::from("/etc/morning-nag/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        })
    }

    /// Where `--save` writes when no config file exists yet.
    pub fn user_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("morning-nag/config.yaml")
    }

    /// Load configuration from YAML, falling back to defaults on any error.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(config_path) = Self::locate(path) else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match serde_yml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", config_path.display());
                Self::default()
            }
        }
    }

    /// Write the whole config back to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), NagError> {
        let yaml = serde_yml::to_string(self)?;
        let write_err = |source| NagError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, yaml).map_err(write_err)?;

        info!("Saved settings to {}", path.display());
        Ok(())
    }
}
