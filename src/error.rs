//! Start-up errors. Anything that goes wrong after the session starts is
//! logged and swallowed instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NagError {
    #[error("no target time set: pass --at HH:MM or set target.time in config.yaml")]
    MissingTarget,

    #[error("invalid target time '{0}': expected HH:MM (00:00-23:59)")]
    InvalidTarget(String),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] serde_yml::Error),

    #[error("failed to write config {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
