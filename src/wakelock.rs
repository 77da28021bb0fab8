//! Keeps the machine from idling or sleeping while the countdown runs.
//!
//! Holds a `systemd-inhibit` child for the session; the inhibitor lock is
//! released when the child is killed on drop.

use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{info, warn};

pub struct WakeLock {
    _child: Child,
}

impl WakeLock {
    pub fn acquire(why: &str) -> Option<Self> {
        let why = format!("--why={why}");
        let spawned = Command::new("systemd-inhibit")
            .args([
                "--what=idle:sleep",
                "--who=morning-nag",
                why.as_str(),
                "--mode=block",
                "sleep",
                "infinity",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        match spawned {
            Ok(child) => {
                info!("Wake lock acquired");
                Some(Self { _child: child })
            }
            Err(e) => {
                warn!("Failed to acquire wake lock: {e}");
                None
            }
        }
    }
}
