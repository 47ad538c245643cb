use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::docker::Engine;
use crate::error::SetupError;
use crate::host::{Host, Sleeper};

use super::commands::desktop_launch_command;
use super::types::DaemonStatus;

/// Fixed-interval polling with a hard attempt ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.daemon_poll_interval(), cfg.daemon_poll_attempts)
    }

    /// Call `check` until it returns `true`, sleeping `interval` between
    /// calls. Returns the attempt that succeeded, or `None` once
    /// `max_attempts` checks have failed. No sleep follows the last check.
    pub fn poll(&self, sleeper: &dyn Sleeper, mut check: impl FnMut() -> bool) -> Option<u32> {
        for attempt in 1..=self.max_attempts {
            if check() {
                return Some(attempt);
            }
            debug!(attempt, max = self.max_attempts, "not ready yet");
            if attempt < self.max_attempts {
                sleeper.sleep(self.interval);
            }
        }
        None
    }
}

/// Make sure the daemon answers, starting Docker Desktop and polling
/// `docker info` if it does not.
pub fn ensure_daemon(
    engine: &Engine<'_>,
    host: &Host<'_>,
    cfg: &Config,
) -> Result<DaemonStatus, SetupError> {
    if engine.is_ready() {
        info!("docker daemon is running");
        return Ok(DaemonStatus {
            already_running: true,
            launched: false,
            attempts: 0,
        });
    }

    info!("docker daemon is not running; starting Docker Desktop");
    host.runner
        .spawn_detached(&desktop_launch_command(cfg))
        .map_err(|source| SetupError::DaemonLaunch {
            path: cfg.docker_desktop_path.clone(),
            source,
        })?;

    info!("waiting for docker daemon to be available");
    let policy = RetryPolicy::from_config(cfg);
    match policy.poll(host.sleeper, || engine.is_ready()) {
        Some(attempts) => {
            info!(attempts, "docker daemon is now running");
            Ok(DaemonStatus {
                already_running: false,
                launched: true,
                attempts,
            })
        }
        None => {
            warn!("docker daemon did not start in time");
            Err(SetupError::DaemonTimeout {
                attempts: policy.max_attempts,
            })
        }
    }
}
