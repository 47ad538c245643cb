use std::path::PathBuf;

use thiserror::Error;

/// Classified failures of the setup sequence. Each variant maps to a
/// stable process exit code.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("setup cancelled by user")]
    Cancelled,

    #[error("administrator privileges are required for first-run setup; re-run as Administrator")]
    NotElevated,

    #[error("failed to download {what} from {url}")]
    Download {
        what: &'static str,
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{what} installation failed: {detail}")]
    Install { what: &'static str, detail: String },

    #[error("failed to launch Docker Desktop at {}", path.display())]
    DaemonLaunch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("docker daemon did not become ready after {attempts} checks")]
    DaemonTimeout { attempts: u32 },

    #[error("`{command}` failed: {detail}")]
    Command { command: String, detail: String },

    #[error("not ready: {0}")]
    NotReady(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetupError {
    pub fn exit_code(&self) -> u8 {
        match self {
            SetupError::Other(_) => 1,
            SetupError::Cancelled => 2,
            SetupError::NotElevated => 3,
            SetupError::Download { .. } => 4,
            SetupError::Install { .. } => 5,
            SetupError::DaemonLaunch { .. } => 6,
            SetupError::DaemonTimeout { .. } => 7,
            SetupError::Command { .. } => 8,
            SetupError::NotReady(_) => 9,
        }
    }
}
