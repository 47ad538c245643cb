use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const FIRST_RUN_MESSAGE: &str = "\
It looks like this is the first time Wrangler has been run on this system.

First-run setup needs administrator privileges. Close this window and re-run
summon-wrangler as Administrator (right click the executable and select
\"Run as Administrator\").

Wrangler runs its tasks in Docker, so setup will:
- enable WSL2 and install or update its kernel (lets Windows run containers)
- install Docker Desktop (manages containers)

Once first-run setup completes:
1. Reboot so WSL2 can finish activating.
2. Open Docker Desktop once and accept its EULA; this cannot be automated.

After that, summon-wrangler no longer needs administrator privileges.";

/// How the first-run dialog is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    /// Windows message box, shown through PowerShell.
    Native,
    /// Prompt on the controlling terminal.
    Terminal,
}

impl DialogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Native => "native",
            DialogKind::Terminal => "terminal",
        }
    }
}

impl Default for DialogKind {
    fn default() -> Self {
        if cfg!(windows) {
            DialogKind::Native
        } else {
            DialogKind::Terminal
        }
    }
}

/// The container that must be running once setup finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub name: String,
    pub image: String,
    pub host_port: u16,
    pub container_port: u16,
    /// Engine socket bind-mounted into the container at the same path.
    pub socket_mount: Option<String>,
    /// Run with `-it` (interactive, TTY).
    pub interactive: bool,
    /// Passed to `sh -c` inside the container.
    pub command: String,
}

impl ContainerConfig {
    /// Local URL of the container's web UI.
    pub fn ui_url(&self) -> String {
        format!("http://localhost:{}", self.host_port)
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: "container-wrangler".to_string(),
            image: "griff85/wrangler:version1".to_string(),
            host_port: 8501,
            container_port: 8501,
            socket_mount: Some("/var/run/docker.sock".to_string()),
            interactive: true,
            command: "streamlit run /home/wrangler.py --server.port=8501".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub docker_bin: String,
    pub docker_desktop_path: PathBuf,
    pub docker_installer_url: String,
    pub installer_name: String,
    /// Seconds to wait after the installer returns.
    pub install_settle: u64,
    pub wsl_kernel_url: String,
    pub windows_features: Vec<String>,
    /// Seconds between daemon readiness checks.
    pub daemon_poll_interval: u64,
    pub daemon_poll_attempts: u32,
    /// Download timeout in seconds; unset means no limit.
    pub download_timeout: Option<u64>,
    pub open_browser: bool,
    pub dialog: DialogKind,
    pub first_run_title: String,
    pub first_run_message: String,
    pub container: ContainerConfig,
}

impl Config {
    pub fn install_settle(&self) -> Duration {
        Duration::from_secs(self.install_settle)
    }

    pub fn daemon_poll_interval(&self) -> Duration {
        Duration::from_secs(self.daemon_poll_interval)
    }

    pub fn download_timeout(&self) -> Option<Duration> {
        self.download_timeout.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docker_bin: "docker".to_string(),
            docker_desktop_path: PathBuf::from(r"C:\Program Files\Docker\Docker\Docker Desktop.exe"),
            docker_installer_url:
                "https://desktop.docker.com/win/main/amd64/Docker%20Desktop%20Installer.exe"
                    .to_string(),
            installer_name: "DockerInstaller.exe".to_string(),
            install_settle: 30,
            wsl_kernel_url: "https://wslstorestorage.blob.core.windows.net/wslblob/wsl_update_x64.msi"
                .to_string(),
            windows_features: vec![
                "Microsoft-Windows-Subsystem-Linux".to_string(),
                "VirtualMachinePlatform".to_string(),
                "Containers".to_string(),
                "Microsoft-Hyper-V-All".to_string(),
            ],
            daemon_poll_interval: 2,
            daemon_poll_attempts: 30,
            download_timeout: None,
            open_browser: true,
            dialog: DialogKind::default(),
            first_run_title: "First Run/Setup".to_string(),
            first_run_message: FIRST_RUN_MESSAGE.to_string(),
            container: ContainerConfig::default(),
        }
    }
}
