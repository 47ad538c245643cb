use serde::Serialize;

/// Result of one `dism /enable-feature` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureOutcome {
    pub feature: String,
    pub enabled: bool,
    /// Failure description, empty on success.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelUpdate {
    Installed,
    /// `wsl --version` did not report a recognized version.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WslReport {
    pub features: Vec<FeatureOutcome>,
    pub kernel_update: KernelUpdate,
}

impl WslReport {
    pub fn failed_features(&self) -> impl Iterator<Item = &FeatureOutcome> {
        self.features.iter().filter(|f| !f.enabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaemonStatus {
    pub already_running: bool,
    /// Docker Desktop was started by us.
    pub launched: bool,
    /// Readiness checks made after launching; 0 when already running.
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ContainerAction {
    AlreadyRunning { id: Option<String> },
    Launched { id: String, logs: String },
}

/// Everything the setup sequence observed and did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    pub engine_present: bool,
    /// Only checked when the engine had to be installed.
    pub elevated: Option<bool>,
    pub wsl: Option<WslReport>,
    pub engine_installed: bool,
    pub daemon: Option<DaemonStatus>,
    pub container: Option<ContainerAction>,
}

/// Read-only view used by `summon-wrangler status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub engine_version: Option<String>,
    pub daemon_ready: bool,
    pub container_running: bool,
}

impl StatusReport {
    pub fn healthy(&self) -> bool {
        self.engine_version.is_some() && self.daemon_ready && self.container_running
    }

    /// Names of the checks that did not pass.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.engine_version.is_none() {
            missing.push("docker");
        }
        if !self.daemon_ready {
            missing.push("daemon");
        }
        if !self.container_running {
            missing.push("container");
        }
        missing
    }
}
