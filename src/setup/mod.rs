// Setup-and-launch sequence — WSL stack, engine install, daemon readiness,
// container reconciliation.

pub mod commands;
mod container;
mod daemon;
mod install;
mod orchestrator;
mod types;
mod wsl;

pub use container::find_container;
pub use daemon::RetryPolicy;
pub use orchestrator::{check_status, run_setup};
pub use types::{
    ContainerAction, DaemonStatus, FeatureOutcome, KernelUpdate, SetupReport, StatusReport,
    WslReport,
};
