use tracing::{info, warn};

use crate::config::Config;
use crate::docker::Engine;
use crate::error::SetupError;
use crate::host::{Host, ProcessRunner};

use super::container::{find_container, reconcile};
use super::daemon::ensure_daemon;
use super::install::install_engine;
use super::types::{SetupReport, StatusReport};
use super::wsl::prepare_wsl_stack;

/// Run the whole setup-and-launch sequence.
///
/// 1. Install WSL2 and Docker Desktop when `docker` is missing (requires
///    elevation; otherwise the first-run dialog is shown and setup stops).
/// 2. Start Docker Desktop and wait for the daemon if it is not answering.
/// 3. Launch the target container unless it is already running.
///
/// Every failure ends the sequence; nothing is rolled back.
pub fn run_setup(cfg: &Config, host: &Host<'_>) -> Result<SetupReport, SetupError> {
    let engine = Engine::new(host.runner, &cfg.docker_bin);
    let mut report = SetupReport {
        engine_present: engine.is_installed(),
        ..SetupReport::default()
    };

    if report.engine_present {
        info!("Docker is already installed");
    } else {
        info!("Docker not found; attempting to install");
        let elevated = host.privilege.is_elevated();
        report.elevated = Some(elevated);
        if !elevated {
            return Err(first_run_refusal(host, cfg));
        }

        let wsl = prepare_wsl_stack(host, cfg)?;
        let failed = wsl.failed_features().count();
        if failed > 0 {
            warn!(failed, "some Windows features could not be enabled");
        }
        report.wsl = Some(wsl);

        install_engine(host, cfg)?;
        report.engine_installed = true;
    }

    report.daemon = Some(ensure_daemon(&engine, host, cfg)?);
    report.container = Some(reconcile(&engine, host, cfg)?);
    Ok(report)
}

/// Show the first-run dialog and turn the answer into the error that ends
/// the run: OK asks for an elevated re-run, Cancel or close is a cancel.
fn first_run_refusal(host: &Host<'_>, cfg: &Config) -> SetupError {
    match host.dialog.confirm(&cfg.first_run_title, &cfg.first_run_message) {
        Ok(true) => SetupError::NotElevated,
        Ok(false) => SetupError::Cancelled,
        Err(e) => SetupError::Other(e.context("first-run dialog failed")),
    }
}

/// Read-only probes: engine version, daemon readiness, target container.
pub fn check_status(cfg: &Config, runner: &dyn ProcessRunner) -> StatusReport {
    let engine = Engine::new(runner, &cfg.docker_bin);
    let engine_version = engine.version();
    let daemon_ready = engine_version.is_some() && engine.is_ready();
    let container_running = daemon_ready
        && engine
            .running_containers()
            .map(|lines| find_container(&lines, &cfg.container.name).is_some())
            .unwrap_or(false);

    StatusReport {
        engine_version,
        daemon_ready,
        container_running,
    }
}
