use tracing::{info, warn};

use crate::config::Config;
use crate::error::SetupError;
use crate::host::Host;

use super::commands::engine_installer_command;

/// Download the Docker Desktop installer into a temporary directory, run
/// it quietly, then wait `install_settle` for the background install.
pub fn install_engine(host: &Host<'_>, cfg: &Config) -> Result<(), SetupError> {
    let dir = tempfile::Builder::new()
        .prefix("summon-wrangler")
        .tempdir()
        .map_err(|e| anyhow::Error::new(e).context("failed to create temporary directory"))?;
    let installer = dir.path().join(&cfg.installer_name);

    info!("downloading Docker Desktop installer");
    host.downloader
        .download(&cfg.docker_installer_url, &installer)
        .map_err(|source| SetupError::Download {
            what: "Docker Desktop installer",
            url: cfg.docker_installer_url.clone(),
            source,
        })?;
    info!(path = %installer.display(), "installer downloaded");

    info!("installing Docker Desktop silently");
    let cmd = engine_installer_command(&installer);
    let output = host.runner.run(&cmd).map_err(|e| SetupError::Install {
        what: "Docker Desktop",
        detail: e.to_string(),
    })?;
    if !output.success() {
        return Err(SetupError::Install {
            what: "Docker Desktop",
            detail: output.failure_detail(),
        });
    }
    info!("Docker Desktop installation launched");

    let settle = cfg.install_settle();
    info!(seconds = settle.as_secs(), "waiting for installation to finish");
    host.sleeper.sleep(settle);

    if let Err(e) = dir.close() {
        warn!(error = %e, "failed to remove installer directory");
    }
    info!("after a reboot, open Docker Desktop once and accept its EULA");
    Ok(())
}
