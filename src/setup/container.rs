use tracing::{info, warn};

use crate::config::Config;
use crate::docker::{Engine, PsLine};
use crate::error::SetupError;
use crate::host::Host;

use super::commands::container_run_args;
use super::types::ContainerAction;

/// The running container carrying `name`, if any. Decided once over the
/// whole set so a busy host never triggers more than one launch.
pub fn find_container<'l>(lines: &'l [PsLine], name: &str) -> Option<&'l PsLine> {
    lines.iter().find(|line| line.matches(name))
}

/// Launch the target container unless it is already running.
pub fn reconcile(
    engine: &Engine<'_>,
    host: &Host<'_>,
    cfg: &Config,
) -> Result<ContainerAction, SetupError> {
    let name = &cfg.container.name;
    let running = engine.running_containers()?;

    if let Some(existing) = find_container(&running, name) {
        info!(container = %name, id = existing.id().unwrap_or("-"), "container already running");
        return Ok(ContainerAction::AlreadyRunning {
            id: existing.id().map(str::to_owned),
        });
    }

    info!(container = %name, others = running.len(), "starting container");
    launch(engine, host, cfg)
}

fn launch(engine: &Engine<'_>, host: &Host<'_>, cfg: &Config) -> Result<ContainerAction, SetupError> {
    let c = &cfg.container;

    if cfg.open_browser {
        let url = c.ui_url();
        if let Err(e) = host.browser.open(&url) {
            warn!(%url, error = %e, "failed to open browser");
        }
    }

    let id = engine.run(container_run_args(cfg))?;
    info!(container = %c.name, %id, "container started");

    // One-shot fetch; a container that is still booting may have no output yet.
    let logs = match engine.logs(&c.name) {
        Ok(output) => output.combined(),
        Err(e) => {
            warn!(error = %e, "failed to fetch container logs");
            String::new()
        }
    };

    Ok(ContainerAction::Launched { id, logs })
}
