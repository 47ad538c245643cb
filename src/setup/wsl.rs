use tracing::{info, warn};

use crate::config::Config;
use crate::error::SetupError;
use crate::host::{Host, ProcessRunner};

use super::commands::{enable_feature_command, msi_install_command, wsl_version_command};
use super::types::{FeatureOutcome, KernelUpdate, WslReport};

const VERSION_MARKERS: [&str; 2] = ["WSL version", "WSL 2"];

/// Probe WSL, enable the virtualization features and install the kernel
/// update when WSL reports a version. Feature failures are collected;
/// download or install failures of the kernel package abort.
pub fn prepare_wsl_stack(host: &Host<'_>, cfg: &Config) -> Result<WslReport, SetupError> {
    info!("checking WSL status");
    let recognized = wsl_version_recognized(host.runner);

    info!("enabling Windows features for WSL2");
    let features = enable_features(host.runner, &cfg.windows_features);

    let kernel_update = if recognized {
        install_kernel_update(host, cfg)?;
        KernelUpdate::Installed
    } else {
        warn!("WSL is not fully installed; you may need to run `wsl --install` manually");
        KernelUpdate::Skipped
    };

    info!("reboot the system to apply the WSL changes");
    Ok(WslReport {
        features,
        kernel_update,
    })
}

/// `wsl --version` mentions a WSL version. A missing `wsl` is "no".
pub fn wsl_version_recognized(runner: &dyn ProcessRunner) -> bool {
    match runner.run(&wsl_version_command()) {
        Ok(output) => {
            let text = output.combined();
            let found = VERSION_MARKERS.iter().any(|m| text.contains(m));
            if found {
                info!("WSL is installed");
            }
            found
        }
        Err(_) => false,
    }
}

/// Enable every feature, recording each outcome instead of stopping.
pub fn enable_features(runner: &dyn ProcessRunner, features: &[String]) -> Vec<FeatureOutcome> {
    features
        .iter()
        .map(|feature| {
            let cmd = enable_feature_command(feature);
            let detail = match runner.run(&cmd) {
                Ok(output) if output.success() => String::new(),
                Ok(output) => output.failure_detail(),
                Err(e) => e.to_string(),
            };
            let enabled = detail.is_empty();
            if enabled {
                info!(%feature, "feature enabled");
            } else {
                warn!(%feature, %detail, "failed to enable feature");
            }
            FeatureOutcome {
                feature: feature.clone(),
                enabled,
                detail,
            }
        })
        .collect()
}

/// Download the kernel package to a temporary `.msi`, install it quietly
/// and delete the file once the installer returns.
fn install_kernel_update(host: &Host<'_>, cfg: &Config) -> Result<(), SetupError> {
    let package = tempfile::Builder::new()
        .prefix("wsl_update")
        .suffix(".msi")
        .tempfile()
        .map_err(|e| anyhow::Error::new(e).context("failed to create temporary file"))?
        .into_temp_path();

    info!("downloading WSL2 kernel update");
    host.downloader
        .download(&cfg.wsl_kernel_url, &package)
        .map_err(|source| SetupError::Download {
            what: "WSL2 kernel update",
            url: cfg.wsl_kernel_url.clone(),
            source,
        })?;

    info!("installing WSL2 kernel update");
    let cmd = msi_install_command(&package);
    let result = match host.runner.run(&cmd) {
        Ok(output) if output.success() => Ok(()),
        Ok(output) => Err(output.failure_detail()),
        Err(e) => Err(e.to_string()),
    };

    if let Err(e) = package.close() {
        warn!(error = %e, "failed to delete kernel update package");
    }

    result.map_err(|detail| SetupError::Install {
        what: "WSL2 kernel update",
        detail,
    })?;
    info!("WSL2 kernel updated");
    Ok(())
}
