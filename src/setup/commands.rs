use std::path::Path;

use crate::config::Config;
use crate::host::CommandSpec;

/// `dism.exe /online /enable-feature /featurename:<feature> /all /norestart`
pub fn enable_feature_command(feature: &str) -> CommandSpec {
    CommandSpec::new("dism.exe").args([
        "/online".to_string(),
        "/enable-feature".to_string(),
        format!("/featurename:{feature}"),
        "/all".to_string(),
        "/norestart".to_string(),
    ])
}

pub fn wsl_version_command() -> CommandSpec {
    CommandSpec::new("wsl").arg("--version")
}

/// Silent `msiexec` install of a downloaded package.
pub fn msi_install_command(package: &Path) -> CommandSpec {
    CommandSpec::new("msiexec")
        .arg("/i")
        .arg(package.to_string_lossy())
        .args(["/quiet", "/norestart"])
}

/// Quiet Docker Desktop install.
pub fn engine_installer_command(installer: &Path) -> CommandSpec {
    CommandSpec::new(installer.to_string_lossy()).args(["install", "--quiet"])
}

pub fn desktop_launch_command(cfg: &Config) -> CommandSpec {
    CommandSpec::new(cfg.docker_desktop_path.to_string_lossy())
}

/// Arguments after `docker run` for the target container.
pub fn container_run_args(cfg: &Config) -> Vec<String> {
    let c = &cfg.container;
    let mut args: Vec<String> = Vec::new();
    if c.interactive {
        args.push("-it".into());
    }
    if let Some(socket) = &c.socket_mount {
        args.extend(["-v".into(), format!("{socket}:{socket}")]);
    }
    args.extend([
        "-d".into(),
        "-p".into(),
        format!("{}:{}", c.host_port, c.container_port),
        "--name".into(),
        c.name.clone(),
        c.image.clone(),
        "sh".into(),
        "-c".into(),
        c.command.clone(),
    ]);
    args
}
