use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use summon_wrangler::config::{self, Config, DialogKind};
use summon_wrangler::host::{
    Dialog, Host, HttpDownloader, NativeDialog, SystemBrowser, SystemPrivilege, SystemRunner,
    SystemSleeper, TerminalDialog,
};
use summon_wrangler::setup::{self, ContainerAction};
use summon_wrangler::SetupError;

#[derive(Parser)]
#[command(
    name = "summon-wrangler",
    about = "Install WSL2 and Docker Desktop if needed, then launch the Wrangler container"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (default: ./wrangler.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write a JSON report of what setup did
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    /// Do not open the web UI in a browser
    #[arg(long, global = true)]
    no_browser: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Install what is missing and launch the container (default)
    Up,
    /// Report whether Docker, its daemon and the container are up
    Status,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = std::error::Error::source(cause);
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), SetupError> {
    let mut cfg = load_config(cli)?;
    if cli.no_browser {
        cfg.open_browser = false;
    }

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => up(cli, &cfg),
        Command::Status => status(&cfg),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    match &cli.config {
        Some(path) => config::load_file(path),
        None => {
            let cwd = std::env::current_dir().context("failed to resolve working directory")?;
            config::load(&cwd)
        }
    }
}

fn up(cli: &Cli, cfg: &Config) -> Result<(), SetupError> {
    let runner = SystemRunner;
    let downloader = HttpDownloader::new(cfg.download_timeout())?;
    let native_dialog = NativeDialog::new(&runner);
    let dialog: &dyn Dialog = match cfg.dialog {
        DialogKind::Native => &native_dialog,
        DialogKind::Terminal => &TerminalDialog,
    };
    debug!(dialog = cfg.dialog.as_str(), "first-run dialog selected");
    let browser = SystemBrowser::new(&runner);
    let privilege = SystemPrivilege::new(&runner);

    let host = Host {
        runner: &runner,
        downloader: &downloader,
        dialog,
        browser: &browser,
        privilege: &privilege,
        sleeper: &SystemSleeper,
    };

    let report = setup::run_setup(cfg, &host)?;

    if let Some(ContainerAction::Launched { logs, .. }) = &report.container
        && !logs.is_empty()
    {
        print!("{logs}");
    }

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    Ok(())
}

fn status(cfg: &Config) -> Result<(), SetupError> {
    let report = setup::check_status(cfg, &SystemRunner);

    match &report.engine_version {
        Some(version) => println!("docker:    {version}"),
        None => println!("docker:    not installed"),
    }
    println!("daemon:    {}", if report.daemon_ready { "ready" } else { "not ready" });
    println!(
        "container: {} {}",
        cfg.container.name,
        if report.container_running { "running" } else { "not running" }
    );

    if report.healthy() {
        Ok(())
    } else {
        Err(SetupError::NotReady(report.missing().join(", ")))
    }
}
