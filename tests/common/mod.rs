//! Recording fakes for every host capability.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, bail};

use summon_wrangler::host::{
    BrowserOpener, CommandOutput, CommandSpec, Dialog, Downloader, Host, Privilege,
    ProcessRunner, Sleeper,
};

pub const WRANGLER_LINE: &str = r#"{"ID":"3f2a9c1b7d4e","Image":"griff85/wrangler:version1","Names":"container-wrangler","State":"running","Status":"Up 2 minutes","Ports":"0.0.0.0:8501->8501/tcp"}"#;
pub const DB_LINE: &str = r#"{"ID":"aa11","Image":"postgres:16","Names":"db","State":"running","Status":"Up 1 hour","Ports":"5432/tcp"}"#;
pub const CACHE_LINE: &str = r#"{"ID":"bb22","Image":"redis:7","Names":"cache","State":"running","Status":"Up 1 hour","Ports":"6379/tcp"}"#;

fn exit(code: i32, stdout: &str) -> io::Result<CommandOutput> {
    Ok(CommandOutput {
        exit_code: Some(code),
        stdout: stdout.to_string(),
        stderr: if code == 0 { String::new() } else { format!("failed with {code}") },
    })
}

/// Scripted stand-in for Windows, `wsl`, `dism`, `msiexec` and `docker`.
pub struct FakeRunner {
    /// Flips to `true` once the Docker Desktop installer succeeds.
    pub docker_installed: Cell<bool>,
    /// Answers for successive `docker info` calls; `info_default` after that.
    pub info_script: RefCell<VecDeque<bool>>,
    pub info_default: bool,
    pub ps_output: String,
    pub wsl_output: Option<String>,
    pub feature_exit: i32,
    pub msi_exit: i32,
    pub installer_exit: i32,
    pub run_exit: i32,
    pub spawn_fails: bool,
    pub calls: RefCell<Vec<CommandSpec>>,
    pub spawned: RefCell<Vec<CommandSpec>>,
}

impl FakeRunner {
    /// Docker installed, daemon up, nothing running.
    pub fn healthy() -> Self {
        Self {
            docker_installed: Cell::new(true),
            info_script: RefCell::new(VecDeque::new()),
            info_default: true,
            ps_output: String::new(),
            wsl_output: Some("WSL version: 2.3.26.0\nKernel version: 5.15.167.4-1\n".into()),
            feature_exit: 0,
            msi_exit: 0,
            installer_exit: 0,
            run_exit: 0,
            spawn_fails: false,
            calls: RefCell::new(Vec::new()),
            spawned: RefCell::new(Vec::new()),
        }
    }

    /// Fresh machine: no docker, daemon down.
    pub fn bare() -> Self {
        Self {
            docker_installed: Cell::new(false),
            info_default: false,
            ..Self::healthy()
        }
    }

    pub fn with_info_script(self, script: &[bool]) -> Self {
        *self.info_script.borrow_mut() = script.iter().copied().collect();
        self
    }

    pub fn with_running(mut self, lines: &[&str]) -> Self {
        self.ps_output = lines.iter().map(|l| format!("{l}\n")).collect();
        self
    }

    pub fn count(&self, program: &str, subcommand: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program == program && c.subcommand() == Some(subcommand))
            .count()
    }

    pub fn docker_runs(&self) -> Vec<CommandSpec> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program == "docker" && c.subcommand() == Some("run"))
            .cloned()
            .collect()
    }

    pub fn count_program(&self, program: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.program == program).count()
    }

    /// Calls to the downloaded Docker Desktop installer.
    pub fn installer_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program.ends_with("DockerInstaller.exe"))
            .count()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, cmd: &CommandSpec) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(cmd.clone());

        if cmd.program.ends_with("DockerInstaller.exe") {
            if self.installer_exit == 0 {
                self.docker_installed.set(true);
            }
            return exit(self.installer_exit, "");
        }

        match (cmd.program.as_str(), cmd.subcommand()) {
            ("docker", _) if !self.docker_installed.get() => Err(io::Error::from(io::ErrorKind::NotFound)),
            ("docker", Some("--version")) => exit(0, "Docker version 27.3.1, build ce12230\n"),
            ("docker", Some("info")) => {
                let ready = self.info_script.borrow_mut().pop_front().unwrap_or(self.info_default);
                exit(if ready { 0 } else { 1 }, "")
            }
            ("docker", Some("ps")) => exit(0, &self.ps_output),
            ("docker", Some("run")) => exit(self.run_exit, "9b1c0ffee\n"),
            ("docker", Some("logs")) => exit(0, "You can now view your Streamlit app in your browser.\n"),
            ("wsl", _) => match &self.wsl_output {
                Some(text) => exit(0, text),
                None => Err(io::Error::from(io::ErrorKind::NotFound)),
            },
            ("dism.exe", _) => exit(self.feature_exit, ""),
            ("msiexec", _) => exit(self.msi_exit, ""),
            _ => exit(0, ""),
        }
    }

    fn spawn_detached(&self, cmd: &CommandSpec) -> io::Result<()> {
        self.spawned.borrow_mut().push(cmd.clone());
        if self.spawn_fails {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        Ok(())
    }
}

/// Writes a small payload, or fails for URLs listed in `failing`.
#[derive(Default)]
pub struct FakeDownloader {
    pub failing: Vec<String>,
    pub fetched: RefCell<Vec<String>>,
    /// Where each download was written, in call order.
    pub destinations: RefCell<Vec<PathBuf>>,
}

impl FakeDownloader {
    pub fn failing(url: &str) -> Self {
        Self {
            failing: vec![url.to_string()],
            ..Self::default()
        }
    }
}

impl FakeDownloader {
    /// Destination of the download whose file name ends with `suffix`.
    pub fn destination_ending(&self, suffix: &str) -> PathBuf {
        self.destinations
            .borrow()
            .iter()
            .find(|p| p.to_string_lossy().ends_with(suffix))
            .cloned()
            .unwrap_or_else(|| panic!("no download written to *{suffix}"))
    }
}

impl Downloader for FakeDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        self.fetched.borrow_mut().push(url.to_string());
        self.destinations.borrow_mut().push(dest.to_path_buf());
        if self.failing.iter().any(|u| u == url) {
            bail!("connection reset");
        }
        std::fs::write(dest, b"payload")?;
        Ok(7)
    }
}

pub struct FakeDialog {
    pub answer: bool,
    pub shown: Cell<usize>,
}

impl FakeDialog {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            shown: Cell::new(0),
        }
    }
}

impl Dialog for FakeDialog {
    fn confirm(&self, _title: &str, _message: &str) -> Result<bool> {
        self.shown.set(self.shown.get() + 1);
        Ok(self.answer)
    }
}

#[derive(Default)]
pub struct FakeBrowser {
    pub opened: RefCell<Vec<String>>,
}

impl BrowserOpener for FakeBrowser {
    fn open(&self, url: &str) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

pub struct FakePrivilege {
    pub elevated: bool,
    pub checks: Cell<usize>,
}

impl FakePrivilege {
    pub fn new(elevated: bool) -> Self {
        Self {
            elevated,
            checks: Cell::new(0),
        }
    }
}

impl Privilege for FakePrivilege {
    fn is_elevated(&self) -> bool {
        self.checks.set(self.checks.get() + 1);
        self.elevated
    }
}

#[derive(Default)]
pub struct FakeSleeper {
    pub slept: RefCell<Vec<Duration>>,
}

impl FakeSleeper {
    pub fn total(&self) -> Duration {
        self.slept.borrow().iter().sum()
    }
}

impl Sleeper for FakeSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

/// All fakes for one scenario.
pub struct World {
    pub runner: FakeRunner,
    pub downloader: FakeDownloader,
    pub dialog: FakeDialog,
    pub browser: FakeBrowser,
    pub privilege: FakePrivilege,
    pub sleeper: FakeSleeper,
}

impl World {
    pub fn new(runner: FakeRunner) -> Self {
        Self {
            runner,
            downloader: FakeDownloader::default(),
            dialog: FakeDialog::answering(true),
            browser: FakeBrowser::default(),
            privilege: FakePrivilege::new(true),
            sleeper: FakeSleeper::default(),
        }
    }

    pub fn host(&self) -> Host<'_> {
        Host {
            runner: &self.runner,
            downloader: &self.downloader,
            dialog: &self.dialog,
            browser: &self.browser,
            privilege: &self.privilege,
            sleeper: &self.sleeper,
        }
    }
}

/// In-memory sink for `tracing` output.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a plain-text INFO subscriber installed for this thread and
/// return its result together with everything that was logged.
pub fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, capture.text())
}
