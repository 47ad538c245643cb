use std::fmt;
use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

/// A program plus its argument list, independent of how it gets executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// First argument, usually the subcommand.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(&self.program).chain(&self.args);
        f.write_str(&shell_words::join(words))
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stdout followed by stderr.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        out.push_str(&self.stderr);
        out
    }

    /// Short description of a failure for error messages.
    pub fn failure_detail(&self) -> String {
        let code = match self.exit_code {
            Some(code) => format!("exit {code}"),
            None => "terminated by signal".to_string(),
        };
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            code
        } else {
            format!("{code}: {stderr}")
        }
    }
}

/// Runs external programs. The setup sequence never touches
/// `std::process` directly so it can be driven by a fake in tests.
pub trait ProcessRunner {
    /// Run to completion, capturing stdout and stderr. Stdin is inherited.
    fn run(&self, cmd: &CommandSpec) -> io::Result<CommandOutput>;

    /// Start a process and return without waiting for it.
    fn spawn_detached(&self, cmd: &CommandSpec) -> io::Result<()>;
}

/// [`ProcessRunner`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, cmd: &CommandSpec) -> io::Result<CommandOutput> {
        debug!(command = %cmd, "running");
        let output = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::inherit())
            .output()?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: decode_output(&output.stdout),
            stderr: decode_output(&output.stderr),
        })
    }

    fn spawn_detached(&self, cmd: &CommandSpec) -> io::Result<()> {
        debug!(command = %cmd, "spawning");
        // The child keeps running after its handle is dropped.
        Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
    }
}

/// Decode process output. `wsl.exe` writes UTF-16LE, everything else is
/// treated as (lossy) UTF-8.
pub fn decode_output(bytes: &[u8]) -> String {
    if !looks_utf16le(bytes) {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let text = String::from_utf16_lossy(&units);
    text.strip_prefix('\u{feff}').map(str::to_owned).unwrap_or(text)
}

fn looks_utf16le(bytes: &[u8]) -> bool {
    if bytes.len() < 2 || bytes.len() % 2 != 0 {
        return false;
    }
    if bytes.starts_with(&[0xff, 0xfe]) {
        return true;
    }
    // Mostly-ASCII UTF-16LE has a zero in nearly every high byte.
    let high_zeros = bytes.iter().skip(1).step_by(2).filter(|b| **b == 0).count();
    high_zeros * 4 >= bytes.len() / 2 * 3
}
