use tracing::debug;

use crate::error::SetupError;
use crate::host::{CommandOutput, CommandSpec, ProcessRunner};

use super::types::{PsLine, parse_ps_output};

/// Typed access to the `docker` CLI.
pub struct Engine<'a> {
    runner: &'a dyn ProcessRunner,
    bin: &'a str,
}

impl<'a> Engine<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, bin: &'a str) -> Self {
        Self { runner, bin }
    }

    pub fn command<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(self.bin).args(args)
    }

    /// `docker --version` exits zero. A missing binary counts as not installed.
    pub fn is_installed(&self) -> bool {
        self.probe(self.command(["--version"]))
    }

    /// `docker info` exits zero, i.e. the daemon answers.
    pub fn is_ready(&self) -> bool {
        self.probe(self.command(["info"]))
    }

    /// First line of `docker --version`, if it runs.
    pub fn version(&self) -> Option<String> {
        let output = self.runner.run(&self.command(["--version"])).ok()?;
        if !output.success() {
            return None;
        }
        output.stdout.lines().next().map(|l| l.trim().to_string())
    }

    pub fn running_containers(&self) -> Result<Vec<PsLine>, SetupError> {
        let output = self.required(self.command(["ps", "--format", "{{json .}}"]))?;
        Ok(parse_ps_output(&output.stdout))
    }

    /// `docker run ...`; returns the new container's id when detached.
    pub fn run(&self, args: Vec<String>) -> Result<String, SetupError> {
        let output = self.required(self.command(std::iter::once("run".to_string()).chain(args)))?;
        Ok(output.stdout.trim().to_string())
    }

    pub fn logs(&self, container: &str) -> Result<CommandOutput, SetupError> {
        self.required(self.command(["logs", container]))
    }

    fn probe(&self, cmd: CommandSpec) -> bool {
        match self.runner.run(&cmd) {
            Ok(output) => output.success(),
            Err(e) => {
                debug!(command = %cmd, error = %e, "probe could not run");
                false
            }
        }
    }

    /// Run a command whose non-zero exit is fatal.
    fn required(&self, cmd: CommandSpec) -> Result<CommandOutput, SetupError> {
        let output = self.runner.run(&cmd).map_err(|e| SetupError::Command {
            command: cmd.to_string(),
            detail: e.to_string(),
        })?;
        if !output.success() {
            return Err(SetupError::Command {
                command: cmd.to_string(),
                detail: output.failure_detail(),
            });
        }
        Ok(output)
    }
}
