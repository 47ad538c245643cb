use anyhow::{Context, Result, bail};

use super::process::{CommandSpec, ProcessRunner};

/// Opens a URL in the user's default browser.
pub trait BrowserOpener {
    fn open(&self, url: &str) -> Result<()>;
}

/// Hands the URL to the platform's opener (`start`, `open` or `xdg-open`).
pub struct SystemBrowser<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> SystemBrowser<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }
}

impl BrowserOpener for SystemBrowser<'_> {
    fn open(&self, url: &str) -> Result<()> {
        let cmd = open_command(url);
        let output = self
            .runner
            .run(&cmd)
            .with_context(|| format!("failed to run `{cmd}`"))?;
        if !output.success() {
            bail!("`{cmd}` failed ({})", output.failure_detail());
        }
        Ok(())
    }
}

pub(crate) fn open_command(url: &str) -> CommandSpec {
    if cfg!(windows) {
        // The empty argument is the window title `start` expects first.
        CommandSpec::new("cmd").args(["/C", "start", "", url])
    } else if cfg!(target_os = "macos") {
        CommandSpec::new("open").arg(url)
    } else {
        CommandSpec::new("xdg-open").arg(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_last_argument() {
        let cmd = open_command("http://localhost:8501");
        assert_eq!(cmd.args.last().map(String::as_str), Some("http://localhost:8501"));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn linux_uses_xdg_open() {
        assert_eq!(open_command("http://x").program, "xdg-open");
    }
}
