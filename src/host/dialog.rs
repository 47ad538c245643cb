use anyhow::{Context, Result, bail};
use dialoguer::Confirm;
use dialoguer::console::style;
use dialoguer::theme::ColorfulTheme;

use super::process::{CommandSpec, ProcessRunner};

/// A blocking OK/Cancel prompt.
pub trait Dialog {
    /// Returns `true` for OK, `false` for Cancel or a closed window.
    fn confirm(&self, title: &str, message: &str) -> Result<bool>;
}

/// Prompt on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalDialog;

impl Dialog for TerminalDialog {
    fn confirm(&self, title: &str, message: &str) -> Result<bool> {
        println!("{}", style(title).bold());
        println!("{message}");
        println!();
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("OK?")
            .default(true)
            .interact_opt()
            .context("failed to read confirmation")?;
        Ok(answer.unwrap_or(false))
    }
}

/// Windows message box, shown by a PowerShell one-liner.
pub struct NativeDialog<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> NativeDialog<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }
}

impl Dialog for NativeDialog<'_> {
    fn confirm(&self, title: &str, message: &str) -> Result<bool> {
        let cmd = message_box_command(title, message);
        let output = self
            .runner
            .run(&cmd)
            .context("failed to invoke powershell for the setup dialog")?;
        if !output.success() {
            bail!("setup dialog failed ({})", output.failure_detail());
        }
        Ok(output.stdout.trim() == "OK")
    }
}

pub(crate) fn message_box_command(title: &str, message: &str) -> CommandSpec {
    let script = format!(
        "Add-Type -AssemblyName PresentationFramework; \
         [System.Windows.MessageBox]::Show('{}', '{}', 'OKCancel', 'Information')",
        ps_quote(message),
        ps_quote(title),
    );
    CommandSpec::new("powershell").args(["-NoProfile", "-NonInteractive", "-Command"]).arg(script)
}

/// Escape for a single-quoted PowerShell string.
fn ps_quote(text: &str) -> String {
    text.replace('\'', "''")
}
