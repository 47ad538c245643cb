use super::process::ProcessRunner;

/// Answers whether the current process holds administrative privilege.
pub trait Privilege {
    fn is_elevated(&self) -> bool;
}

/// On Windows `net session` only succeeds for elevated processes; on Unix
/// the effective uid is checked.
pub struct SystemPrivilege<'a> {
    #[cfg_attr(not(windows), allow(dead_code))]
    runner: &'a dyn ProcessRunner,
}

impl<'a> SystemPrivilege<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }
}

impl Privilege for SystemPrivilege<'_> {
    #[cfg(windows)]
    fn is_elevated(&self) -> bool {
        use super::process::CommandSpec;

        self.runner
            .run(&CommandSpec::new("net").arg("session"))
            .map(|out| out.success())
            .unwrap_or(false)
    }

    #[cfg(unix)]
    fn is_elevated(&self) -> bool {
        // SAFETY: geteuid() is a simple POSIX getter that always succeeds and has no side effects.
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(any(windows, unix)))]
    fn is_elevated(&self) -> bool {
        false
    }
}
