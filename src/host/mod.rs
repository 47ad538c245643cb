// Host capabilities — everything the setup sequence needs from the OS,
// the network and the user, behind traits so it can run against fakes.

mod browser;
mod dialog;
mod download;
mod privilege;
mod process;

use std::time::Duration;

pub use browser::{BrowserOpener, SystemBrowser};
pub use dialog::{Dialog, NativeDialog, TerminalDialog};
pub use download::{Downloader, HttpDownloader};
pub use privilege::{Privilege, SystemPrivilege};
pub use process::{CommandOutput, CommandSpec, ProcessRunner, SystemRunner, decode_output};

/// Blocking wait, swappable so polling loops can run instantly in tests.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSleeper;

impl Sleeper for SystemSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// The full set of capabilities handed to the orchestrator.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub runner: &'a dyn ProcessRunner,
    pub downloader: &'a dyn Downloader,
    pub dialog: &'a dyn Dialog,
    pub browser: &'a dyn BrowserOpener,
    pub privilege: &'a dyn Privilege,
    pub sleeper: &'a dyn Sleeper,
}
