use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Fetches a URL into a file.
pub trait Downloader {
    /// Download `url` to `dest`, returning the number of bytes written.
    fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// [`Downloader`] over a blocking `reqwest` client.
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
}

impl HttpDownloader {
    /// `timeout` bounds the whole transfer; `None` disables the limit,
    /// which the Docker Desktop installer usually needs.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("summon-wrangler/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        info!(%url, dest = %dest.display(), "downloading");
        let mut response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("server rejected {url}"))?;

        let file = File::create(dest)
            .with_context(|| format!("failed to create {}", dest.display()))?;
        let mut writer = BufWriter::new(file);
        let bytes = response
            .copy_to(&mut writer)
            .with_context(|| format!("failed to read body of {url}"))?;
        writer
            .flush()
            .with_context(|| format!("failed to write {}", dest.display()))?;

        debug!(bytes, "download complete");
        Ok(bytes)
    }
}
