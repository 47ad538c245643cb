use std::path::Path;

use anyhow::{Context, Result};

use super::types::Config;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "wrangler.yaml";

/// Load `wrangler.yaml` from the given directory, falling back to the
/// built-in defaults when the file does not exist.
pub fn load(dir: &Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    load_file(&path)
}

/// Load an explicitly named config file. A missing file is an error.
pub fn load_file(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}
