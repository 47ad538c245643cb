// Configuration — every fixed URL, path and name the setup sequence uses.

mod loader;
mod types;

pub use loader::{CONFIG_FILE, load, load_file};
pub use types::{Config, ContainerConfig, DialogKind};
