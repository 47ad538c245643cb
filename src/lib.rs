pub mod config;
pub mod docker;
pub mod error;
pub mod host;
pub mod setup;

pub use error::SetupError;
