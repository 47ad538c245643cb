// Docker CLI access — presence and readiness probes, `ps` parsing, `run`, `logs`.

pub mod engine;
pub mod types;

pub use engine::Engine;
pub use types::{ContainerRecord, PsLine, parse_ps_output};
