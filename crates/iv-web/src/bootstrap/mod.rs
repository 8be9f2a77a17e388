pub mod config;
pub mod defaults;
pub mod run;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use defaults::resolve_defaults;
pub use run::{run_server, serve, spawn_telemetry_job};
pub use runtime::{AppRuntime, UseCases};
pub use wiring::{wire_dependencies, WiringError};
