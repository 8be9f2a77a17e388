//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the infrastructure
//! that backs them. The host platform pieces (config store, translation
//! catalogs, user directory, telemetry delivery, clock) are all reached
//! through these traits so the use cases can be exercised in isolation.
//!
//! ## Port Placement Guidelines
//!
//! A port belongs here when it is a capability the host provides, more than
//! one use case depends on it, and an adapter in `iv-infra` implements it.

mod clock;
pub mod config_store;
pub mod telemetry;
pub mod translation;
pub mod user_directory;

pub use clock::*;
pub use config_store::{ConfigStoreError, ConfigStorePort};
pub use telemetry::{TelemetryError, TelemetrySenderPort};
pub use translation::TranslationPort;
pub use user_directory::{DirectoryError, UserDirectoryPort};
