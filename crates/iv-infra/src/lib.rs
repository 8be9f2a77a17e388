pub mod config_store;
pub mod directory;
pub mod environment;
pub mod fs;
pub mod l10n;
pub mod telemetry;
pub mod time;

pub use config_store::{FileConfigStore, InMemoryConfigStore};
pub use directory::StaticUserDirectory;
pub use l10n::CatalogTranslationProvider;
pub use telemetry::HttpTelemetrySender;
pub use time::SystemClock;
