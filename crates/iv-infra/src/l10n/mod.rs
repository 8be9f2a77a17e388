//! Translation catalogs
//!
//! English and Dutch ship inside the binary. A catalog directory may add
//! languages or override individual keys with `<lang>.json` files in the
//! `{"translations": {...}}` layout.

mod provider;

pub use provider::CatalogTranslationProvider;
