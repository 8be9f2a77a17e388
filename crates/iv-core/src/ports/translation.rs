use std::sync::Arc;

use crate::l10n::TranslationCatalog;

/// Source of translation catalogs.
///
/// Catalogs are loaded up front, so lookups are synchronous.
pub trait TranslationPort: Send + Sync {
    /// Catalog for a normalized language code, if one ships.
    fn catalog_for(&self, language: &str) -> Option<Arc<TranslationCatalog>>;

    /// Every language with a catalog, sorted.
    fn available_languages(&self) -> Vec<String>;
}
