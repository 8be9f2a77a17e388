use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use iv_core::l10n::TranslationCatalog;
use iv_core::language::{is_valid_language_code, normalize_language};
use iv_core::ports::TranslationPort;
use tokio::fs;

const BUILTIN_CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../l10n/en.json")),
    ("nl", include_str!("../../l10n/nl.json")),
];

pub struct CatalogTranslationProvider {
    catalogs: BTreeMap<String, Arc<TranslationCatalog>>,
}

impl CatalogTranslationProvider {
    /// Catalogs compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let mut catalogs = BTreeMap::new();
        for (language, raw) in BUILTIN_CATALOGS {
            let catalog: TranslationCatalog = serde_json::from_str(raw)
                .with_context(|| format!("parse builtin catalog failed: {language}"))?;
            catalogs.insert(language.to_string(), Arc::new(catalog));
        }
        Ok(Self { catalogs })
    }

    /// Merges every `<lang>.json` of `dir` over the loaded catalogs.
    ///
    /// A missing directory is not an error. Files that do not parse are
    /// skipped with a warning.
    pub async fn with_catalog_dir(mut self, dir: &Path) -> Result<Self> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "no catalog directory");
                return Ok(self);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read catalog dir failed: {}", dir.display()))
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("read catalog dir failed: {}", dir.display()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_valid_language_code(stem) {
                tracing::warn!(file = %path.display(), "ignoring catalog with invalid language code");
                continue;
            }
            let language = normalize_language(stem);

            let catalog = match read_catalog(&path).await {
                Ok(catalog) => catalog,
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %format!("{e:#}"), "skipping catalog");
                    continue;
                }
            };

            let merged = match self.catalogs.get(&language) {
                Some(existing) => existing.merged_with(&catalog),
                None => catalog,
            };
            tracing::info!(language = %language, keys = merged.len(), "catalog loaded");
            self.catalogs.insert(language, Arc::new(merged));
        }

        Ok(self)
    }
}

async fn read_catalog(path: &Path) -> Result<TranslationCatalog> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("read catalog failed: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse catalog failed: {}", path.display()))
}

impl TranslationPort for CatalogTranslationProvider {
    fn catalog_for(&self, language: &str) -> Option<Arc<TranslationCatalog>> {
        self.catalogs.get(language).cloned()
    }

    fn available_languages(&self) -> Vec<String> {
        self.catalogs.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iv_core::tour::DEFAULT_STEPS;

    #[test]
    fn builtin_catalogs_cover_every_default_step() {
        let provider = CatalogTranslationProvider::builtin().unwrap();
        assert_eq!(provider.available_languages(), vec!["en".to_string(), "nl".to_string()]);

        for language in ["en", "nl"] {
            let catalog = provider.catalog_for(language).unwrap();
            for definition in DEFAULT_STEPS {
                assert!(catalog.get(&definition.title_key()).is_some(), "{language}: {}", definition.id);
                assert!(catalog.get(&definition.text_key()).is_some(), "{language}: {}", definition.id);
            }
        }
    }

    #[tokio::test]
    async fn catalog_dir_adds_and_overrides_languages() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("de.json"),
            r#"{"translations": {"step_welcome_title": "Willkommen"}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("nl.json"),
            r#"{"translations": {"step_welcome_title": "Hallo!"}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), "nope").unwrap();
        std::fs::write(dir.path().join("fr.json"), "{ not json").unwrap();

        let provider = CatalogTranslationProvider::builtin()
            .unwrap()
            .with_catalog_dir(dir.path())
            .await
            .unwrap();

        assert_eq!(
            provider.available_languages(),
            vec!["de".to_string(), "en".to_string(), "nl".to_string()]
        );
        let nl = provider.catalog_for("nl").unwrap();
        assert_eq!(nl.get("step_welcome_title"), Some("Hallo!"));
        assert_eq!(nl.get("step_files_title"), Some("📁 Bestanden"));
        assert!(provider.catalog_for("de").unwrap().get("step_files_title").is_none());
    }

    #[tokio::test]
    async fn missing_catalog_dir_keeps_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CatalogTranslationProvider::builtin()
            .unwrap()
            .with_catalog_dir(&dir.path().join("absent"))
            .await
            .unwrap();
        assert_eq!(provider.available_languages().len(), 2);
    }
}
