//! Translation catalogs and the lookup fallback chain.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::language::BASE_LANGUAGE;
use crate::ports::TranslationPort;

/// Key → text map for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TranslationCatalog {
    #[serde(default)]
    translations: HashMap<String, String>,
}

impl TranslationCatalog {
    pub fn new(translations: HashMap<String, String>) -> Self {
        Self { translations }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            translations: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.translations.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// Entries of `other` win over the ones already present.
    pub fn merged_with(&self, other: &TranslationCatalog) -> TranslationCatalog {
        let mut translations = self.translations.clone();
        translations.extend(other.translations.clone());
        TranslationCatalog { translations }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Requested,
    Base,
    Literal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedText {
    pub text: String,
    pub source: TextSource,
}

/// Resolves keys through requested language → base language → literal key.
pub struct Translator {
    requested: Option<Arc<TranslationCatalog>>,
    base: Option<Arc<TranslationCatalog>>,
}

impl Translator {
    pub fn for_language(provider: &dyn TranslationPort, language: &str) -> Self {
        let base = provider.catalog_for(BASE_LANGUAGE);
        let requested = if language == BASE_LANGUAGE {
            base.clone()
        } else {
            provider.catalog_for(language)
        };
        Self { requested, base }
    }

    pub fn translate(&self, key: &str) -> TranslatedText {
        if let Some(text) = self.requested.as_deref().and_then(|c| c.get(key)) {
            return TranslatedText {
                text: text.to_string(),
                source: TextSource::Requested,
            };
        }
        if let Some(text) = self.base.as_deref().and_then(|c| c.get(key)) {
            return TranslatedText {
                text: text.to_string(),
                source: TextSource::Base,
            };
        }
        TranslatedText {
            text: key.to_string(),
            source: TextSource::Literal,
        }
    }
}
