//! Listings shown on the admin page.

use std::sync::Arc;

use iv_core::language::display_name;
use iv_core::ports::{ConfigStorePort, TranslationPort, UserDirectoryPort};
use iv_core::TourResult;
use serde::Serialize;
use tracing::{info_span, Instrument};

use crate::usecases::internal::StepListStore;
use crate::usecases::settings::GetGlobalSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
    pub enabled: bool,
    /// A step list is stored, either edited or materialized on a read.
    pub has_custom_steps: bool,
}

pub struct ListLanguages {
    config_store: Arc<dyn ConfigStorePort>,
    translations: Arc<dyn TranslationPort>,
}

impl ListLanguages {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
    ) -> Self {
        Self {
            config_store,
            translations,
        }
    }

    pub async fn execute(&self) -> TourResult<Vec<LanguageInfo>> {
        let span = info_span!("usecase.list_languages.execute");

        async {
            let settings = GetGlobalSettings::new(self.config_store.clone()).execute().await?;
            let store = StepListStore::new(self.config_store.clone());

            let mut languages = Vec::new();
            for code in self.translations.available_languages() {
                languages.push(LanguageInfo {
                    name: display_name(&code).to_string(),
                    enabled: settings.is_language_enabled(&code),
                    has_custom_steps: store.exists(&code).await?,
                    code,
                });
            }
            Ok(languages)
        }
        .instrument(span)
        .await
    }
}

pub struct ListGroups {
    user_directory: Arc<dyn UserDirectoryPort>,
}

impl ListGroups {
    pub fn new(user_directory: Arc<dyn UserDirectoryPort>) -> Self {
        Self { user_directory }
    }

    pub async fn execute(&self) -> TourResult<Vec<String>> {
        let span = info_span!("usecase.list_groups.execute");

        async { Ok(self.user_directory.list_groups().await?) }
            .instrument(span)
            .await
    }
}
