use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use iv_core::config::DirectoryUser;
use iv_core::ports::{
    ClockPort, ConfigStoreError, ConfigStorePort, DirectoryError, TelemetryError,
    TelemetrySenderPort, TranslationPort, UserDirectoryPort,
};
use iv_core::telemetry::TelemetryReport;
use iv_infra::{CatalogTranslationProvider, InMemoryConfigStore, StaticUserDirectory};

use crate::deps::{AppDeps, InstanceInfo};

pub struct FixedClock {
    secs: AtomicI64,
}

impl FixedClock {
    pub fn at(secs: i64) -> Self {
        Self {
            secs: AtomicI64::new(secs),
        }
    }

    pub fn advance(&self, secs: i64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        self.secs.load(Ordering::SeqCst) * 1000
    }
}

/// In-memory store that counts writes and can be told to fail them.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryConfigStore,
    writes: AtomicUsize,
    failing_users: Mutex<Vec<String>>,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes_for(&self, user_id: &str) {
        self.failing_users.lock().unwrap().push(user_id.to_string());
    }
}

#[async_trait]
impl ConfigStorePort for CountingStore {
    async fn get_app_value(&self, key: &str) -> Result<Option<String>, ConfigStoreError> {
        self.inner.get_app_value(key).await
    }

    async fn set_app_value(&self, key: &str, value: &str) -> Result<(), ConfigStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_app_value(key, value).await
    }

    async fn delete_app_value(&self, key: &str) -> Result<(), ConfigStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_app_value(key).await
    }

    async fn get_user_value(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<String>, ConfigStoreError> {
        self.inner.get_user_value(user_id, key).await
    }

    async fn set_user_value(
        &self,
        user_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigStoreError> {
        if self.failing_users.lock().unwrap().iter().any(|u| u == user_id) {
            return Err(ConfigStoreError::Write(format!("refused for {user_id}")));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_user_value(user_id, key, value).await
    }

    async fn delete_user_value(&self, user_id: &str, key: &str) -> Result<(), ConfigStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_user_value(user_id, key).await
    }

    async fn users_with_value(&self, key: &str) -> Result<Vec<String>, ConfigStoreError> {
        self.inner.users_with_value(key).await
    }
}

mockall::mock! {
    pub TelemetrySender {}

    #[async_trait]
    impl TelemetrySenderPort for TelemetrySender {
        async fn send(&self, url: &str, report: &TelemetryReport) -> Result<(), TelemetryError>;
    }
}

mockall::mock! {
    pub Directory {}

    #[async_trait]
    impl UserDirectoryPort for Directory {
        async fn list_user_ids(&self) -> Result<Vec<String>, DirectoryError>;
        async fn groups_for_user(&self, user_id: &str) -> Result<Vec<String>, DirectoryError>;
        async fn list_groups(&self) -> Result<Vec<String>, DirectoryError>;
    }
}

pub fn translations() -> Arc<dyn TranslationPort> {
    Arc::new(CatalogTranslationProvider::builtin().unwrap())
}

pub fn directory(users: &[(&str, &[&str])]) -> Arc<StaticUserDirectory> {
    Arc::new(StaticUserDirectory::new(users.iter().map(|(id, groups)| {
        DirectoryUser {
            id: id.to_string(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    })))
}

/// Everything a use case test needs, backed by in-memory adapters.
pub struct Harness {
    pub store: Arc<CountingStore>,
    pub translations: Arc<dyn TranslationPort>,
    pub directory: Arc<dyn UserDirectoryPort>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_directory(directory(&[
            ("alice", &["admin", "staff"]),
            ("bob", &["staff"]),
            ("carol", &[]),
        ]))
    }

    pub fn with_directory(directory: Arc<dyn UserDirectoryPort>) -> Self {
        Self {
            store: Arc::new(CountingStore::default()),
            translations: translations(),
            directory,
            clock: Arc::new(FixedClock::at(1_700_000_000)),
        }
    }

    pub fn config_store(&self) -> Arc<dyn ConfigStorePort> {
        self.store.clone()
    }

    pub fn deps(&self, telemetry_sender: Arc<dyn TelemetrySenderPort>) -> AppDeps {
        AppDeps {
            config_store: self.config_store(),
            translations: self.translations.clone(),
            user_directory: self.directory.clone(),
            telemetry_sender,
            instance: InstanceInfo {
                app_version: "1.0.0".to_string(),
                instance_url: "https://cloud.example.org".to_string(),
                telemetry_url: "https://telemetry.example.org/introvox".to_string(),
                default_language: "en".to_string(),
                os_family: "linux".to_string(),
                is_docker: false,
            },
            clock: self.clock.clone(),
        }
    }

    pub async fn app_value(&self, key: &str) -> Option<String> {
        self.store.get_app_value(key).await.unwrap()
    }

    pub async fn user_value(&self, user_id: &str, key: &str) -> Option<String> {
        self.store.get_user_value(user_id, key).await.unwrap()
    }

    /// Writes around the write counter.
    pub async fn seed_app(&self, key: &str, value: &str) {
        self.store.inner.set_app_value(key, value).await.unwrap();
    }

    pub async fn seed_user(&self, user_id: &str, key: &str, value: &str) {
        self.store.inner.set_user_value(user_id, key, value).await.unwrap();
    }
}
