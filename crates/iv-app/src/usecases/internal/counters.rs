use iv_core::ports::{ConfigStoreError, ConfigStorePort};
use iv_core::telemetry::parse_counter;

/// Adds one to an app-scoped counter and returns the new value.
///
/// Read and write are two store calls, so concurrent increments may lose one.
pub async fn increment_counter(
    config_store: &dyn ConfigStorePort,
    key: &str,
) -> Result<u64, ConfigStoreError> {
    let current = parse_counter(config_store.get_app_value(key).await?.as_deref());
    let next = current + 1;
    config_store.set_app_value(key, &next.to_string()).await?;
    Ok(next)
}
