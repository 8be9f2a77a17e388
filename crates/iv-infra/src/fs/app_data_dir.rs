use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the IntroVox data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/introvox
/// - Windows: %LOCALAPPDATA%\introvox
/// - Linux: $XDG_DATA_HOME/introvox or ~/.local/share/introvox
///
/// # Behavior
/// - This function does not create the directory.
/// - The caller decides when to create it.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir = get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join("introvox"))
}

fn get_platform_data_dir() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }
    dirs::data_local_dir().ok_or_else(|| anyhow::anyhow!("Unable to get local data directory"))
}
