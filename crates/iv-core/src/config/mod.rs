//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//! - No default value calculation
//!
//! Missing values are carried as empty strings or empty paths; the bootstrap
//! layer decides what an empty value falls back to.

use std::path::PathBuf;

/// A user entry of the static directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    pub id: String,
    pub groups: Vec<String>,
}

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to (may be empty)
    pub bind_addr: String,

    /// Base directory for logs and the default store location
    pub data_dir: PathBuf,

    /// JSON file backing the config store (path info only, no existence check)
    pub config_store_path: PathBuf,

    /// Directory with `<lang>.json` translation catalogs, optional
    pub catalog_dir: PathBuf,

    /// Public URL of this instance; hashed before it leaves the process
    pub instance_url: String,

    /// Telemetry endpoint configured at deploy time
    pub telemetry_url: String,

    pub default_language: String,

    /// Members of this group may use the admin endpoints
    pub admin_group: String,

    pub users: Vec<DirectoryUser>,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        let users = toml_value
            .get("directory")
            .and_then(|d| d.get("users"))
            .and_then(|u| u.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| DirectoryUser {
                        id: entry
                            .get("id")
                            .and_then(|v| v.as_str())
                            .unwrap_or("")
                            .to_string(),
                        groups: entry
                            .get("groups")
                            .and_then(|g| g.as_array())
                            .map(|groups| {
                                groups
                                    .iter()
                                    .filter_map(|g| g.as_str())
                                    .map(str::to_string)
                                    .collect()
                            })
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_addr: str_at("server", "bind_addr"),
            data_dir: PathBuf::from(str_at("storage", "data_dir")),
            config_store_path: PathBuf::from(str_at("storage", "config_store_path")),
            catalog_dir: PathBuf::from(str_at("l10n", "catalog_dir")),
            instance_url: str_at("general", "instance_url"),
            telemetry_url: str_at("telemetry", "url"),
            default_language: str_at("general", "default_language"),
            admin_group: str_at("directory", "admin_group"),
            users,
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            bind_addr: String::new(),
            data_dir: PathBuf::new(),
            config_store_path: PathBuf::new(),
            catalog_dir: PathBuf::new(),
            instance_url: String::new(),
            telemetry_url: String::new(),
            default_language: String::new(),
            admin_group: String::new(),
            users: Vec::new(),
        }
    }

    /// Create AppConfig with system-default paths for production use
    ///
    /// The base directory is computed by the caller (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            config_store_path: data_dir.join("config_store.json"),
            catalog_dir: data_dir.join("l10n"),
            data_dir,
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_returns_empty_values_when_missing() {
        let toml_str = r#"
            [general]
            # instance_url is missing
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        // Empty string is valid (fact, not error)
        assert_eq!(config.instance_url, "");
        assert_eq!(config.bind_addr, "");
        assert!(config.users.is_empty());
    }

    #[test]
    fn test_from_toml_parses_all_sections() {
        let toml_str = r#"
            [general]
            instance_url = "https://cloud.example.org"
            default_language = "nl"

            [server]
            bind_addr = "127.0.0.1:8080"

            [storage]
            data_dir = "/var/lib/introvox"
            config_store_path = "/var/lib/introvox/store.json"

            [l10n]
            catalog_dir = "/etc/introvox/l10n"

            [telemetry]
            url = "https://telemetry.example.org"

            [directory]
            admin_group = "admin"

            [[directory.users]]
            id = "alice"
            groups = ["admin", "staff"]

            [[directory.users]]
            id = "bob"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.instance_url, "https://cloud.example.org");
        assert_eq!(config.default_language, "nl");
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.config_store_path, PathBuf::from("/var/lib/introvox/store.json"));
        assert_eq!(config.catalog_dir, PathBuf::from("/etc/introvox/l10n"));
        assert_eq!(config.telemetry_url, "https://telemetry.example.org");
        assert_eq!(config.admin_group, "admin");
        assert_eq!(
            config.users,
            vec![
                DirectoryUser {
                    id: "alice".into(),
                    groups: vec!["admin".into(), "staff".into()],
                },
                DirectoryUser {
                    id: "bob".into(),
                    groups: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_from_toml_does_not_validate_bind_addr() {
        let toml_str = r#"
            [server]
            bind_addr = "not an address"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.bind_addr, "not an address");
    }

    #[test]
    fn test_with_system_defaults_creates_valid_paths() {
        let data_dir = PathBuf::from("/tmp/test");
        let config = AppConfig::with_system_defaults(data_dir);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/test"));
        assert_eq!(config.config_store_path, PathBuf::from("/tmp/test/config_store.json"));
        assert_eq!(config.catalog_dir, PathBuf::from("/tmp/test/l10n"));
        assert_eq!(config.bind_addr, "");
        assert!(config.users.is_empty());
    }
}
