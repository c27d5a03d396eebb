use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracker_db::StoreLocation;

use crate::error::{AppError, Result};

pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";
pub const STORE_URI_VAR: &str = "STORE_URI";
pub const STORE_DB_VAR: &str = "STORE_DB";
pub const STORE_COLLECTION_VAR: &str = "STORE_COLLECTION";
pub const HOST_VAR: &str = "TRACKER_HOST";
pub const PORT_VAR: &str = "TRACKER_PORT";

const CONFIG_FILE_NAME: &str = "email-tracker.toml";
const PRODUCTION_CONFIG_FILE_NAME: &str = "email-tracker.production.toml";

const DEFAULT_STORE_URI: &str = "sqlite://data";
const DEFAULT_STORE_DB: &str = "email_tracker_db";
const DEFAULT_STORE_COLLECTION: &str = "emails";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// Connection parameters for the tracking record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_STORE_URI.to_string(),
            database: DEFAULT_STORE_DB.to_string(),
            collection: DEFAULT_STORE_COLLECTION.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn location(&self) -> Result<StoreLocation> {
        Ok(StoreLocation::parse(&self.uri, &self.database)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
}

/// A loaded config and the file it came from, if one was read.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: AppConfig,
    pub file: Option<PathBuf>,
}

/// Config file picked by the `ENVIRONMENT` value.
pub fn config_file_name(environment: Option<&str>) -> &'static str {
    match environment {
        Some("production") => PRODUCTION_CONFIG_FILE_NAME,
        _ => CONFIG_FILE_NAME,
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| AppError::Config(err.to_string()))
    }

    /// Loads defaults, then the config file, then process environment overrides.
    pub fn load(explicit_file: Option<&Path>) -> Result<ConfigLoad> {
        Self::load_with(explicit_file, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with a custom variable lookup.
    ///
    /// Without `explicit_file` the file name comes from `ENVIRONMENT` and a
    /// missing file falls back to defaults. An explicit file must exist.
    pub fn load_with<F>(explicit_file: Option<&Path>, lookup: F) -> Result<ConfigLoad>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match explicit_file {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(config_file_name(lookup(ENVIRONMENT_VAR).as_deref())),
        };

        let (mut config, source) = if file.exists() {
            let contents = fs::read_to_string(&file).map_err(|err| {
                AppError::Config(format!("read config {}: {}", file.display(), err))
            })?;
            let config = Self::from_toml_str(&contents).map_err(|err| {
                AppError::Config(format!("parse config {}: {}", file.display(), err))
            })?;
            (config, Some(file))
        } else if explicit_file.is_some() {
            return Err(AppError::Config(format!(
                "config file {} not found",
                file.display()
            )));
        } else {
            (Self::default(), None)
        };

        config.apply_overrides(lookup)?;
        Ok(ConfigLoad {
            config,
            file: source,
        })
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup(STORE_URI_VAR) {
            self.store.uri = uri;
        }
        if let Some(database) = lookup(STORE_DB_VAR) {
            self.store.database = database;
        }
        if let Some(collection) = lookup(STORE_COLLECTION_VAR) {
            self.store.collection = collection;
        }
        if let Some(host) = lookup(HOST_VAR) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.server.port = port
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("invalid {PORT_VAR} value: {port}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.store.uri, "sqlite://data");
        assert_eq!(config.store.database, "email_tracker_db");
        assert_eq!(config.store.collection, "emails");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn environment_selects_config_file() {
        assert_eq!(config_file_name(Some("production")), "email-tracker.production.toml");
        assert_eq!(config_file_name(Some("staging")), "email-tracker.toml");
        assert_eq!(config_file_name(None), "email-tracker.toml");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [store]
            collection = "email_events"
            "#,
        )
        .expect("parse");
        assert_eq!(config.store.collection, "email_events");
        assert_eq!(config.store.database, "email_tracker_db");
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_toml_str(
            r#"
            [store]
            url = "sqlite://data"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn env_overrides_file_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("custom.toml");
        std::fs::write(
            &file,
            "[store]\nuri = \"sqlite://from-file\"\ndatabase = \"file_db\"\n",
        )
        .expect("write config");

        let load = AppConfig::load_with(
            Some(&file),
            lookup_from(&[("STORE_URI", "sqlite::memory:"), ("TRACKER_PORT", "9100")]),
        )
        .expect("load");
        assert_eq!(load.file.as_deref(), Some(file.as_path()));
        assert_eq!(load.config.store.uri, "sqlite::memory:");
        assert_eq!(load.config.store.database, "file_db");
        assert_eq!(load.config.server.port, 9100);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("absent.toml");
        let err = AppConfig::load_with(Some(&file), lookup_from(&[])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn invalid_port_override_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("empty.toml");
        std::fs::write(&file, "").expect("write config");
        let err =
            AppConfig::load_with(Some(&file), lookup_from(&[("TRACKER_PORT", "http")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn store_location_follows_uri_and_database() {
        let config = StoreConfig {
            uri: "sqlite://var/tracker".to_string(),
            database: "events".to_string(),
            collection: "emails".to_string(),
        };
        assert_eq!(
            config.location().expect("location"),
            StoreLocation::File(PathBuf::from("var/tracker/events.sqlite"))
        );
    }
}
