use std::fs;
use std::path::{Path, PathBuf};

use qrgate_auth::{DEFAULT_COLLECTION, DEFAULT_FIRESTORE_BASE_URL};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "qrgate";
const CONFIG_FILE_NAME: &str = "config.json";

pub(crate) const ENV_CLIENT_ID: &str = "QRGATE_GOOGLE_CLIENT_ID";
pub(crate) const ENV_CLIENT_SECRET: &str = "QRGATE_GOOGLE_CLIENT_SECRET";
pub(crate) const ENV_FIRESTORE_PROJECT: &str = "QRGATE_FIRESTORE_PROJECT";
pub(crate) const ENV_FIREBASE_API_KEY: &str = "QRGATE_FIREBASE_API_KEY";
pub(crate) const ENV_EXPORT_DIR: &str = "QRGATE_EXPORT_DIR";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config JSON failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Validation(String),
}

/// Google OAuth client settings.
#[derive(Debug, Clone, Default)]
pub(crate) struct GoogleSettings {
    pub(crate) client_id: String,
    pub(crate) client_secret: Option<SecretString>,
    pub(crate) redirect_port: u16,
    /// Firebase web API key used to obtain the allow-list bearer token.
    pub(crate) firebase_api_key: Option<String>,
}

/// Where authorized emails are looked up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum AllowListSettings {
    Firestore {
        #[serde(default)]
        project_id: String,
        #[serde(default = "default_collection")]
        collection: String,
        #[serde(default = "default_base_url")]
        base_url: String,
    },
    Static {
        #[serde(default)]
        emails: Vec<String>,
    },
}

impl Default for AllowListSettings {
    fn default() -> Self {
        AllowListSettings::Firestore {
            project_id: String::new(),
            collection: default_collection(),
            base_url: default_base_url(),
        }
    }
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_base_url() -> String {
    DEFAULT_FIRESTORE_BASE_URL.to_string()
}

/// Application configuration after env overrides.
#[derive(Debug, Clone, Default)]
pub(crate) struct AppConfig {
    pub(crate) google: GoogleSettings,
    pub(crate) allow_list: AllowListSettings,
    pub(crate) export_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Apply `QRGATE_*` overrides read through `lookup`.
    pub(crate) fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(client_id) = read(ENV_CLIENT_ID) {
            self.google.client_id = client_id;
        }
        if let Some(secret) = read(ENV_CLIENT_SECRET) {
            self.google.client_secret = Some(SecretString::from(secret));
        }
        if let Some(api_key) = read(ENV_FIREBASE_API_KEY) {
            self.google.firebase_api_key = Some(api_key);
        }
        if let Some(project_id) = read(ENV_FIRESTORE_PROJECT) {
            self.allow_list = match std::mem::take(&mut self.allow_list) {
                AllowListSettings::Firestore {
                    collection,
                    base_url,
                    ..
                } => AllowListSettings::Firestore {
                    project_id,
                    collection,
                    base_url,
                },
                AllowListSettings::Static { .. } => {
                    AllowListSettings::Firestore {
                        project_id,
                        collection: default_collection(),
                        base_url: default_base_url(),
                    }
                },
            };
        }
        if let Some(dir) = read(ENV_EXPORT_DIR) {
            self.export_dir = Some(PathBuf::from(dir));
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let AllowListSettings::Firestore {
            project_id,
            collection,
            ..
        } = &self.allow_list
        {
            if project_id.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "allow_list.project_id is required (or set \
                     {ENV_FIRESTORE_PROJECT})"
                )));
            }
            if collection.trim().is_empty() {
                return Err(ConfigError::Validation(String::from(
                    "allow_list.collection must not be empty",
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    google: RawGoogle,
    allow_list: AllowListSettings,
    export_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGoogle {
    client_id: String,
    client_secret: Option<String>,
    redirect_port: u16,
    firebase_api_key: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        Self {
            google: GoogleSettings {
                client_id: raw.google.client_id,
                client_secret: raw
                    .google
                    .client_secret
                    .filter(|secret| !secret.is_empty())
                    .map(SecretString::from),
                redirect_port: raw.google.redirect_port,
                firebase_api_key: raw
                    .google
                    .firebase_api_key
                    .filter(|key| !key.trim().is_empty()),
            },
            allow_list: raw.allow_list,
            export_dir: raw.export_dir,
        }
    }
}

/// Status describing how the config file was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigLoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// Result of loading the config file.
#[derive(Debug, Clone)]
pub(crate) struct ConfigLoad {
    config: AppConfig,
    status: ConfigLoadStatus,
}

impl ConfigLoad {
    pub(crate) fn new(config: AppConfig, status: ConfigLoadStatus) -> Self {
        Self { config, status }
    }

    /// Consume the value and return both payload and status.
    pub(crate) fn into_parts(self) -> (AppConfig, ConfigLoadStatus) {
        (self.config, self.status)
    }
}

/// Platform config directory plus `qrgate` (`~/.config/qrgate` on Linux).
pub(crate) fn config_dir() -> PathBuf {
    config_dir_in(dirs::config_dir())
}

fn config_dir_in(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(std::env::temp_dir).join(APP_DIR)
}

pub(crate) fn load_config() -> Result<ConfigLoad, ConfigError> {
    load_config_from_path(&config_dir().join(CONFIG_FILE_NAME))
}

/// Load the config file, log how it went, then apply env overrides.
pub(crate) fn load_with_env() -> AppConfig {
    let mut config = match load_config() {
        Ok(load) => {
            let (config, status) = load.into_parts();
            match status {
                ConfigLoadStatus::Loaded => log::info!("config loaded"),
                ConfigLoadStatus::Missing => {
                    log::info!("no config file; using defaults")
                },
                ConfigLoadStatus::Invalid(message) => {
                    log::warn!("config invalid, using defaults: {message}")
                },
            }
            config
        },
        Err(err) => {
            log::warn!("config read failed: {err}");
            AppConfig::default()
        },
    };

    config.apply_env(|name| std::env::var(name).ok());
    config
}

pub(crate) fn parse_config(data: &str) -> Result<AppConfig, ConfigError> {
    let raw: RawConfig = serde_json::from_str(data)?;
    Ok(raw.into())
}

fn load_config_from_path(path: &Path) -> Result<ConfigLoad, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ConfigLoad::new(
                AppConfig::default(),
                ConfigLoadStatus::Missing,
            ));
        },
        Err(err) => return Err(err.into()),
    };

    match parse_config(&data) {
        Ok(config) => Ok(ConfigLoad::new(config, ConfigLoadStatus::Loaded)),
        Err(err) => Ok(ConfigLoad::new(
            AppConfig::default(),
            ConfigLoadStatus::Invalid(format!("{err}")),
        )),
    }
}
