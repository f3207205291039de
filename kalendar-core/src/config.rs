//! Builder configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_DATA_URL, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEZONE, DEFAULT_UID_DOMAIN};
use crate::error::{KalendarError, KalendarResult};

fn default_data_url() -> String {
    DEFAULT_DATA_URL.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

/// Configuration at ~/.config/kalendar/config.toml, overridable with
/// `KALENDAR_*` environment variables. Every key is optional.
#[derive(Debug, Deserialize, Clone)]
pub struct KalendarConfig {
    /// Base URL of index.json and the yearly datasets
    #[serde(default = "default_data_url")]
    pub data_url: String,

    /// IANA name of the timezone event timestamps are computed in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
}

impl Default for KalendarConfig {
    fn default() -> Self {
        KalendarConfig {
            data_url: default_data_url(),
            timezone: default_timezone(),
            output_dir: default_output_dir(),
            uid_domain: default_uid_domain(),
        }
    }
}

impl KalendarConfig {
    pub fn config_path() -> KalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| KalendarError::Config("Could not determine config directory".into()))?
            .join("kalendar");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config file (if it exists) and the environment.
    pub fn load() -> KalendarResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> KalendarResult<Self> {
        let config: KalendarConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("KALENDAR"))
            .build()
            .map_err(|e| KalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| KalendarError::Config(e.to_string()))?;

        config.tz()?;
        Ok(config)
    }

    pub fn tz(&self) -> KalendarResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| KalendarError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    pub fn index_url(&self) -> String {
        format!("{}/index.json", self.data_url.trim_end_matches('/'))
    }

    pub fn dataset_url(&self, filename: &str) -> String {
        format!("{}/{}", self.data_url.trim_end_matches('/'), filename)
    }
}
