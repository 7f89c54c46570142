use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    bonds::ExpiryPolicy,
    errors::Result,
    utils::{
        paths,
        persistence::{ensure_dir, tmp_path, write_atomic},
    },
};

pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";
const DEFAULT_MAX_INPUT_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// chrono format used for typed and displayed pay dates.
    pub date_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_bond_file: Option<String>,
    pub expiry_policy: ExpiryPolicy,
    pub max_input_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.into(),
            default_bond_file: None,
            expiry_policy: ExpiryPolicy::Keep,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Loads the configuration, writing the defaults first if no file exists yet.
    pub fn load_or_create(&self) -> Result<Config> {
        if !self.path.exists() {
            let config = Config::default();
            self.save(&config)?;
            tracing::info!(path = %self.path.display(), "wrote default configuration");
            return Ok(config);
        }
        self.load()
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_or_create_writes_defaults_once() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert!(!manager.path().exists());

        let config = manager.load_or_create().unwrap();
        assert_eq!(config, Config::default());
        assert!(manager.path().exists());

        let mut edited = config.clone();
        edited.expiry_policy = ExpiryPolicy::Remove;
        edited.default_bond_file = Some("bonds.json".into());
        manager.save(&edited).unwrap();
        assert_eq!(manager.load_or_create().unwrap(), edited);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "expiry_policy": "remove" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.expiry_policy, ExpiryPolicy::Remove);
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(config.max_input_len, 32);
    }
}
