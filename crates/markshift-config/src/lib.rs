use markshift_engine::{
    AsteriskVariant, DEFAULT_STORAGE_KEY, RuleTable, RuleTableError, SessionOptions,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User settings, read from `~/.config/markshift/config.toml`.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding saved documents
    pub storage_path: PathBuf,
    pub storage_key: String,
    /// Style produced by a single `*` (`"red"` or `"bold"`)
    pub single_asterisk: AsteriskVariant,
    pub autosave: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(shellexpand::tilde("~/.local/share/markshift").as_ref()),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            single_asterisk: AsteriskVariant::default(),
            autosave: true,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded storage path
        config.storage_path =
            Self::expand_path(&config.storage_path).unwrap_or(config.storage_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Load the user's config, falling back to defaults when there is none
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markshift");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Build the editor session settings described by this config
    pub fn session_options(&self) -> Result<SessionOptions, RuleTableError> {
        let rules = RuleTable::for_variant(self.single_asterisk)?;
        Ok(SessionOptions::new(rules)
            .with_storage_key(self.storage_key.clone())
            .with_autosave(self.autosave))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
