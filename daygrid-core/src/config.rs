//! Global daygrid configuration.

use std::path::PathBuf;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaygridError, DaygridResult};

/// Configuration at ~/.config/daygrid/config.toml.
///
/// Everything is optional; a commented default file is created on first run.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DaygridConfig {
    /// Where events and flags are stored. Defaults to the platform data
    /// directory. Supports `~` expansion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// URL of the seed events resource, fetched once at startup of `watch`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_url: Option<String>,

    /// Sound hint passed along with reminder notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

impl DaygridConfig {
    pub fn config_path() -> DaygridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaygridError::Config("Could not determine config directory".into()))?
            .join("daygrid");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> DaygridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: DaygridConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| DaygridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaygridError::Config(e.to_string()))?;

        Ok(config)
    }

    /// The storage directory, tilde-expanded when configured, otherwise the
    /// platform data directory.
    pub fn data_path(&self) -> DaygridResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
            return Ok(PathBuf::from(expanded));
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| DaygridError::Config("Could not determine data directory".into()))?;
        Ok(data_dir.join("daygrid"))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> DaygridResult<()> {
        let contents = "\
# daygrid configuration

# Where your events are stored:
# data_dir = \"~/.local/share/daygrid\"

# Seed events fetched once when `daygrid watch` starts:
# seed_url = \"https://example.com/staticEvents.json\"

# Sound hint for reminder notifications:
# sound = \"message-new-instant\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaygridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaygridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
