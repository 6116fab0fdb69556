use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{NotesError, Result, DEFAULT_PRIORITY};

/// Environment variable consulted when no priority is configured
pub const PRIORITY_ENV_VAR: &str = "LIVINGNOTES_PRIORITY";

const APP_DIR: &str = "livingnotes";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// File holding the persisted notes list
    pub notes_file: PathBuf,

    /// File holding the persisted notification state
    pub state_file: PathBuf,

    /// Priority given to newly created notes
    pub default_priority: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Config {
            notes_file: base.join("notes.json"),
            state_file: base.join("notification_state.json"),
            default_priority: None,
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file.
    ///
    /// A missing file yields the defaults; keys missing from the file take
    /// their default values.
    pub fn load(path: &Path) -> Result<Config> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(NotesError::Io(e)),
        };

        let config: Config = serde_json::from_str(&text).map_err(|e| NotesError::ConfigError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    // Configured value first, then the environment, then the built-in default
    pub fn get_default_priority(&self) -> String {
        if let Some(priority) = self.default_priority.as_ref().filter(|p| !p.is_empty()) {
            return priority.clone();
        }

        if let Ok(priority) = std::env::var(PRIORITY_ENV_VAR) {
            if !priority.is_empty() {
                return priority;
            }
        }

        DEFAULT_PRIORITY.to_string()
    }
}
