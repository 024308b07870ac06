use std::{fs, path::PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{MmError, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory where the persisted collections live
    pub data_dir: PathBuf,

    /// Whether a first login as the demo user seeds sample collections
    pub seed_sample_data: bool,

    /// Default editor command for composing journal entries
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            seed_sample_data: true,
            editor_command: None,
        }
    }
}

/// Resolves the default data directory, falling back to a local directory
/// when the platform data dir cannot be determined.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mindmate")
}

/// Default location of the configuration file itself.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mindmate")
        .join("config.json")
}

impl Config {
    /// Loads the configuration from the given path, or the default location.
    /// A missing file yields the default configuration; a malformed file is
    /// logged and also falls back to defaults.
    pub fn load(path: Option<PathBuf>) -> Config {
        let path = path.unwrap_or_else(default_config_path);
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Config::default();
        }

        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Malformed config file {}: {}", path.display(), e);
                    Config::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Writes the configuration to the given path, creating parent
    /// directories as needed.
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let path = path.unwrap_or_else(default_config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_| MmError::DirectoryError {
                path: parent.to_path_buf(),
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Applies a `key=value` override from the command line.
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| MmError::ConfigError {
            message: format!("Expected key=value, got '{}'", assignment),
        })?;

        match key.trim() {
            "data_dir" => self.data_dir = PathBuf::from(value.trim()),
            "seed_sample_data" => {
                self.seed_sample_data =
                    value.trim().parse().map_err(|_| MmError::ConfigError {
                        message: format!("seed_sample_data expects true/false, got '{}'", value),
                    })?
            }
            "editor_command" => self.editor_command = Some(value.trim().to_string()),
            other => {
                return Err(MmError::ConfigError {
                    message: format!("Unknown configuration key: {}", other),
                })
            }
        }
        Ok(())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -t".to_string()
        } else {
            // Try common Linux editors
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_parses_known_keys() {
        let mut config = Config::default();
        config.set("data_dir=/tmp/mm").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/mm"));

        config.set("seed_sample_data=false").unwrap();
        assert!(!config.seed_sample_data);

        config.set("editor_command=vim").unwrap();
        assert_eq!(config.editor_command.as_deref(), Some("vim"));
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_syntax() {
        let mut config = Config::default();
        assert!(config.set("no_such_key=1").is_err());
        assert!(config.set("data_dir").is_err());
    }
}
