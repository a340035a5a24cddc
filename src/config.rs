use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const APP_DIR: &str = "vocab_dialogue";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub generation: GenerationConfig,
    pub dialogue: DialogueConfig,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            generation: GenerationConfig::default(),
            dialogue: DialogueConfig::default(),
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,

    /// Copy the current file aside before each overwrite.
    pub backup_on_write: bool,

    /// Backups kept beside the store; older ones are deleted. 0 keeps all.
    pub backup_keep: usize,

    /// Drop repeated words (first one wins) when registering.
    pub dedupe: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push("wordlist.csv");

        Self {
            path,
            backup_on_write: true,
            backup_keep: crate::store::DEFAULT_BACKUP_KEEP,
            dedupe: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Base URL of an OpenAI-compatible API, without the trailing slash.
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,

    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".into(),
            model: "gpt-4o".into(),
            max_tokens: 600,
            temperature: 0.7,
            api_key_env: "OPENAI_API_KEY".into(),
        }
    }
}

impl GenerationConfig {
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    pub random_pick_count: usize,
    pub min_lines: u32,
    pub max_lines: u32,

    /// Slip one extra advanced word into each prompt.
    pub extra_vocabulary: bool,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            random_pick_count: 3,
            min_lines: 4,
            max_lines: 6,
            extra_vocabulary: false,
        }
    }
}

pub fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn config_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Where a loaded configuration came from. Nothing is logged while loading,
/// since the log level is itself part of the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    Invalid { path: PathBuf, reason: String },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!(path = %path.display(), "settings loaded"),
            ConfigSource::Missing(path) => {
                info!(path = %path.display(), "no settings file, using defaults")
            }
            ConfigSource::Invalid { path, reason } => {
                warn!(path = %path.display(), error = %reason, "invalid settings, using defaults")
            }
        }
    }
}

pub fn load_config() -> (AppConfig, ConfigSource) {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> (AppConfig, ConfigSource) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return (AppConfig::default(), ConfigSource::Missing(path.to_path_buf()))
        }
        Err(e) => {
            return (
                AppConfig::default(),
                ConfigSource::Invalid {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
            )
        }
    };

    match serde_json::from_str(&text) {
        Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
        Err(e) => (
            AppConfig::default(),
            ConfigSource::Invalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        ),
    }
}

pub fn save_config(config: &AppConfig) -> anyhow::Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_string_pretty(config)?)?;
    info!(path = %path.display(), "settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let json = r#"{ "dialogue": { "max_lines": 8, "min_lines": 5 }, "store": { "backup_on_write": false } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.dialogue.min_lines, 5);
        assert_eq!(config.dialogue.max_lines, 8);
        assert_eq!(config.dialogue.random_pick_count, 3);
        assert!(!config.store.backup_on_write);
        assert!(config.store.dedupe);
        assert_eq!(config.store.backup_keep, 10);
        assert_eq!(config.generation.model, "gpt-4o");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn round_trips_through_json() {
        let mut config = AppConfig::default();
        config.generation.temperature = 0.2;
        config.dialogue.extra_vocabulary = true;

        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(serde_json::from_str::<AppConfig>(&json).unwrap(), config);
    }

    #[test]
    fn load_reports_where_settings_came_from() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let (config, source) = load_config_from(&path);
        assert_eq!(config, AppConfig::default());
        assert_eq!(source, ConfigSource::Missing(path.clone()));

        fs::write(&path, r#"{ "log_level": "debug" }"#).unwrap();
        let (config, source) = load_config_from(&path);
        assert_eq!(config.log_level, "debug");
        assert_eq!(source, ConfigSource::File(path.clone()));
    }

    #[test]
    fn invalid_settings_fall_back_to_defaults_and_say_why() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let (config, source) = load_config_from(&path);
        assert_eq!(config, AppConfig::default());
        assert!(matches!(source, ConfigSource::Invalid { reason, .. } if !reason.is_empty()));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let generation = GenerationConfig {
            api_key_env: "VOCAB_DIALOGUE_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        assert!(generation.api_key().is_none());
    }
}
