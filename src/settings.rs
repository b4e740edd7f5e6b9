//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/tertis/settings.toml (or platform equivalent)

use crate::display::DisplayConfig;
use crate::score::EngineConfig;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language and glyph choices from the menu
    pub display: DisplaySettings,
    /// Keybindings
    pub keys: KeyBindings,
    /// Gravity tuning
    pub engine: EngineSettings,
}

/// Display settings, stored as codes so the file stays hand-editable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// "en" or "tr"
    pub language: String,
    /// One of the glyphs in `display::BLOCK_STYLES`
    pub block_style: String,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub hard_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub pause: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// Gravity curve parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub base_interval_secs: f64,
    pub decay_factor: f64,
    pub min_interval_secs: f64,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Serialize keys: single key as string, multiple as array
fn serialize_keys<S>(keys: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    if let [key] = keys {
        serializer.serialize_str(key)
    } else {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        let display = DisplayConfig::default();
        Self {
            language: display.language.code().to_string(),
            block_style: display.block.to_string(),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string(), "a".to_string()],
            move_right: vec!["Right".to_string(), "d".to_string()],
            rotate: vec!["Up".to_string(), "w".to_string()],
            soft_drop: vec!["Down".to_string(), "s".to_string()],
            hard_drop: vec!["Space".to_string()],
            pause: vec!["p".to_string()],
            quit: vec!["q".to_string()],
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            base_interval_secs: config.base_interval_secs,
            decay_factor: config.decay_factor,
            min_interval_secs: config.min_interval_secs,
        }
    }
}

impl EngineSettings {
    /// Engine config from these values, or the defaults if they don't make sense
    pub fn to_config(&self) -> EngineConfig {
        let config = EngineConfig {
            base_interval_secs: self.base_interval_secs,
            decay_factor: self.decay_factor,
            min_interval_secs: self.min_interval_secs,
        };
        if config.is_valid() {
            config
        } else {
            tracing::warn!("invalid engine settings {:?}, using defaults", self);
            EngineConfig::default()
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tertis", "tertis").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the platform config dir, or defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`; a missing or broken file yields defaults
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("could not parse {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the platform config dir
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path().context("could not determine config directory")?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("settings saved to {}", path.display());
        Ok(())
    }

    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig::from_codes(&self.display.language, &self.display.block_style)
    }

    pub fn engine_config(&self) -> EngineConfig {
        self.engine.to_config()
    }
}
