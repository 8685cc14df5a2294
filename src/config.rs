use std::path::Path;

use crate::error::ConfigError;

/// Who sits in the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    VsAi,
    TwoPlayer,
}

/// Which terminal front-end the binary uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontendKind {
    #[default]
    Text,
    Tui,
}

/// Session setup. Anything left unset is asked for interactively.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<GameMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_one: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_two: Option<String>,
    /// Offer a rematch after every game.
    pub play_again: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: None,
            player_one: None,
            player_two: None,
            play_again: true,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub name: String,
    /// Fixed seed for reproducible games; OS entropy when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            name: "Computer".to_string(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub frontend: FrontendKind,
    pub clear_screen: bool,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub ai: AiConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ai.name.trim().is_empty() {
            return Err(ConfigError::Validation("ai.name must not be blank".into()));
        }
        for (key, name) in [
            ("game.player_one", &self.game.player_one),
            ("game.player_two", &self.game.player_two),
        ] {
            if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                return Err(ConfigError::Validation(format!("{key} must not be blank")));
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
