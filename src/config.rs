//! Board dimensions and economy constants.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, EngineError};

/// Environment variable naming a game config JSON file.
pub const GAME_CONF_VAR: &str = "GAME_CONF";

/// Per-match rules. Missing JSON fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: u16,
    /// Must be even; each player deploys into half the columns.
    pub cols: u16,
    pub starting_balance: u32,
    pub starting_victory_points: i32,
    /// Victory points lost by the acting player every execution turn.
    pub turn_penalty: i32,
    pub citadel_loss_penalty: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 10,
            cols: 20,
            starting_balance: 125,
            starting_victory_points: 100,
            turn_penalty: 5,
            citadel_loss_penalty: 100,
        }
    }
}

impl GameConfig {
    /// Rejects boards that cannot be split into two deployment zones, and
    /// point rules under which victory points could rise or never run out.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rows == 0 || self.cols == 0 || self.cols % 2 != 0 {
            return Err(EngineError::InvalidBoard { rows: self.rows, cols: self.cols });
        }
        let rules = [
            ("starting_victory_points", self.starting_victory_points, 1, "positive"),
            ("turn_penalty", self.turn_penalty, 1, "positive"),
            ("citadel_loss_penalty", self.citadel_loss_penalty, 0, "non-negative"),
        ];
        for (field, value, min, requirement) in rules {
            if value < min {
                return Err(EngineError::InvalidRule { field, value, requirement });
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Loads a config from a JSON file.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = GameConfig::from_json_str(&data)?;
    info!(path = %path.display(), rows = config.rows, cols = config.cols, "loaded game config");
    Ok(config)
}

/// Loads the config named by `GAME_CONF`, or the defaults if unset.
pub fn load_config_from_env() -> Result<GameConfig, ConfigError> {
    match std::env::var_os(GAME_CONF_VAR) {
        Some(path) => {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(ConfigError::MissingFile { var: GAME_CONF_VAR, path });
            }
            load_config(&path)
        }
        None => Ok(GameConfig::default()),
    }
}
