//! Loading the game configuration file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use arshooter_core::config::{ConfigError, GameConfig};

/// Why a config file could not be used.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Read and validate a JSON config file.
pub fn read_game_config(path: &Path) -> Result<GameConfig, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    GameConfig::from_json_str(&text).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Config for this run. Falls back to the defaults when no file is given or
/// the file is unusable.
pub fn load_game_config(path: Option<&Path>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    match read_game_config(path) {
        Ok(config) => {
            info!("loaded config from {}", path.display());
            config
        }
        Err(err) => {
            warn!("{err}; using default config");
            GameConfig::default()
        }
    }
}
