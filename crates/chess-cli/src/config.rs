//! Configuration file loading for the terminal front end.
//!
//! Settings live in `chess.toml` in the current directory unless another path
//! is given on the command line. A missing file means defaults.

use chess_engine::RuleOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Front end configuration.
///
/// ```toml
/// history_log = "games/fen.log"
/// show_board = true
///
/// [rules]
/// reset_halfmove_on_capture = true
/// castling_path_must_be_safe = true
/// king_contact_is_check = true
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CliConfig {
    /// Rule switches passed to the engine. Missing keys keep standard chess.
    #[serde(default)]
    pub rules: RuleOptions,
    /// File every reached position is appended to during `play`.
    #[serde(default)]
    pub history_log: Option<PathBuf>,
    /// Print the board after every move. Defaults to true.
    #[serde(default = "default_show_board")]
    pub show_board: bool,
}

fn default_show_board() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            rules: RuleOptions::default(),
            history_log: None,
            show_board: default_show_board(),
        }
    }
}

impl CliConfig {
    /// Default location of the configuration file.
    pub const DEFAULT_PATH: &'static str = "chess.toml";

    /// Loads the configuration from `path`.
    ///
    /// Returns the defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }
}
