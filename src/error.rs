//! Error types for the rules engine and its loaders.

use std::path::PathBuf;

use thiserror::Error;

use crate::board::{Action, ActionId, AssetId, AssetType, Coord};

/// Why the engine rejected an operation.
///
/// Every variant is detected before any mutation, so a rejected operation
/// leaves the game state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("action {0} is not legal in the current position")]
    IllegalAction(ActionId),

    #[error("{0} is not legal in the current position")]
    InvalidAction(Action),

    #[error("insufficient funds for {asset}: need {required}, have {available}")]
    InsufficientFunds {
        asset: AssetType,
        required: u32,
        available: u32,
    },

    #[error("player already owns a citadel")]
    CitadelAlreadyOwned,

    #[error("cannot purchase {0}: no launch site deployed yet")]
    NoLaunchSiteForMobile(AssetType),

    #[error("no friendly launch site at {0}")]
    NoLaunchSite(Coord),

    #[error("a static asset already occupies {0}")]
    OccupiedStatic(Coord),

    #[error("{0} is outside the permitted area")]
    OutOfBounds(Coord),

    #[error("the game is over")]
    GameOver,

    #[error("invalid board {rows}x{cols}: rows must be non-zero and cols even and non-zero")]
    InvalidBoard { rows: u16, cols: u16 },

    #[error("invalid {field} {value}: must be {requirement}")]
    InvalidRule {
        field: &'static str,
        value: i32,
        requirement: &'static str,
    },

    #[error("{0:?} is not on the board")]
    NotOnBoard(AssetId),

    #[error("asset catalog is missing {}", .0.map_or("every definition", AssetType::name))]
    CatalogMissing(Option<AssetType>),
}

/// Errors raised while loading or validating an asset catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate catalog entry for {0}")]
    Duplicate(AssetType),

    #[error("{var} points to {path}, which does not exist")]
    MissingFile { var: &'static str, path: PathBuf },

    #[error(transparent)]
    Invalid(#[from] EngineError),
}

/// Errors raised while loading or validating a game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{var} points to {path}, which does not exist")]
    MissingFile { var: &'static str, path: PathBuf },

    #[error(transparent)]
    Invalid(#[from] EngineError),
}
