//! Brinkmanship engine library.
//!
//! A two-player fog-of-war grid wargame: the board and asset model, the
//! phase machine, the dense action-ID codec, visibility, decision sources,
//! and a match driver for running games between them.

pub mod board;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod movegen;
pub mod player;
pub mod resolve;
pub mod selfplay;
pub mod view;

pub use board::{Action, ActionId, AssetType, Coord, Outcome, Phase, Player};
pub use catalog::AssetCatalog;
pub use config::GameConfig;
pub use engine::GameEngine;
pub use error::{CatalogError, ConfigError, EngineError};
pub use view::VisibleState;
