//! Board representation and game-state types.
//!
//! Contains coordinates, asset kinds and instances, the occupancy grid,
//! player ledgers, actions, and the overall game state.

pub mod action;
pub mod asset;
pub mod coord;
pub mod grid;
pub mod ledger;
pub mod state;

pub use action::{Action, ActionId};
pub use asset::{
    AssetDefinition, AssetId, AssetInstance, AssetType, ALL_ASSET_TYPES, ASSET_TYPE_COUNT,
};
pub use coord::{Coord, Dims, Player, Zone, ALL_PLAYERS};
pub use grid::{Board, Occupant};
pub use ledger::PlayerLedger;
pub use state::{GameState, Outcome, Phase};
