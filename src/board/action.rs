//! Semantic actions for both phases.
//!
//! An [`Action`] is what a player means; an [`ActionId`] is how the codec
//! numbers it under the current snapshot. The two are related only through
//! [`crate::codec::ActionCodec`].

use std::fmt;

use serde::Serialize;

use super::asset::{AssetId, AssetType};
use super::coord::Coord;

/// Dense integer identifying one action under the current snapshot.
pub type ActionId = u32;

/// A player action in the deployment or execution phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Buy one asset of the given type into the purchased queue.
    Purchase { asset_type: AssetType },

    /// Place a queued asset on a cell of the player's zone.
    Deploy { asset: AssetId, to: Coord },

    /// Declare deployment complete and hand control to the opponent.
    FinishDeployment,

    /// Take the turn without doing anything.
    Pass,

    /// Move a mobile asset to a cell within its speed.
    Move { asset: AssetId, to: Coord },

    /// Launch a mobile asset standing on a friendly launch site.
    Launch { asset: AssetId },

    /// Spend a scouting asset's action for the turn.
    Scout { asset: AssetId },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Purchase { asset_type } => write!(f, "purchase {asset_type}"),
            Action::Deploy { asset, to } => write!(f, "deploy #{} at {to}", asset.0),
            Action::FinishDeployment => f.write_str("finish deployment"),
            Action::Pass => f.write_str("pass"),
            Action::Move { asset, to } => write!(f, "move #{} to {to}", asset.0),
            Action::Launch { asset } => write!(f, "launch #{}", asset.0),
            Action::Scout { asset } => write!(f, "scout with #{}", asset.0),
        }
    }
}
