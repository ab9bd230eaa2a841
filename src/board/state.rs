//! Game state representation.
//!
//! Holds the complete snapshot of a match: phase, whose turn it is, the
//! occupancy grid, both ledgers, fog-of-war sets, and the asset arena.

use std::collections::BTreeSet;

use serde::Serialize;

use super::asset::{AssetId, AssetInstance, AssetType};
use super::coord::{Dims, Player};
use super::grid::Board;
use super::ledger::PlayerLedger;
use crate::config::GameConfig;

/// Phase of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Deployment,
    Movement,
    Combat,
    Scouting,
    Terminal,
}

impl Phase {
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Deployment => "DEPLOYMENT",
            Phase::Movement => "MOVEMENT",
            Phase::Combat => "COMBAT",
            Phase::Scouting => "SCOUTING",
            Phase::Terminal => "TERMINAL",
        }
    }
}

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// Complete match state at a point in time.
///
/// Asset records live in an arena indexed by [`AssetId`]; everything else
/// refers to assets by ID. Records are never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub phase: Phase,
    pub current: Player,
    /// Zero while deploying; one on the first execution turn.
    pub turn: u32,
    pub board: Board,
    pub ledgers: [PlayerLedger; 2],
    /// Enemy assets each player can currently see.
    pub visible: [BTreeSet<AssetId>; 2],
    /// Destroyed assets, in destruction order.
    pub destroyed: Vec<AssetId>,
    pub assets: Vec<AssetInstance>,
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Creates the initial state: deployment, Red to act, turn 0.
    pub fn new(config: &GameConfig) -> Self {
        let ledger = PlayerLedger::new(config.starting_balance, config.starting_victory_points);
        GameState {
            phase: Phase::Deployment,
            current: Player::Red,
            turn: 0,
            board: Board::new(Dims::new(config.rows, config.cols)),
            ledgers: [ledger.clone(), ledger],
            visible: [BTreeSet::new(), BTreeSet::new()],
            destroyed: Vec::new(),
            assets: Vec::new(),
            outcome: None,
        }
    }

    pub fn dims(&self) -> Dims {
        self.board.dims()
    }

    pub fn asset(&self, id: AssetId) -> Option<&AssetInstance> {
        self.assets.get(id.index())
    }

    pub fn asset_mut(&mut self, id: AssetId) -> Option<&mut AssetInstance> {
        self.assets.get_mut(id.index())
    }

    pub fn ledger(&self, player: Player) -> &PlayerLedger {
        &self.ledgers[player.index()]
    }

    pub fn ledger_mut(&mut self, player: Player) -> &mut PlayerLedger {
        &mut self.ledgers[player.index()]
    }

    /// Enemy assets `player` can currently see.
    pub fn visible_to(&self, player: Player) -> &BTreeSet<AssetId> {
        &self.visible[player.index()]
    }

    /// The ID the next created asset will receive.
    pub fn next_asset_id(&self) -> AssetId {
        AssetId(self.assets.len() as u32)
    }

    /// Adds a new unplaced asset to the arena.
    pub fn spawn(&mut self, asset_type: AssetType, owner: Player) -> AssetId {
        let id = self.next_asset_id();
        self.assets.push(AssetInstance::new(id, asset_type, owner));
        id
    }

    /// `player`'s live deployed assets in roster order.
    pub fn roster(&self, player: Player) -> impl Iterator<Item = &AssetInstance> + '_ {
        self.ledger(player)
            .roster
            .iter()
            .filter_map(move |&id| self.asset(id))
            .filter(|a| a.is_live())
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Some(Outcome::Winner(p)) => Some(p),
            _ => None,
        }
    }
}
