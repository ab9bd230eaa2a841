//! Legal action generation.
//!
//! Enumerates the IDs a player may submit in the current state, covering
//! the deployment and execution phases.

pub mod deployment;
pub mod execution;

use rand::Rng;
use serde::Serialize;

use crate::board::{Action, ActionId, GameState, Phase, Player};
use crate::catalog::AssetCatalog;
use crate::codec::ActionCodec;
use crate::error::EngineError;

/// A legal action paired with its ID under the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Choice {
    pub id: ActionId,
    pub action: Action,
}

/// Checks whether the player on move may take `action`, without mutating.
pub fn validate(state: &GameState, catalog: &AssetCatalog, action: &Action) -> Result<(), EngineError> {
    match state.phase {
        Phase::Terminal => Err(EngineError::GameOver),
        Phase::Deployment => deployment::check(state, catalog, action),
        Phase::Movement => execution::check(state, catalog, action),
        Phase::Combat | Phase::Scouting => Err(EngineError::InvalidAction(*action)),
    }
}

/// Every legal (ID, action) pair for `player`, in ascending ID order.
pub fn legal_choices(state: &GameState, catalog: &AssetCatalog, player: Player) -> Vec<Choice> {
    let codec = ActionCodec::snapshot(state, catalog, player);
    codec
        .iter()
        .filter(|(_, action)| validate(state, catalog, action).is_ok())
        .map(|(id, action)| Choice { id, action })
        .collect()
}

/// Legal action IDs for `player`, sorted ascending.
pub fn legal_actions(state: &GameState, catalog: &AssetCatalog, player: Player) -> Vec<ActionId> {
    legal_choices(state, catalog, player)
        .into_iter()
        .map(|c| c.id)
        .collect()
}

/// Picks one legal action for `player` uniformly at random.
pub fn random_action(
    state: &GameState,
    catalog: &AssetCatalog,
    player: Player,
    rng: &mut impl Rng,
) -> Option<Choice> {
    let legal = legal_choices(state, catalog, player);
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..legal.len());
    Some(legal[idx])
}
