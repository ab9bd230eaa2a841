//! Applies the single action a player takes during movement.

use tracing::debug;

use crate::board::{Action, AssetId, AssetInstance, GameState};
use crate::error::EngineError;

/// Applies a validated execution action for the player on move.
pub fn apply(state: &mut GameState, action: &Action) -> Result<(), EngineError> {
    let player = state.current;
    match *action {
        Action::Pass => {}
        Action::Move { asset, to } => {
            state.board.relocate(asset, to)?;
            let record = record_mut(state, asset, action)?;
            record.position = Some(to);
            record.has_moved = true;
            record.is_active = true;
        }
        Action::Launch { asset } => {
            let record = record_mut(state, asset, action)?;
            record.is_active = true;
            record.has_acted = true;
        }
        Action::Scout { asset } => {
            record_mut(state, asset, action)?.has_acted = true;
        }
        _ => return Err(EngineError::InvalidAction(*action)),
    }
    debug!(%player, turn = state.turn, %action, "applied");
    Ok(())
}

fn record_mut<'a>(
    state: &'a mut GameState,
    asset: AssetId,
    action: &Action,
) -> Result<&'a mut AssetInstance, EngineError> {
    state.asset_mut(asset).ok_or(EngineError::InvalidAction(*action))
}
