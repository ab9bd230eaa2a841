//! Deployment-phase legality.

use crate::board::{Action, GameState, Occupant};
use crate::catalog::AssetCatalog;
use crate::error::EngineError;

/// Checks a deployment action for the player on move without mutating.
pub fn check(state: &GameState, catalog: &AssetCatalog, action: &Action) -> Result<(), EngineError> {
    let player = state.current;
    let ledger = state.ledger(player);
    match *action {
        Action::Purchase { asset_type } => {
            let def = catalog.require(asset_type)?;
            ledger.check_purchase(def)
        }
        Action::Deploy { asset, to } => {
            if ledger.queue_position(asset).is_none() {
                return Err(EngineError::InvalidAction(*action));
            }
            let record = state.asset(asset).ok_or(EngineError::InvalidAction(*action))?;
            if !state.dims().zone(player).contains(to) {
                return Err(EngineError::OutOfBounds(to));
            }
            let def = catalog.require(record.asset_type)?;
            let occupant = Occupant {
                id: asset,
                owner: player,
                asset_type: record.asset_type,
                is_mobile: def.is_mobile,
            };
            state.board.check_place(&occupant, to)
        }
        Action::FinishDeployment => {
            if ledger.is_deployment_complete() {
                Ok(())
            } else {
                Err(EngineError::InvalidAction(*action))
            }
        }
        _ => Err(EngineError::InvalidAction(*action)),
    }
}
