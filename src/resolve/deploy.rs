//! Deployment-phase state changes: purchase, placement, readiness.

use tracing::{debug, info};

use crate::board::{Action, AssetId, AssetType, Coord, GameState, Occupant};
use crate::catalog::AssetCatalog;
use crate::error::EngineError;

use super::phase;

/// Buys one asset for the player on move and queues it.
pub fn purchase(
    state: &mut GameState,
    catalog: &AssetCatalog,
    asset_type: AssetType,
) -> Result<AssetId, EngineError> {
    let def = *catalog.require(asset_type)?;
    let player = state.current;
    let id = state.next_asset_id();
    state.ledger_mut(player).purchase(&def, id)?;
    state.spawn(asset_type, player);
    debug!(%player, asset = %asset_type, id = id.0, balance = state.ledger(player).balance, "purchased");
    Ok(id)
}

/// Places a queued asset on a cell of the player's zone.
pub fn deploy(
    state: &mut GameState,
    catalog: &AssetCatalog,
    asset: AssetId,
    to: Coord,
) -> Result<(), EngineError> {
    let player = state.current;
    if state.ledger(player).queue_position(asset).is_none() {
        return Err(EngineError::InvalidAction(Action::Deploy { asset, to }));
    }
    if !state.dims().zone(player).contains(to) {
        return Err(EngineError::OutOfBounds(to));
    }
    let asset_type = state
        .asset(asset)
        .map(|a| a.asset_type)
        .ok_or(EngineError::InvalidAction(Action::Deploy { asset, to }))?;
    let def = catalog.require(asset_type)?;
    let occupant = Occupant { id: asset, owner: player, asset_type, is_mobile: def.is_mobile };

    state.board.place(occupant, to)?;
    if let Some(record) = state.asset_mut(asset) {
        record.position = Some(to);
    }
    state.ledger_mut(player).record_deployment(asset, asset_type);
    debug!(%player, asset = %asset_type, id = asset.0, %to, "deployed");
    Ok(())
}

/// Marks the player on move ready. Play passes to the opponent until both
/// sides are ready, then the execution phase begins.
pub fn finish(state: &mut GameState, catalog: &AssetCatalog) -> Result<(), EngineError> {
    let player = state.current;
    if !state.ledger(player).is_deployment_complete() {
        return Err(EngineError::InvalidAction(Action::FinishDeployment));
    }
    state.ledger_mut(player).deployment_ready = true;
    info!(%player, "deployment finished");

    let opponent = player.opponent();
    if state.ledger(opponent).deployment_ready {
        phase::start_execution(state, catalog);
    } else {
        state.current = opponent;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Phase, Player};
    use crate::config::GameConfig;

    fn setup() -> (GameState, AssetCatalog) {
        (GameState::new(&GameConfig::default()), AssetCatalog::standard())
    }

    #[test]
    fn purchase_then_deploy() {
        let (mut state, catalog) = setup();
        let citadel = purchase(&mut state, &catalog, AssetType::Citadel).unwrap();
        let site = purchase(&mut state, &catalog, AssetType::LaunchSite).unwrap();
        assert_eq!(state.ledger(Player::Red).queue, vec![citadel, site]);
        assert_eq!(state.ledger(Player::Red).balance, 115);

        deploy(&mut state, &catalog, citadel, Coord::new(0, 0)).unwrap();
        deploy(&mut state, &catalog, site, Coord::new(0, 1)).unwrap();
        assert!(state.ledger(Player::Red).has_citadel);
        assert_eq!(state.asset(site).and_then(|a| a.position), Some(Coord::new(0, 1)));

        let icbm = purchase(&mut state, &catalog, AssetType::Icbm).unwrap();
        deploy(&mut state, &catalog, icbm, Coord::new(0, 1)).unwrap();
        assert_eq!(state.board.occupants_at(Coord::new(0, 1)).len(), 2);
    }

    #[test]
    fn failed_purchase_spawns_nothing() {
        let (mut state, catalog) = setup();
        let before = state.clone();
        assert!(purchase(&mut state, &catalog, AssetType::Satellite).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn failed_deploy_leaves_state_unchanged() {
        let (mut state, catalog) = setup();
        let a = purchase(&mut state, &catalog, AssetType::LongRangeRadar).unwrap();
        let b = purchase(&mut state, &catalog, AssetType::ShortRangeRadar).unwrap();
        deploy(&mut state, &catalog, a, Coord::new(3, 3)).unwrap();
        let before = state.clone();
        assert_eq!(
            deploy(&mut state, &catalog, b, Coord::new(3, 3)),
            Err(EngineError::OccupiedStatic(Coord::new(3, 3)))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn finish_hands_over_then_starts_execution() {
        let (mut state, catalog) = setup();
        for _ in 0..2 {
            let citadel = purchase(&mut state, &catalog, AssetType::Citadel).unwrap();
            let at = state.dims().zone(state.current).cell(0).unwrap();
            deploy(&mut state, &catalog, citadel, at).unwrap();
            finish(&mut state, &catalog).unwrap();
        }
        assert_eq!(state.phase, Phase::Movement);
        assert_eq!(state.current, Player::Red);
        assert_eq!(state.turn, 1);
    }

    #[test]
    fn finish_without_citadel_fails() {
        let (mut state, catalog) = setup();
        assert!(finish(&mut state, &catalog).is_err());
        assert_eq!(state.current, Player::Red);
    }
}
