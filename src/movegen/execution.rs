//! Execution-phase legality.

use crate::board::{Action, AssetDefinition, AssetId, AssetInstance, GameState};
use crate::catalog::AssetCatalog;
use crate::error::EngineError;

/// Checks an execution action for the player on move without mutating.
pub fn check(state: &GameState, catalog: &AssetCatalog, action: &Action) -> Result<(), EngineError> {
    match *action {
        Action::Pass => Ok(()),
        Action::Move { asset, to } => {
            let (record, def) = own_live_asset(state, catalog, asset, action)?;
            if !def.is_mobile || record.has_moved {
                return Err(EngineError::InvalidAction(*action));
            }
            if !state.dims().contains(to) {
                return Err(EngineError::OutOfBounds(to));
            }
            let from = record.position.ok_or(EngineError::InvalidAction(*action))?;
            if from.manhattan(to) > def.speed {
                return Err(EngineError::InvalidAction(*action));
            }
            Ok(())
        }
        Action::Launch { asset } => {
            let (record, def) = own_live_asset(state, catalog, asset, action)?;
            if !def.is_mobile || record.is_active {
                return Err(EngineError::InvalidAction(*action));
            }
            let at = record.position.ok_or(EngineError::InvalidAction(*action))?;
            if !state.board.has_launch_site(at, state.current) {
                return Err(EngineError::NoLaunchSite(at));
            }
            Ok(())
        }
        Action::Scout { asset } => {
            let (record, def) = own_live_asset(state, catalog, asset, action)?;
            if !def.can_scout() || record.has_acted {
                return Err(EngineError::InvalidAction(*action));
            }
            Ok(())
        }
        _ => Err(EngineError::InvalidAction(*action)),
    }
}

/// Resolves an asset the player on move owns and still has on the board.
fn own_live_asset<'a>(
    state: &'a GameState,
    catalog: &'a AssetCatalog,
    id: AssetId,
    action: &Action,
) -> Result<(&'a AssetInstance, &'a AssetDefinition), EngineError> {
    let record = state
        .asset(id)
        .filter(|a| a.owner == state.current && a.is_live())
        .ok_or(EngineError::InvalidAction(*action))?;
    let def = catalog.require(record.asset_type)?;
    Ok((record, def))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{AssetType, Coord, Occupant, Phase, Player};
    use crate::config::GameConfig;

    fn put(state: &mut GameState, asset_type: AssetType, owner: Player, at: Coord, is_mobile: bool) -> AssetId {
        let id = state.spawn(asset_type, owner);
        state.board.place(Occupant { id, owner, asset_type, is_mobile }, at).unwrap();
        if let Some(a) = state.asset_mut(id) {
            a.position = Some(at);
        }
        state.ledger_mut(owner).record_deployment(id, asset_type);
        id
    }

    fn movement_state() -> (GameState, AssetCatalog, AssetId) {
        let mut state = GameState::new(&GameConfig::default());
        put(&mut state, AssetType::LaunchSite, Player::Red, Coord::new(4, 4), false);
        let cruise = put(&mut state, AssetType::CruiseMissile, Player::Red, Coord::new(4, 4), true);
        state.phase = Phase::Movement;
        (state, AssetCatalog::standard(), cruise)
    }

    #[test]
    fn move_within_speed() {
        let (state, catalog, cruise) = movement_state();
        assert!(check(&state, &catalog, &Action::Move { asset: cruise, to: Coord::new(6, 6) }).is_ok());
        let far = Action::Move { asset: cruise, to: Coord::new(9, 9) };
        assert_eq!(check(&state, &catalog, &far), Err(EngineError::InvalidAction(far)));
        let off = Coord::new(4, 20);
        assert_eq!(
            check(&state, &catalog, &Action::Move { asset: cruise, to: off }),
            Err(EngineError::OutOfBounds(off))
        );
    }

    #[test]
    fn enemy_assets_cannot_be_commanded() {
        let (mut state, catalog, cruise) = movement_state();
        state.current = Player::Blue;
        let action = Action::Move { asset: cruise, to: Coord::new(4, 5) };
        assert_eq!(check(&state, &catalog, &action), Err(EngineError::InvalidAction(action)));
    }

    #[test]
    fn launch_requires_friendly_site() {
        let (mut state, catalog, cruise) = movement_state();
        assert!(check(&state, &catalog, &Action::Launch { asset: cruise }).is_ok());
        state.board.relocate(cruise, Coord::new(4, 5)).unwrap();
        if let Some(a) = state.asset_mut(cruise) {
            a.position = Some(Coord::new(4, 5));
        }
        assert_eq!(
            check(&state, &catalog, &Action::Launch { asset: cruise }),
            Err(EngineError::NoLaunchSite(Coord::new(4, 5)))
        );
    }

    #[test]
    fn scout_requires_visibility_range() {
        let (mut state, catalog, cruise) = movement_state();
        let action = Action::Scout { asset: cruise };
        assert_eq!(check(&state, &catalog, &action), Err(EngineError::InvalidAction(action)));

        let radar = put(&mut state, AssetType::ShortRangeRadar, Player::Red, Coord::new(0, 0), false);
        assert!(check(&state, &catalog, &Action::Scout { asset: radar }).is_ok());
        if let Some(a) = state.asset_mut(radar) {
            a.has_acted = true;
        }
        assert!(check(&state, &catalog, &Action::Scout { asset: radar }).is_err());
    }
}
