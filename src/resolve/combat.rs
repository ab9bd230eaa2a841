//! Combat adjudication after movement.
//!
//! Mobile assets of both players sharing a cell destroy each other. There is
//! no range or attack roll; static assets are never engaged.

use tracing::{debug, info};

use crate::board::{AssetId, Coord, GameState, Outcome, Phase, Player, ALL_PLAYERS};

/// What one combat step destroyed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub destroyed: Vec<AssetId>,
    /// Cells where fighting took place, row-major.
    pub engagements: Vec<Coord>,
}

impl CombatReport {
    pub fn is_empty(&self) -> bool {
        self.destroyed.is_empty()
    }
}

/// Destroys every mobile asset standing on a cell that also holds an enemy
/// mobile asset.
pub fn resolve_combat(state: &mut GameState, citadel_penalty: i32) -> CombatReport {
    let mut report = CombatReport::default();
    for (coord, occupants) in state.board.occupied_cells() {
        let mut present = [false; 2];
        for o in occupants.iter().filter(|o| o.is_mobile) {
            present[o.owner.index()] = true;
        }
        if present[0] && present[1] {
            report.engagements.push(coord);
            report
                .destroyed
                .extend(occupants.iter().filter(|o| o.is_mobile).map(|o| o.id));
        }
    }

    for &id in &report.destroyed {
        destroy_asset(state, id, citadel_penalty);
    }
    report
}

/// Removes an asset from play. Its arena record is kept and flagged.
///
/// Losing a citadel charges `citadel_penalty` and ends the match: the other
/// player wins, or the match is drawn if both citadels fall together.
pub fn destroy_asset(state: &mut GameState, id: AssetId, citadel_penalty: i32) {
    let Some(record) = state.asset_mut(id) else {
        return;
    };
    if record.is_destroyed {
        return;
    }
    record.is_destroyed = true;
    record.position = None;
    let (owner, asset_type) = (record.owner, record.asset_type);

    state.board.remove(id);
    state.destroyed.push(id);
    for visible in state.visible.iter_mut() {
        visible.remove(&id);
    }
    debug!(%owner, asset = %asset_type, id = id.0, "destroyed");

    if state.ledger_mut(owner).record_loss(id, asset_type, citadel_penalty) {
        let lost: Vec<Player> = ALL_PLAYERS
            .into_iter()
            .filter(|&p| state.ledger(p).citadel_lost)
            .collect();
        let outcome = match lost.as_slice() {
            [single] => Outcome::Winner(single.opponent()),
            _ => Outcome::Draw,
        };
        state.phase = Phase::Terminal;
        state.outcome = Some(outcome);
        info!(loser = %owner, ?outcome, "citadel destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{AssetType, Occupant};
    use crate::config::GameConfig;

    fn put_static(state: &mut GameState, asset_type: AssetType, owner: Player, at: Coord) -> AssetId {
        let id = state.spawn(asset_type, owner);
        state.board.place(Occupant { id, owner, asset_type, is_mobile: false }, at).unwrap();
        if let Some(a) = state.asset_mut(id) {
            a.position = Some(at);
        }
        state.ledger_mut(owner).record_deployment(id, asset_type);
        id
    }

    /// Deploys a mobile asset on a friendly site at `base`, then moves it to `at`.
    fn put_mobile(state: &mut GameState, asset_type: AssetType, owner: Player, base: Coord, at: Coord) -> AssetId {
        if !state.board.has_launch_site(base, owner) {
            put_static(state, AssetType::LaunchSite, owner, base);
        }
        let id = state.spawn(asset_type, owner);
        state.board.place(Occupant { id, owner, asset_type, is_mobile: true }, base).unwrap();
        state.board.relocate(id, at).unwrap();
        if let Some(a) = state.asset_mut(id) {
            a.position = Some(at);
        }
        state.ledger_mut(owner).record_deployment(id, asset_type);
        id
    }

    #[test]
    fn collocated_hostile_mobiles_are_destroyed() {
        let mut state = GameState::new(&GameConfig::default());
        let at = Coord::new(3, 10);
        let blue = put_mobile(&mut state, AssetType::Icbm, Player::Blue, at, at);
        let red = put_mobile(&mut state, AssetType::CruiseMissile, Player::Red, Coord::new(3, 9), at);

        let report = resolve_combat(&mut state, 100);
        assert_eq!(report.engagements, vec![at]);
        assert_eq!(report.destroyed.len(), 2);
        for id in [blue, red] {
            assert!(state.asset(id).unwrap().is_destroyed);
            assert!(state.board.occupants_at(at).iter().all(|o| o.id != id));
            assert!(state.destroyed.contains(&id));
        }
        assert!(!state.ledger(Player::Red).roster.contains(&red));
        // The launch site under them survives.
        assert!(state.board.static_occupant(at).is_some());
        assert!(!state.is_terminal());
    }

    #[test]
    fn friendly_stacks_are_peaceful() {
        let mut state = GameState::new(&GameConfig::default());
        let at = Coord::new(1, 1);
        put_mobile(&mut state, AssetType::Icbm, Player::Red, at, at);
        put_mobile(&mut state, AssetType::ReconPlane, Player::Red, at, at);
        let report = resolve_combat(&mut state, 100);
        assert!(report.is_empty());
        assert_eq!(state.board.occupants_at(at).len(), 3);
    }

    #[test]
    fn static_enemies_are_not_engaged() {
        let mut state = GameState::new(&GameConfig::default());
        let at = Coord::new(4, 12);
        put_static(&mut state, AssetType::LongRangeRadar, Player::Blue, at);
        let red = put_mobile(&mut state, AssetType::Icbm, Player::Red, Coord::new(4, 5), at);
        assert!(resolve_combat(&mut state, 100).is_empty());
        assert!(state.asset(red).unwrap().is_live());
    }

    #[test]
    fn citadel_loss_ends_the_match() {
        let mut state = GameState::new(&GameConfig::default());
        let citadel = put_static(&mut state, AssetType::Citadel, Player::Red, Coord::new(0, 0));
        put_static(&mut state, AssetType::Citadel, Player::Blue, Coord::new(0, 10));
        state.phase = Phase::Movement;

        destroy_asset(&mut state, citadel, 100);
        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::Blue));
        assert_eq!(state.ledger(Player::Red).victory_points, 0);
        assert!(!state.ledger(Player::Red).has_citadel);
        assert!(state.asset(citadel).unwrap().is_destroyed);
    }

    #[test]
    fn double_citadel_loss_is_a_draw() {
        let mut state = GameState::new(&GameConfig::default());
        let red = put_static(&mut state, AssetType::Citadel, Player::Red, Coord::new(0, 0));
        let blue = put_static(&mut state, AssetType::Citadel, Player::Blue, Coord::new(0, 10));
        destroy_asset(&mut state, red, 100);
        destroy_asset(&mut state, blue, 100);
        assert_eq!(state.outcome, Some(Outcome::Draw));
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn destroying_twice_is_a_no_op() {
        let mut state = GameState::new(&GameConfig::default());
        let radar = put_static(&mut state, AssetType::ShortRangeRadar, Player::Blue, Coord::new(5, 15));
        destroy_asset(&mut state, radar, 100);
        destroy_asset(&mut state, radar, 100);
        assert_eq!(state.destroyed, vec![radar]);
    }
}
