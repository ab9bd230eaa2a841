//! Fog-of-war visibility.
//!
//! Visible sets are rebuilt from scratch on every call, Red first then Blue,
//! so the result depends only on positions and never on prior contents or
//! on whose turn it is.

use std::collections::BTreeSet;

use crate::board::{AssetId, GameState, Player, ALL_PLAYERS};
use crate::catalog::AssetCatalog;

/// Recomputes both players' visible-enemy sets.
pub fn recompute_visibility(state: &mut GameState, catalog: &AssetCatalog) {
    for player in ALL_PLAYERS {
        let seen = visible_enemies(state, catalog, player);
        state.visible[player.index()] = seen;
    }
}

/// Enemy assets inside the Manhattan range of some live friendly scout.
pub fn visible_enemies(state: &GameState, catalog: &AssetCatalog, player: Player) -> BTreeSet<AssetId> {
    let scouts: Vec<_> = state
        .roster(player)
        .filter_map(|a| {
            let range = catalog.get(a.asset_type)?.visibility_range;
            let pos = a.position?;
            (range > 0).then_some((pos, range))
        })
        .collect();

    let mut seen = BTreeSet::new();
    if scouts.is_empty() {
        return seen;
    }
    for enemy in state.roster(player.opponent()) {
        let Some(pos) = enemy.position else {
            continue;
        };
        if scouts.iter().any(|&(origin, range)| origin.manhattan(pos) <= range) {
            seen.insert(enemy.id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{AssetType, Coord, Occupant};
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

    #[test]
    fn radar_reveals_enemies_in_range() {
        let mut state = GameState::new(&GameConfig::default());
        let catalog = AssetCatalog::standard();
        // Short-range radar: radius 3.
        put_static(&mut state, AssetType::ShortRangeRadar, Player::Red, Coord::new(5, 9));
        let near = put_static(&mut state, AssetType::Citadel, Player::Blue, Coord::new(5, 11));
        let edge = put_static(&mut state, AssetType::Artillery, Player::Blue, Coord::new(4, 11));
        let far = put_static(&mut state, AssetType::LaunchSite, Player::Blue, Coord::new(5, 13));

        recompute_visibility(&mut state, &catalog);
        let red = state.visible_to(Player::Red);
        assert!(red.contains(&near));
        assert!(red.contains(&edge));
        assert!(!red.contains(&far));
        assert!(state.visible_to(Player::Blue).is_empty());
    }

    #[test]
    fn rebuild_clears_stale_entries() {
        let mut state = GameState::new(&GameConfig::default());
        let catalog = AssetCatalog::standard();
        state.visible[0].insert(AssetId(42));
        state.visible[1].insert(AssetId(7));
        recompute_visibility(&mut state, &catalog);
        assert!(state.visible_to(Player::Red).is_empty());
        assert!(state.visible_to(Player::Blue).is_empty());
    }

    #[test]
    fn current_player_is_untouched() {
        let mut state = GameState::new(&GameConfig::default());
        let catalog = AssetCatalog::standard();
        state.current = Player::Blue;
        recompute_visibility(&mut state, &catalog);
        assert_eq!(state.current, Player::Blue);
    }

    #[test]
    fn own_assets_are_never_listed() {
        let mut state = GameState::new(&GameConfig::default());
        let catalog = AssetCatalog::standard();
        put_static(&mut state, AssetType::LongRangeRadar, Player::Blue, Coord::new(0, 10));
        put_static(&mut state, AssetType::Citadel, Player::Blue, Coord::new(0, 11));
        recompute_visibility(&mut state, &catalog);
        assert!(state.visible_to(Player::Blue).is_empty());
    }
}
