//! Per-player snapshots with fog of war applied.
//!
//! A [`VisibleState`] is everything a decision source is allowed to know:
//! its own assets and economy, plus whichever enemy assets its scouts can
//! currently see. Unseen enemy assets never appear.

use serde::Serialize;

use crate::board::{AssetId, AssetInstance, AssetType, Coord, GameState, Outcome, Phase, Player};
use crate::catalog::AssetCatalog;

/// One of the viewer's own assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnAsset {
    pub id: AssetId,
    pub asset_type: AssetType,
    pub position: Option<Coord>,
    pub is_active: bool,
    pub has_moved: bool,
    pub has_acted: bool,
}

impl From<&AssetInstance> for OwnAsset {
    fn from(a: &AssetInstance) -> Self {
        OwnAsset {
            id: a.id,
            asset_type: a.asset_type,
            position: a.position,
            is_active: a.is_active,
            has_moved: a.has_moved,
            has_acted: a.has_acted,
        }
    }
}

/// An enemy asset the viewer's scouts can see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpottedAsset {
    pub id: AssetId,
    pub asset_type: AssetType,
    pub position: Coord,
}

/// What `player` may observe of the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleState {
    pub player: Player,
    pub phase: Phase,
    pub current: Player,
    pub turn: u32,
    pub rows: u16,
    pub cols: u16,
    pub balance: u32,
    pub victory_points: i32,
    pub opponent_victory_points: i32,
    pub has_citadel: bool,
    /// Purchased assets awaiting placement.
    pub queue: Vec<OwnAsset>,
    /// Deployed live assets in roster order.
    pub assets: Vec<OwnAsset>,
    pub enemies: Vec<SpottedAsset>,
    /// Units of each type the balance could still buy, in catalog order.
    pub affordable: Vec<(AssetType, u32)>,
    pub outcome: Option<Outcome>,
}

impl VisibleState {
    /// Captures `player`'s view of `state`.
    pub fn capture(state: &GameState, catalog: &AssetCatalog, player: Player) -> Self {
        let ledger = state.ledger(player);
        let dims = state.dims();
        let enemies = state
            .visible_to(player)
            .iter()
            .filter_map(|&id| state.asset(id))
            .filter(|a| a.is_live())
            .filter_map(|a| {
                Some(SpottedAsset { id: a.id, asset_type: a.asset_type, position: a.position? })
            })
            .collect();

        VisibleState {
            player,
            phase: state.phase,
            current: state.current,
            turn: state.turn,
            rows: dims.rows,
            cols: dims.cols,
            balance: ledger.balance,
            victory_points: ledger.victory_points,
            opponent_victory_points: state.ledger(player.opponent()).victory_points,
            has_citadel: ledger.has_citadel,
            queue: ledger
                .queue
                .iter()
                .filter_map(|&id| state.asset(id))
                .map(OwnAsset::from)
                .collect(),
            assets: state.roster(player).map(OwnAsset::from).collect(),
            enemies,
            affordable: catalog.affordable_counts(ledger.balance, ledger.citadel_purchased),
            outcome: state.outcome,
        }
    }

    /// The viewer's own asset with this ID, deployed or queued.
    pub fn own(&self, id: AssetId) -> Option<&OwnAsset> {
        self.assets.iter().chain(self.queue.iter()).find(|a| a.id == id)
    }

    /// Position of the viewer's citadel, if deployed.
    pub fn citadel(&self) -> Option<Coord> {
        self.assets
            .iter()
            .find(|a| a.asset_type == AssetType::Citadel)
            .and_then(|a| a.position)
    }

    /// Spotted enemies standing on `coord`.
    pub fn enemies_at(&self, coord: Coord) -> impl Iterator<Item = &SpottedAsset> {
        self.enemies.iter().filter(move |e| e.position == coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Occupant;
    use crate::config::GameConfig;
    use crate::resolve::recompute_visibility;

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
    fn unseen_enemies_are_hidden() {
        let mut state = GameState::new(&GameConfig::default());
        let catalog = AssetCatalog::standard();
        put_static(&mut state, AssetType::Citadel, Player::Red, Coord::new(0, 0));
        put_static(&mut state, AssetType::ShortRangeRadar, Player::Red, Coord::new(5, 9));
        let seen = put_static(&mut state, AssetType::Artillery, Player::Blue, Coord::new(5, 10));
        put_static(&mut state, AssetType::Citadel, Player::Blue, Coord::new(9, 19));
        recompute_visibility(&mut state, &catalog);

        let red = VisibleState::capture(&state, &catalog, Player::Red);
        assert_eq!(red.assets.len(), 2);
        assert_eq!(red.enemies.len(), 1);
        assert_eq!(red.enemies[0].id, seen);
        assert_eq!(red.enemies_at(Coord::new(5, 10)).count(), 1);
        assert_eq!(red.citadel(), Some(Coord::new(0, 0)));

        let blue = VisibleState::capture(&state, &catalog, Player::Blue);
        assert!(blue.enemies.is_empty());
        assert_eq!(blue.opponent_victory_points, 100);
    }

    #[test]
    fn snapshot_serializes() {
        let state = GameState::new(&GameConfig::default());
        let view = VisibleState::capture(&state, &AssetCatalog::standard(), Player::Red);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["phase"], "DEPLOYMENT");
        assert_eq!(json["player"], "red");
        assert_eq!(json["balance"], 125);
        assert_eq!(json["affordable"][0][0], "CITADEL");
        assert_eq!(json["affordable"][0][1], 1);
    }

    #[test]
    fn bought_citadel_is_no_longer_affordable() {
        let mut state = GameState::new(&GameConfig::default());
        let catalog = AssetCatalog::standard();
        let ledger = state.ledger_mut(Player::Red);
        ledger.purchase(catalog.require(AssetType::Citadel).unwrap(), AssetId(0)).unwrap();
        let view = VisibleState::capture(&state, &catalog, Player::Red);
        assert_eq!(view.affordable[0], (AssetType::Citadel, 0));
        assert_eq!(view.affordable[1], (AssetType::LaunchSite, 12));
    }
}
