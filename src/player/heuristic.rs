//! Handcrafted action scoring.
//!
//! Deployment: secure a citadel, then a launch site, then spend the budget
//! on strike and scouting assets up to a roster cap, placing the citadel
//! deep and sensors forward. Execution: close on the nearest spotted enemy
//! (or the enemy half when nothing is spotted) and trade into enemy mobile
//! assets whenever one is reachable.

use std::sync::Arc;

use super::model::PolicyModel;
use crate::board::{Action, AssetDefinition, AssetId, AssetType, Coord, Player};
use crate::catalog::AssetCatalog;
use crate::movegen::Choice;
use crate::view::VisibleState;

/// Placement always outranks buying, so the queue drains first.
const DEPLOY_BASE: f32 = 50.0;
const FINISH: f32 = 10.0;
const OVER_CAP: f32 = -10.0;
const TRADE_BONUS: f32 = 100.0;

/// Scores actions with fixed rules. Pair with [`super::ModelSource`].
#[derive(Debug, Clone)]
pub struct HeuristicModel {
    catalog: Arc<AssetCatalog>,
    /// Stop buying once this many assets are owned or queued.
    max_assets: usize,
}

impl HeuristicModel {
    pub fn new(catalog: Arc<AssetCatalog>) -> Self {
        HeuristicModel { catalog, max_assets: 10 }
    }

    pub fn with_max_assets(mut self, max_assets: usize) -> Self {
        self.max_assets = max_assets;
        self
    }

    fn score_action(&self, action: &Action, view: &VisibleState) -> f32 {
        match *action {
            Action::Purchase { asset_type } => self.purchase_score(asset_type, view),
            Action::Deploy { asset, to } => self.deploy_score(asset, to, view),
            Action::FinishDeployment => FINISH,
            Action::Pass => 0.0,
            Action::Move { asset, to } => self.move_score(asset, to, view),
            Action::Launch { .. } => 1.0,
            Action::Scout { .. } => 0.5,
        }
    }

    fn purchase_score(&self, asset_type: AssetType, view: &VisibleState) -> f32 {
        let Some(def) = self.catalog.get(asset_type) else {
            return OVER_CAP;
        };
        let owned = |t: AssetType| {
            view.assets.iter().chain(view.queue.iter()).any(|a| a.asset_type == t)
        };
        if asset_type == AssetType::Citadel {
            return 40.0;
        }
        if view.assets.len() + view.queue.len() >= self.max_assets {
            return OVER_CAP;
        }
        if asset_type.is_launch_site() {
            return if owned(asset_type) { 5.0 } else { 35.0 };
        }
        if def.is_mobile && def.weapon_range > 0 {
            return 20.0 + def.speed as f32 * 0.5;
        }
        if def.can_scout() {
            let has_scout = view
                .assets
                .iter()
                .chain(view.queue.iter())
                .filter_map(|a| self.catalog.get(a.asset_type))
                .any(AssetDefinition::can_scout);
            return if has_scout { 8.0 } else { 15.0 + def.visibility_range as f32 * 0.5 };
        }
        6.0
    }

    fn deploy_score(&self, asset: AssetId, to: Coord, view: &VisibleState) -> f32 {
        let Some(def) = view.own(asset).and_then(|a| self.catalog.get(a.asset_type)) else {
            return DEPLOY_BASE;
        };
        let depth = front_distance(view, to) as f32;
        let off_center = (i32::from(to.row) - i32::from(view.rows / 2)).unsigned_abs() as f32;
        let placement = match def.asset_type {
            AssetType::Citadel => depth - off_center * 0.1,
            t if t.is_launch_site() => -(depth - 2.0).abs(),
            _ if def.is_mobile => 0.0,
            _ if def.can_scout() => -depth,
            _ => -depth * 0.5,
        };
        DEPLOY_BASE + placement
    }

    fn move_score(&self, asset: AssetId, to: Coord, view: &VisibleState) -> f32 {
        let Some(own) = view.own(asset) else {
            return 0.0;
        };
        let (Some(from), Some(def)) = (own.position, self.catalog.get(own.asset_type)) else {
            return 0.0;
        };

        if def.weapon_range > 0 {
            let trade = view.enemies_at(to).any(|e| {
                self.catalog.get(e.asset_type).is_some_and(|d| d.is_mobile)
            });
            if trade {
                return TRADE_BONUS;
            }
        }

        let target = view
            .enemies
            .iter()
            .map(|e| e.position)
            .min_by_key(|p| from.manhattan(*p))
            .unwrap_or_else(|| enemy_center(view));
        let closer = from.manhattan(target) as f32 - to.manhattan(target) as f32;
        if def.can_scout() {
            closer * 1.5
        } else {
            closer * 2.0
        }
    }
}

impl PolicyModel for HeuristicModel {
    fn score(&self, legal: &[Choice], view: &VisibleState) -> Vec<f32> {
        legal.iter().map(|c| self.score_action(&c.action, view)).collect()
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

/// Columns between `to` and the viewer's side of the midline.
fn front_distance(view: &VisibleState, to: Coord) -> u16 {
    let half = view.cols / 2;
    match view.player {
        Player::Red => half.saturating_sub(1).abs_diff(to.col),
        Player::Blue => half.abs_diff(to.col),
    }
}

/// Middle of the opponent's deployment zone.
fn enemy_center(view: &VisibleState) -> Coord {
    let col = match view.player {
        Player::Red => view.cols * 3 / 4,
        Player::Blue => view.cols / 4,
    };
    Coord::new(view.rows / 2, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameEngine;
    use crate::player::{DecisionSource, ModelSource};

    fn chosen(engine: &GameEngine, model: &HeuristicModel) -> Action {
        let player = engine.current_player();
        let legal = engine.legal_choices(player);
        let view = engine.visible_state(player);
        let mut source = ModelSource::greedy(model.clone());
        let id = source.choose_deployment_action(&legal, &view).unwrap();
        legal.iter().find(|c| c.id == id).map(|c| c.action).unwrap()
    }

    #[test]
    fn buys_citadel_first_then_places_it_deep() {
        let mut engine = GameEngine::standard();
        let model = HeuristicModel::new(engine.catalog().clone());

        let first = chosen(&engine, &model);
        assert_eq!(first, Action::Purchase { asset_type: AssetType::Citadel });
        engine.apply_action(first).unwrap();

        match chosen(&engine, &model) {
            Action::Deploy { to, .. } => assert_eq!(to.col, 0),
            other => panic!("expected a placement, got {other}"),
        }
    }

    #[test]
    fn deployment_terminates_with_a_finish() {
        let mut engine = GameEngine::standard();
        let model = HeuristicModel::new(engine.catalog().clone()).with_max_assets(4);
        for _ in 0..50 {
            let action = chosen(&engine, &model);
            engine.apply_action(action).unwrap();
            if action == Action::FinishDeployment {
                let red = engine.state().ledger(Player::Red);
                assert!(red.has_citadel);
                assert!(red.queue.is_empty());
                assert!(red.launch_sites >= 1);
                return;
            }
        }
        panic!("heuristic never finished deploying");
    }

    #[test]
    fn front_distance_is_symmetric() {
        let engine = GameEngine::standard();
        let red = engine.visible_state(Player::Red);
        let blue = engine.visible_state(Player::Blue);
        assert_eq!(front_distance(&red, Coord::new(0, 9)), 0);
        assert_eq!(front_distance(&red, Coord::new(0, 0)), 9);
        assert_eq!(front_distance(&blue, Coord::new(0, 10)), 0);
        assert_eq!(front_distance(&blue, Coord::new(0, 19)), 9);
        assert_eq!(enemy_center(&red), Coord::new(5, 15));
        assert_eq!(enemy_center(&blue), Coord::new(5, 5));
    }
}
