//! Action resolution.
//!
//! Applies one validated action to the game state and runs whatever
//! automatic phases follow it: a movement action is always followed by
//! combat and scouting within the same call.

pub mod combat;
pub mod deploy;
pub mod movement;
pub mod phase;
pub mod visibility;

pub use combat::{destroy_asset, resolve_combat, CombatReport};
pub use phase::{check_victory, end_turn, start_execution};
pub use visibility::{recompute_visibility, visible_enemies};

use tracing::debug;

use crate::board::{Action, GameState, Phase};
use crate::catalog::AssetCatalog;
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::movegen;

/// Validates and applies `action` for the player on move.
///
/// Validation runs to completion before anything is written, so on error
/// `state` is unchanged.
pub fn apply_action(
    state: &mut GameState,
    catalog: &AssetCatalog,
    config: &GameConfig,
    action: &Action,
) -> Result<(), EngineError> {
    movegen::validate(state, catalog, action)?;

    match state.phase {
        Phase::Deployment => match *action {
            Action::Purchase { asset_type } => deploy::purchase(state, catalog, asset_type).map(|_| ()),
            Action::Deploy { asset, to } => deploy::deploy(state, catalog, asset, to),
            Action::FinishDeployment => deploy::finish(state, catalog),
            _ => Err(EngineError::InvalidAction(*action)),
        },
        Phase::Movement => {
            movement::apply(state, action)?;

            state.phase = Phase::Combat;
            let report = resolve_combat(state, config.citadel_loss_penalty);
            if !report.is_empty() {
                debug!(destroyed = report.destroyed.len(), cells = ?report.engagements, "combat resolved");
            }
            if state.is_terminal() {
                return Ok(());
            }
            end_turn(state, catalog, config.turn_penalty);
            Ok(())
        }
        Phase::Combat | Phase::Scouting | Phase::Terminal => Err(EngineError::InvalidAction(*action)),
    }
}
