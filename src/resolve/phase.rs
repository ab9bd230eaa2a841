//! Phase sequencing logic.
//!
//! Drives the match from deployment into the repeating execution cycle:
//!
//! - Deployment    -> Movement (both players ready)
//! - Movement      -> Combat (after the mover's single action)
//! - Combat        -> Scouting, or Terminal on citadel loss
//! - Scouting      -> Movement with the other player on move, or Terminal

use tracing::info;

use crate::board::{GameState, Outcome, Phase, Player, ALL_PLAYERS};
use crate::catalog::AssetCatalog;

use super::visibility::recompute_visibility;

/// Enters the first execution turn: initial reveal, Red on move, turn 1.
pub fn start_execution(state: &mut GameState, catalog: &AssetCatalog) {
    state.phase = Phase::Movement;
    state.current = Player::Red;
    state.turn = 1;
    recompute_visibility(state, catalog);
    reset_turn_flags(state, Player::Red);
    info!(
        red_assets = state.ledger(Player::Red).roster.len(),
        blue_assets = state.ledger(Player::Blue).roster.len(),
        "execution phase started"
    );
}

/// Runs the scouting step that closes a turn: rebuilds visibility, charges
/// the mover the turn penalty, checks for victory, and hands the move over.
pub fn end_turn(state: &mut GameState, catalog: &AssetCatalog, turn_penalty: i32) {
    state.phase = Phase::Scouting;
    recompute_visibility(state, catalog);

    let mover = state.current;
    state.ledger_mut(mover).apply_penalty(turn_penalty);

    if let Some(outcome) = check_victory(state) {
        state.phase = Phase::Terminal;
        state.outcome = Some(outcome);
        info!(turn = state.turn, ?outcome, "match over");
        return;
    }

    let next = mover.opponent();
    state.current = next;
    if next == Player::Red {
        state.turn += 1;
    }
    reset_turn_flags(state, next);
    state.phase = Phase::Movement;
}

/// The outcome if either player is out of victory points or lost their
/// citadel. Both at once is a draw.
pub fn check_victory(state: &GameState) -> Option<Outcome> {
    let defeated: Vec<Player> = ALL_PLAYERS
        .into_iter()
        .filter(|&p| state.ledger(p).is_defeated())
        .collect();
    match defeated.as_slice() {
        [] => None,
        [loser] => Some(Outcome::Winner(loser.opponent())),
        _ => Some(Outcome::Draw),
    }
}

/// Clears `has_moved`/`has_acted` on every asset `player` has on the board.
pub fn reset_turn_flags(state: &mut GameState, player: Player) {
    let roster = state.ledger(player).roster.clone();
    for id in roster {
        if let Some(asset) = state.asset_mut(id) {
            asset.reset_turn_flags();
        }
    }
}
