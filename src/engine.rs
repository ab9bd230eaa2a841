//! The public rules engine.
//!
//! [`GameEngine`] owns one match and exposes the contract drivers use:
//! query legal action IDs, apply one, and inspect the outcome. Engines are
//! cheap to clone and share only the catalog, so many can run on separate
//! threads.

use std::sync::Arc;

use tracing::debug;

use crate::board::{Action, ActionId, AssetType, GameState, Outcome, Phase, Player};
use crate::catalog::AssetCatalog;
use crate::codec::ActionCodec;
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::movegen::{self, Choice};
use crate::resolve;
use crate::view::VisibleState;

/// One match of the game.
#[derive(Debug, Clone)]
pub struct GameEngine {
    catalog: Arc<AssetCatalog>,
    config: GameConfig,
    state: GameState,
}

impl GameEngine {
    /// Starts a match in deployment with Red on move.
    ///
    /// Fails if the board cannot be split into deployment zones or the
    /// catalog lacks a citadel.
    pub fn new(catalog: Arc<AssetCatalog>, config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(EngineError::CatalogMissing(None));
        }
        catalog.require(AssetType::Citadel)?;
        let state = GameState::new(&config);
        Ok(GameEngine { catalog, config, state })
    }

    /// A match on the default board with the standard catalog.
    pub fn standard() -> Self {
        let config = GameConfig::default();
        GameEngine {
            catalog: Arc::new(AssetCatalog::standard()),
            state: GameState::new(&config),
            config,
        }
    }

    pub fn catalog(&self) -> &Arc<AssetCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// The player on move.
    pub fn current_player(&self) -> Player {
        self.state.current
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    /// The ID space `player` has right now.
    pub fn codec(&self, player: Player) -> ActionCodec {
        ActionCodec::snapshot(&self.state, &self.catalog, player)
    }

    /// Legal action IDs for `player`, sorted ascending. Empty unless
    /// `player` is on move in a phase that takes input.
    pub fn legal_actions(&self, player: Player) -> Vec<ActionId> {
        movegen::legal_actions(&self.state, &self.catalog, player)
    }

    /// Legal actions for `player` with their decoded meaning.
    pub fn legal_choices(&self, player: Player) -> Vec<Choice> {
        movegen::legal_choices(&self.state, &self.catalog, player)
    }

    /// The meaning of `id` for the player on move.
    pub fn decode(&self, id: ActionId) -> Option<Action> {
        self.codec(self.state.current).decode(id)
    }

    /// Applies an action ID for the player on move.
    ///
    /// IDs are only meaningful against the snapshot they were listed from;
    /// re-fetch [`legal_actions`](Self::legal_actions) after every call.
    /// An ID that decodes to an action the rules forbid outright is reported
    /// as [`EngineError::IllegalAction`], same as one out of range.
    pub fn apply(&mut self, id: ActionId) -> Result<(), EngineError> {
        if self.state.is_terminal() {
            return Err(EngineError::GameOver);
        }
        let action = self.decode(id).ok_or(EngineError::IllegalAction(id))?;
        self.apply_action(action).map_err(|e| match e {
            EngineError::InvalidAction(_) => EngineError::IllegalAction(id),
            other => other,
        })
    }

    /// Applies a semantic action for the player on move. On error the
    /// state is unchanged.
    pub fn apply_action(&mut self, action: Action) -> Result<(), EngineError> {
        let player = self.state.current;
        resolve::apply_action(&mut self.state, &self.catalog, &self.config, &action)?;
        debug!(%player, %action, phase = self.state.phase.name(), "action applied");
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// The winning player. `None` while playing or after a draw.
    pub fn winner(&self) -> Option<Player> {
        self.state.winner()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    /// What `player` may observe, with fog of war applied.
    pub fn visible_state(&self, player: Player) -> VisibleState {
        VisibleState::capture(&self.state, &self.catalog, player)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::standard()
    }
}
