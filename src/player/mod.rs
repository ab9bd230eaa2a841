//! Decision sources.
//!
//! A decision source picks one action ID from the legal set each time the
//! match driver asks. The engine never calls these; drivers do.

pub mod heuristic;
pub mod human;
pub mod model;
pub mod random;

use thiserror::Error;

use crate::board::ActionId;
use crate::movegen::Choice;
use crate::view::VisibleState;

pub use heuristic::HeuristicModel;
pub use human::HumanSource;
pub use model::{ModelSource, PolicyModel};
pub use random::RandomSource;

/// Why a decision source could not produce an action.
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("no legal actions to choose from")]
    NoLegalActions,

    #[error("input closed before an action was chosen")]
    InputClosed,

    #[error("model returned {got} scores for {expected} actions")]
    ScoreMismatch { expected: usize, got: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that picks actions for one player.
pub trait DecisionSource {
    /// Picks a purchase, placement, or finish during deployment.
    fn choose_deployment_action(
        &mut self,
        legal: &[Choice],
        view: &VisibleState,
    ) -> Result<ActionId, DecisionError>;

    /// Picks the single action for an execution turn.
    fn choose_battle_action(
        &mut self,
        legal: &[Choice],
        view: &VisibleState,
    ) -> Result<ActionId, DecisionError>;

    /// Short label for logs and match records.
    fn name(&self) -> &str;
}

impl<T: DecisionSource + ?Sized> DecisionSource for Box<T> {
    fn choose_deployment_action(
        &mut self,
        legal: &[Choice],
        view: &VisibleState,
    ) -> Result<ActionId, DecisionError> {
        (**self).choose_deployment_action(legal, view)
    }

    fn choose_battle_action(
        &mut self,
        legal: &[Choice],
        view: &VisibleState,
    ) -> Result<ActionId, DecisionError> {
        (**self).choose_battle_action(legal, view)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
