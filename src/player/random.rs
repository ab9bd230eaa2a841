//! Uniform random play.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{DecisionError, DecisionSource};
use crate::board::ActionId;
use crate::movegen::Choice;
use crate::view::VisibleState;

/// Picks uniformly among the legal actions.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: SmallRng,
}

impl RandomSource {
    /// Seeded for reproducible matches. A zero seed draws from entropy.
    pub fn new(seed: u64) -> Self {
        let rng = if seed != 0 {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_entropy()
        };
        RandomSource { rng }
    }

    fn pick(&mut self, legal: &[Choice]) -> Result<ActionId, DecisionError> {
        if legal.is_empty() {
            return Err(DecisionError::NoLegalActions);
        }
        Ok(legal[self.rng.gen_range(0..legal.len())].id)
    }
}

impl DecisionSource for RandomSource {
    fn choose_deployment_action(
        &mut self,
        legal: &[Choice],
        _view: &VisibleState,
    ) -> Result<ActionId, DecisionError> {
        self.pick(legal)
    }

    fn choose_battle_action(
        &mut self,
        legal: &[Choice],
        _view: &VisibleState,
    ) -> Result<ActionId, DecisionError> {
        self.pick(legal)
    }

    fn name(&self) -> &str {
        "random"
    }
}
