//! Model-backed play.
//!
//! A [`PolicyModel`] scores legal actions; [`ModelSource`] turns the scores
//! into a choice, greedily or by softmax sampling at a temperature.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::{DecisionError, DecisionSource};
use crate::board::ActionId;
use crate::movegen::Choice;
use crate::view::VisibleState;

/// Scores legal actions from one player's point of view.
pub trait PolicyModel {
    /// One score per choice, in the same order. Higher is better.
    fn score(&self, legal: &[Choice], view: &VisibleState) -> Vec<f32>;

    fn name(&self) -> &str {
        "model"
    }
}

/// Picks actions from a [`PolicyModel`]'s scores.
#[derive(Debug, Clone)]
pub struct ModelSource<M> {
    model: M,
    /// Zero or below picks the best-scoring action.
    temperature: f32,
    rng: SmallRng,
}

impl<M: PolicyModel> ModelSource<M> {
    /// Greedy selection.
    pub fn greedy(model: M) -> Self {
        ModelSource { model, temperature: 0.0, rng: SmallRng::seed_from_u64(0) }
    }

    /// Softmax sampling at `temperature`, seeded for reproducibility.
    pub fn sampling(model: M, temperature: f32, seed: u64) -> Self {
        ModelSource { model, temperature, rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    fn pick(&mut self, legal: &[Choice], view: &VisibleState) -> Result<ActionId, DecisionError> {
        if legal.is_empty() {
            return Err(DecisionError::NoLegalActions);
        }
        let scores = self.model.score(legal, view);
        if scores.len() != legal.len() {
            return Err(DecisionError::ScoreMismatch { expected: legal.len(), got: scores.len() });
        }

        if self.temperature <= 0.0 {
            return Ok(legal[argmax(&scores)].id);
        }

        let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let weights: Vec<f64> = scores
            .iter()
            .map(|&s| f64::from((s - max) / self.temperature).exp())
            .collect();
        match WeightedIndex::new(&weights) {
            Ok(dist) => Ok(legal[dist.sample(&mut self.rng)].id),
            // All weights underflowed or were NaN.
            Err(_) => Ok(legal[argmax(&scores)].id),
        }
    }
}

/// Index of the highest score; the first one wins ties.
fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate() {
        if s > scores[best] {
            best = i;
        }
    }
    best
}

impl<M: PolicyModel> DecisionSource for ModelSource<M> {
    fn choose_deployment_action(
        &mut self,
        legal: &[Choice],
        view: &VisibleState,
    ) -> Result<ActionId, DecisionError> {
        self.pick(legal, view)
    }

    fn choose_battle_action(
        &mut self,
        legal: &[Choice],
        view: &VisibleState,
    ) -> Result<ActionId, DecisionError> {
        self.pick(legal, view)
    }

    fn name(&self) -> &str {
        self.model.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::engine::GameEngine;

    /// Prefers higher IDs.
    struct ById;

    impl PolicyModel for ById {
        fn score(&self, legal: &[Choice], _view: &VisibleState) -> Vec<f32> {
            legal.iter().map(|c| c.id as f32).collect()
        }
    }

    struct Broken;

    impl PolicyModel for Broken {
        fn score(&self, _legal: &[Choice], _view: &VisibleState) -> Vec<f32> {
            vec![1.0]
        }
    }

    #[test]
    fn greedy_takes_the_best_score() {
        let engine = GameEngine::standard();
        let legal = engine.legal_choices(Player::Red);
        let view = engine.visible_state(Player::Red);
        let mut source = ModelSource::greedy(ById);
        let best = legal.iter().map(|c| c.id).max().unwrap();
        assert_eq!(source.choose_deployment_action(&legal, &view).unwrap(), best);
    }

    #[test]
    fn sampling_stays_legal() {
        let engine = GameEngine::standard();
        let legal = engine.legal_choices(Player::Red);
        let view = engine.visible_state(Player::Red);
        let mut source = ModelSource::sampling(ById, 2.0, 9);
        for _ in 0..50 {
            let id = source.choose_deployment_action(&legal, &view).unwrap();
            assert!(legal.iter().any(|c| c.id == id));
        }
    }

    #[test]
    fn score_length_is_checked() {
        let engine = GameEngine::standard();
        let legal = engine.legal_choices(Player::Red);
        let view = engine.visible_state(Player::Red);
        let mut source = ModelSource::greedy(Broken);
        assert!(matches!(
            source.choose_deployment_action(&legal, &view),
            Err(DecisionError::ScoreMismatch { .. })
        ));
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(argmax(&[0.5]), 0);
    }
}
