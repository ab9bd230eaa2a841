//! Interactive play over a line-oriented text stream.

use std::io::{BufRead, Write};

use super::{DecisionError, DecisionSource};
use crate::board::ActionId;
use crate::movegen::Choice;
use crate::view::VisibleState;

/// Prompts on `output` and reads action IDs from `input`, one per line.
///
/// Lines that are not a legal ID are rejected with a message and the
/// prompt repeats. End of input is an error.
pub struct HumanSource<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanSource { input, output }
    }

    fn prompt(&mut self, legal: &[Choice], view: &VisibleState) -> Result<ActionId, DecisionError> {
        if legal.is_empty() {
            return Err(DecisionError::NoLegalActions);
        }
        self.describe(legal, view)?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(DecisionError::InputClosed);
            }
            match line.trim().parse::<ActionId>() {
                Ok(id) if legal.iter().any(|c| c.id == id) => return Ok(id),
                Ok(id) => writeln!(self.output, "{id} is not a legal action")?,
                Err(_) => writeln!(self.output, "enter one of the listed action numbers")?,
            }
        }
    }

    fn describe(&mut self, legal: &[Choice], view: &VisibleState) -> Result<(), DecisionError> {
        writeln!(
            self.output,
            "{} to move, {} turn {}: {} VP (opponent {}), balance {}",
            view.player,
            view.phase.name(),
            view.turn,
            view.victory_points,
            view.opponent_victory_points,
            view.balance,
        )?;
        for asset in &view.assets {
            if let Some(pos) = asset.position {
                writeln!(self.output, "  own #{} {} at {pos}", asset.id.0, asset.asset_type)?;
            }
        }
        for enemy in &view.enemies {
            writeln!(self.output, "  enemy #{} {} at {}", enemy.id.0, enemy.asset_type, enemy.position)?;
        }
        for choice in legal {
            writeln!(self.output, "  [{}] {}", choice.id, choice.action)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> DecisionSource for HumanSource<R, W> {
    fn choose_deployment_action(
        &mut self,
        legal: &[Choice],
        view: &VisibleState,
    ) -> Result<ActionId, DecisionError> {
        self.prompt(legal, view)
    }

    fn choose_battle_action(
        &mut self,
        legal: &[Choice],
        view: &VisibleState,
    ) -> Result<ActionId, DecisionError> {
        self.prompt(legal, view)
    }

    fn name(&self) -> &str {
        "human"
    }
}
