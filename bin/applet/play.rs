use anyhow::Error as Anyhow;
use clap::Parser;
use derive_more::{Display, Error};
use lib::chess::{Board, Move, Promotion};
use lib::game::{GameState, Layout};
use std::str::FromStr;
use tracing::{info, instrument};

/// A [`Move`] optionally followed by the [`Promotion`] of the pawn moved.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq)]
#[display(fmt = "{_0}{}", "_1.map(|p| p.to_string()).unwrap_or_default()")]
struct Step(Move, Option<Promotion>);

/// The reason why parsing [`Step`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse move, expected coordinate notation like `e2e4` or `e7e8q`")]
struct ParseStepError;

impl FromStr for Step {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let m = s.get(..4).ok_or(ParseStepError)?;
        let m = m.parse().map_err(|_| ParseStepError)?;

        let p = match s.get(4..) {
            None | Some("") => None,
            Some(p) => Some(p.parse().map_err(|_| ParseStepError)?),
        };

        Ok(Step(m, p))
    }
}

/// Plays a sequence of moves and prints the resulting layout.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The starting layout in RON notation, the standard army by default.
    #[clap(short, long)]
    layout: Option<Layout>,

    /// Moves in coordinate notation, e.g. `e2e4` or `e7e8q`.
    #[clap(required = true)]
    moves: Vec<Step>,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut game = match self.layout {
            Some(layout) => GameState::from(layout),
            None => GameState::from(Board::standard()),
        };

        game.validate()?;

        replay(&mut game, &self.moves)?;
        println!("{}", Layout::from(&game));

        Ok(())
    }
}

/// Plays every step in order, failing if any step is left once the game is over.
fn replay(game: &mut GameState, steps: &[Step]) -> Result<(), Anyhow> {
    for (i, &Step(m, promotion)) in steps.iter().enumerate() {
        let report = game.play(m)?;
        let status = match (report.promotion(), promotion) {
            (Some(s), Some(p)) => game.promote(s, p)?,
            (Some(s), None) => game.promote(s, Promotion::Queen)?,
            (None, Some(p)) => anyhow::bail!("move `{m}` does not promote, cannot apply `{p}`"),
            (None, None) => report.status(),
        };

        info!(%m, capture = ?report.capture(), %status);

        let rest = &steps[i + 1..];
        if status.is_final() && !rest.is_empty() {
            let n = rest.len();
            anyhow::bail!("the game ended in {status} after `{m}`, {n} moves were not played");
        }
    }

    Ok(())
}
