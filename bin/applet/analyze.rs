use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Board;
use lib::game::{GameState, Layout};
use tracing::{info, instrument};

/// Analyzes a board layout.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Analyze {
    /// The layout to analyze in RON notation, the standard army by default.
    layout: Option<Layout>,
}

impl Analyze {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let game = match self.layout {
            Some(layout) => GameState::from(layout),
            None => GameState::from(Board::standard()),
        };

        game.validate()?;

        let moves: Vec<_> = game.board().moves(game.turn()).collect();

        info!(
            board = %game.board(),
            turn = %game.turn(),
            status = %game.status(),
            moves = moves.len(),
        );

        for m in moves {
            println!("{m}");
        }

        Ok(())
    }
}
