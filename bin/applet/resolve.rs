use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Board, Color};
use lib::notation::{MoveToken, Sequencer};
use tracing::{info, instrument};

/// Resolves a single move in algebraic notation.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Resolve {
    /// The arrangement of pieces in FEN notation.
    #[clap(short, long, default_value_t)]
    board: Board,

    /// Whether it is black's move.
    #[clap(long)]
    black: bool,

    /// The move in standard algebraic notation, e.g. `Nbd7`.
    san: String,
}

impl Resolve {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let turn = if self.black { Color::Black } else { Color::White };
        let mut sequencer = Sequencer::new(self.board);

        for m in sequencer.play(MoveToken::new(1, turn, &self.san))? {
            info!(%m, capture = m.capture, check = m.check, checkmate = m.checkmate);
            println!("{m}");
        }

        println!("{}", sequencer.board());
        Ok(())
    }
}
