use crate::io::read;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Board;
use lib::notation::{Options, Pgn, Sequencer, Tracer};
use ron::ser::{to_string_pretty, PrettyConfig};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Resolves every move of the games in a record.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Replay {
    /// The arrangement of pieces games start from, in FEN notation.
    #[clap(short, long, default_value_t)]
    board: Board,

    /// The replay configuration.
    #[clap(short, long, default_value_t)]
    options: Options,

    /// The game record in PGN, read from standard input if omitted.
    path: Option<PathBuf>,
}

impl Replay {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let text = read(self.path.as_deref())?;

        for (game, pgn) in Pgn::parse_all(&text)?.into_iter().enumerate() {
            let mut sequencer = Sequencer::with_options(self.board.clone(), self.options);
            let replay = if self.options.diagram {
                sequencer.replay(&pgn.pairs, Tracer)?
            } else {
                sequencer.replay(&pgn.pairs, ())?
            };

            info!(
                game,
                moves = replay.moves.len(),
                outcome = %pgn.outcome.map_or_else(|| "?".to_string(), |o| o.to_string()),
                winner = ?pgn.outcome.and_then(|o| o.winner()),
                board = %sequencer.board(),
            );

            println!("{}", to_string_pretty(&replay, PrettyConfig::default())?);
        }

        Ok(())
    }
}
