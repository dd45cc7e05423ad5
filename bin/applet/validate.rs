use crate::io::read;
use anyhow::{bail, Error as Anyhow};
use clap::Parser;
use lib::notation::{validate, Pgn};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Checks that the games in a record are numbered and complete.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Validate {
    /// The game record in PGN, read from standard input if omitted.
    path: Option<PathBuf>,
}

impl Validate {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let text = read(self.path.as_deref())?;
        let games = Pgn::parse_all(&text)?;

        let mut invalid = 0;
        for (game, pgn) in games.iter().enumerate() {
            match validate(&pgn.pairs) {
                Ok(()) => info!(game, pairs = pgn.pairs.len(), "valid"),
                Err(e) => {
                    warn!(game, %e, "invalid");
                    invalid += 1;
                }
            }
        }

        if invalid > 0 {
            bail!("{invalid} out of {} games are invalid", games.len());
        }

        Ok(())
    }
}
