use crate::chess::{Board, Color, Move};
use crate::notation::{resolve, validate, InvalidSequence, MovePair, MoveToken, Options};
use crate::notation::{Observer, ResolveError};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// The outcome of replaying a sequence of [`MovePair`]s.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Replay {
    /// Every resolved move, in the order they were played.
    pub moves: Vec<Move>,
    /// The pairs the moves were resolved from.
    pub pairs: Vec<MovePair>,
}

/// The reason why replaying a sequence of [`MovePair`]s failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ReplayError {
    #[display(fmt = "invalid sequence of moves")]
    InvalidSequence(InvalidSequence),

    #[display(fmt = "failed to resolve {}'s move `{}` of pair {}", turn, san, pair)]
    #[from(ignore)]
    Unresolved {
        pair: u32,
        turn: Color,
        san: String,
        source: ResolveError,
    },
}

/// Plays moves in algebraic notation on a [`Board`], one after the other.
///
/// Each move is resolved against the board as left by the moves before it.
#[derive(Debug, Default, Clone)]
pub struct Sequencer {
    board: Board,
    moves: Vec<Move>,
    options: Options,
}

impl Sequencer {
    /// Starts from the given arrangement of pieces.
    pub fn new(board: Board) -> Self {
        Self::with_options(board, Options::default())
    }

    /// Starts from the given arrangement of pieces, with custom [`Options`].
    pub fn with_options(board: Board, options: Options) -> Self {
        Sequencer {
            board,
            moves: Vec::new(),
            options,
        }
    }

    /// The current arrangement of pieces.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Every move played so far.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// This sequencer's [`Options`].
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Resolves a move and applies it to the board.
    ///
    /// Returns the moves just played, two of them if castling.
    #[instrument(level = "trace", skip(self))]
    pub fn play(&mut self, token: MoveToken<'_>) -> Result<&[Move], ResolveError> {
        let start = self.moves.len();

        for mut m in resolve(&self.board, token)? {
            m.ordinal = self.moves.len();
            self.board.play(&m)?;
            debug!(ordinal = m.ordinal, pair = m.pair, turn = %m.turn, %m);
            self.moves.push(m);
        }

        Ok(&self.moves[start..])
    }

    /// Plays every move of a sequence of [`MovePair`]s, white's move before black's.
    ///
    /// Moves are numbered after those already played by this sequencer.
    /// The [`Observer`] is notified after each pair. Missing moves are skipped, unless
    /// [`Options::strict`] is set, in which case the sequence is [validated][`validate`]
    /// before anything is played.
    #[instrument(level = "trace", skip(self, pairs, observer), err)]
    pub fn replay<O: Observer>(
        &mut self,
        pairs: &[MovePair],
        mut observer: O,
    ) -> Result<Replay, ReplayError> {
        if self.options.strict {
            if let Err(e) = validate(pairs) {
                warn!(%e, "rejecting sequence of moves");
                return Err(e.into());
            }
        }

        let start = self.moves.len();

        for pair in pairs {
            for token in pair.tokens() {
                self.play(token)
                    .map_err(|source| ReplayError::Unresolved {
                        pair: token.pair,
                        turn: token.turn,
                        san: token.san.into(),
                        source,
                    })?;
            }

            observer.observe(pair, &self.board);
        }

        Ok(Replay {
            moves: self.moves[start..].to_vec(),
            pairs: pairs.to_vec(),
        })
    }
}
