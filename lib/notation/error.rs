use crate::chess::{EmptySquare, Piece, Square};
use derive_more::{Display, Error};

/// The reason why a move written in algebraic notation could not be resolved.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ResolveError {
    #[display(fmt = "no square in move `{}`", _0)]
    NoSquareInToken(#[error(not(source))] String),

    #[display(fmt = "no piece of the moving side on square `{}`", _0)]
    SourceNotFound(#[error(not(source))] Square),

    #[display(fmt = "no `{}` can reach square `{}`", _0, _1)]
    CandidateNotFound(Piece, Square),

    #[display(fmt = "move `{}` does not single out one piece", _0)]
    AmbiguousMove(#[error(not(source))] String),

    #[display(fmt = "no pawn to take en passant on square `{}`", _0)]
    EnPassantTargetMissing(#[error(not(source))] Square),

    #[display(fmt = "expected `{}` on square `{}` in order to castle", _0, _1)]
    CastlingPieceMissing(Piece, Square),

    #[display(fmt = "unrecognized move `{}`", _0)]
    UnrecognizedMoveShape(#[error(not(source))] String),
}

impl From<EmptySquare> for ResolveError {
    fn from(EmptySquare(sq): EmptySquare) -> Self {
        ResolveError::SourceNotFound(sq)
    }
}
