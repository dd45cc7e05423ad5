use crate::chess::{Color, Piece, Square};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// A board transition resolved from a move written in algebraic notation.
///
/// Castling resolves to two of these, one for the king followed by one for the rook.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Move {
    /// Position of this move among every move played by the same sequencer, starting at `0`.
    ///
    /// A sequencer that plays moves before replaying a game keeps counting from there.
    pub ordinal: usize,
    /// The number of the move pair this move belongs to.
    pub pair: u32,
    /// The side that made this move.
    pub turn: Color,
    /// The source [`Square`].
    pub whence: Square,
    /// The destination [`Square`].
    pub whither: Square,
    pub capture: bool,
    pub check: bool,
    pub checkmate: bool,
    pub en_passant: bool,
    /// The [`Piece`] a pawn turns into, if this is a promotion.
    pub promotion: Option<Piece>,
}

impl Move {
    /// A move of the given side between two squares, without any annotations.
    pub fn new(pair: u32, turn: Color, whence: Square, whither: Square) -> Self {
        Move {
            ordinal: 0,
            pair,
            turn,
            whence,
            whither,
            capture: false,
            check: false,
            checkmate: false,
            en_passant: false,
            promotion: None,
        }
    }

    /// Whether this move takes a piece.
    pub fn is_capture(&self) -> bool {
        self.capture
    }

    /// Whether this move gives check.
    pub fn is_check(&self) -> bool {
        self.check
    }

    /// Whether this move gives checkmate.
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Whether this is an en passant capture.
    pub fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    /// Whether this is a promotion move.
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// The square of the pawn taken en passant, if this is an en passant capture.
    ///
    /// That pawn sits right behind the destination, from the mover's point of view.
    pub fn en_passant_victim(&self) -> Option<Square> {
        if self.en_passant {
            self.whither.offset(self.turn.rearward(), 0)
        } else {
            None
        }
    }
}

/// Prints the move in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.whence, self.whither)?;

        if let Some(p) = self.promotion {
            f.write_char(p.role().letter())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Role;
    use test_strategy::proptest;

    #[proptest]
    fn new_move_carries_no_annotations(
        pair: u32,
        turn: Color,
        whence: Square,
        #[filter(#whence != #whither)] whither: Square,
    ) {
        let m = Move::new(pair, turn, whence, whither);
        assert!(!m.is_capture());
        assert!(!m.is_check());
        assert!(!m.is_checkmate());
        assert!(!m.is_en_passant());
        assert!(!m.is_promotion());
        assert_eq!(m.en_passant_victim(), None);
    }

    #[proptest]
    fn move_is_a_promotion_iff_it_carries_a_piece(mut m: Move, p: Piece) {
        m.promotion = Some(p);
        assert!(m.is_promotion());
        m.promotion = None;
        assert!(!m.is_promotion());
    }

    #[test]
    fn en_passant_victim_sits_behind_the_destination() {
        let mut m = Move::new(3, Color::White, Square::E5, Square::D6);
        m.capture = true;
        m.en_passant = true;
        assert_eq!(m.en_passant_victim(), Some(Square::D5));

        let mut m = Move::new(7, Color::Black, Square::C4, Square::B3);
        m.capture = true;
        m.en_passant = true;
        assert_eq!(m.en_passant_victim(), Some(Square::B4));
    }

    #[test]
    fn move_is_printed_in_pure_coordinate_notation() {
        assert_eq!(
            Move::new(1, Color::White, Square::E2, Square::E4).to_string(),
            "e2e4"
        );

        let mut m = Move::new(40, Color::Black, Square::B2, Square::A1);
        m.promotion = Some(Piece(Color::Black, Role::Queen));
        assert_eq!(m.to_string(), "b2a1q");
    }
}
