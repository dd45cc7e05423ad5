use crate::chess::{Color, File, Move, Piece, Rank, Role, Square};
use crate::util::Integer;
use derive_more::{Display, Error};
use std::fmt::{self, Write};
use std::str::FromStr;

/// A chess piece with a stable identity, tracked across the moves of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Figure {
    /// Identifies this figure for as long as the [`Board`] exists.
    pub id: usize,
    /// What this figure currently is, which changes on promotion.
    pub piece: Piece,
    /// Where this figure stands, or `None` once it has been captured.
    pub square: Option<Square>,
}

impl Figure {
    /// Whether this figure has been taken off the board.
    #[inline(always)]
    pub fn is_captured(&self) -> bool {
        self.square.is_none()
    }
}

/// Represents an attempt to move a piece off an empty [`Square`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
#[display(fmt = "there is no piece on square `{}`", _0)]
pub struct EmptySquare(#[error(not(source))] pub Square);

/// The arrangement of pieces on the chess board.
///
/// No two pieces that are still in play ever share a [`Square`].
#[derive(Debug, Clone)]
pub struct Board {
    figures: Vec<Figure>,
}

impl Default for Board {
    /// The standard starting arrangement.
    fn default() -> Self {
        use Role::*;
        const BACK: [Role; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        Square::iter()
            .filter_map(|sq| {
                let role = BACK[sq.col() as usize];
                match sq.rank() {
                    Rank::Eighth => Some((Piece(Color::Black, role), sq)),
                    Rank::Seventh => Some((Piece(Color::Black, Pawn), sq)),
                    Rank::Second => Some((Piece(Color::White, Pawn), sq)),
                    Rank::First => Some((Piece(Color::White, role), sq)),
                    _ => None,
                }
            })
            .collect()
    }
}

/// Boards are equal if they hold the same pieces on the same squares.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Board {}

impl Board {
    /// Every figure ever placed on this board, captured or not.
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// An iterator over the pieces in play, in [`Square`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::iter().filter_map(|sq| Some((self.piece_on(sq)?, sq)))
    }

    /// The [`Piece`] on the given [`Square`], if any.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.figure_on(sq).map(|f| f.piece)
    }

    /// The [`Figure`] on the given [`Square`], if any.
    pub fn figure_on(&self, sq: Square) -> Option<&Figure> {
        self.figures.iter().find(|f| f.square == Some(sq))
    }

    /// [`Square`]s occupied by a [`Piece`], in the order the pieces were placed.
    pub fn by_piece(&self, p: Piece) -> impl Iterator<Item = Square> + '_ {
        self.figures
            .iter()
            .filter(move |f| f.piece == p)
            .filter_map(|f| f.square)
    }

    /// Takes the piece on the given [`Square`] out of play, if any.
    pub fn capture(&mut self, sq: Square) -> Option<Figure> {
        let f = self.figures.iter_mut().find(|f| f.square == Some(sq))?;
        f.square = None;
        Some(*f)
    }

    /// Applies a resolved [`Move`].
    ///
    /// Any piece on the destination is captured, as is the pawn taken en passant, and
    /// promotions change the moving piece in place.
    pub fn play(&mut self, m: &Move) -> Result<(), EmptySquare> {
        let i = match self.figures.iter().position(|f| f.square == Some(m.whence)) {
            None => return Err(EmptySquare(m.whence)),
            Some(i) => i,
        };

        if let Some(victim) = m.en_passant_victim() {
            self.capture(victim);
        }

        if m.whence != m.whither {
            self.capture(m.whither);
        }

        let figure = &mut self.figures[i];
        figure.square = Some(m.whither);
        if let Some(p) = m.promotion {
            figure.piece = p;
        }

        Ok(())
    }
}

/// Collects pieces into a board, later pieces replacing earlier ones on the same square.
impl FromIterator<(Piece, Square)> for Board {
    fn from_iter<I: IntoIterator<Item = (Piece, Square)>>(iter: I) -> Self {
        let mut mailbox = [None; 64];
        for (p, sq) in iter {
            mailbox[sq.get() as usize] = Some(p);
        }

        let figures = Square::iter()
            .zip(mailbox)
            .filter_map(|(sq, p)| Some((p?, sq)))
            .enumerate()
            .map(|(id, (piece, sq))| Figure {
                id,
                piece,
                square: Some(sq),
            })
            .collect();

        Board { figures }
    }
}

/// Prints the piece placement field of the [FEN] representation.
///
/// The alternate form `{:#}` prints a diagram instead, one line per rank.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter() {
            if rank != Rank::Eighth {
                f.write_char(if f.alternate() { '\n' } else { '/' })?;
            }

            let mut skip = 0;
            for file in File::iter() {
                match self.piece_on(Square::new(file, rank)) {
                    None if f.alternate() => f.write_char('.')?,
                    None => skip += 1,
                    Some(p) => {
                        if skip > 0 {
                            write!(f, "{skip}")?;
                            skip = 0;
                        }

                        write!(f, "{p}")?;
                    }
                }
            }

            if skip > 0 {
                write!(f, "{skip}")?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing the piece placement failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseBoardError {
    #[display(fmt = "expected 8 ranks separated by `/`")]
    InvalidRankCount,
    #[display(fmt = "rank {} does not add up to 8 squares", _0)]
    InvalidRankLength(#[error(not(source))] Rank),
    #[display(fmt = "unexpected character `{}` in piece placement", _0)]
    InvalidCharacter(#[error(not(source))] char),
}

/// Parses the piece placement field of the [FEN] representation.
///
/// A complete FEN record is also accepted, in which case all other fields are ignored.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let placement = s.split_whitespace().next().unwrap_or_default();
        let segments: Vec<_> = placement.split('/').collect();
        if segments.len() != 8 {
            return Err(ParseBoardError::InvalidRankCount);
        }

        let mut pieces = Vec::with_capacity(32);
        for (rank, segment) in Rank::iter().zip(segments) {
            let mut col = 0;
            for c in segment.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    col += skip as u8;
                } else if let Some(p) = Piece::from_char(c) {
                    if col < 8 {
                        pieces.push((p, Square::new(File::new(col), rank)));
                    }

                    col += 1;
                } else {
                    return Err(ParseBoardError::InvalidCharacter(c));
                }

                if col > 8 {
                    return Err(ParseBoardError::InvalidRankLength(rank));
                }
            }

            if col != 8 {
                return Err(ParseBoardError::InvalidRankLength(rank));
            }
        }

        Ok(pieces.into_iter().collect())
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, option, prelude::*};

        vec(option::of(any::<Piece>()), 64)
            .prop_map(|mailbox| {
                Square::iter()
                    .zip(mailbox)
                    .filter_map(|(sq, p)| Some((p?, sq)))
                    .collect::<Board>()
            })
            .boxed()
    }
}
