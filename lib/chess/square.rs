use crate::chess::{File, ParseFileError, ParseRankError, Rank};
use crate::util::Integer;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Whether a row or column coordinate lies on the board.
#[inline(always)]
pub fn on_board(n: i8) -> bool {
    (0..8).contains(&n)
}

/// A square on the chess board.
///
/// Squares are numbered row by row from the top-left corner, so that `A8` is `0` and `H1`
/// is `63`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    #[inline(always)]
    pub fn new(f: File, r: Rank) -> Self {
        <Self as Integer>::new(r.row() * 8 + f.col())
    }

    /// Constructs [`Square`] from a pair of row and column, if both are on the board.
    #[inline(always)]
    pub fn from_coords(row: i8, col: i8) -> Option<Self> {
        if on_board(row) && on_board(col) {
            Some(<Self as Integer>::new((row * 8 + col) as u8))
        } else {
            None
        }
    }

    /// This square's [`File`].
    #[inline(always)]
    pub fn file(self) -> File {
        File::new(self.col())
    }

    /// This square's [`Rank`].
    #[inline(always)]
    pub fn rank(self) -> Rank {
        Rank::new(self.row())
    }

    /// This square's row, counting from the eighth rank.
    #[inline(always)]
    pub fn row(self) -> u8 {
        self.get() / 8
    }

    /// This square's column, counting from the a-file.
    #[inline(always)]
    pub fn col(self) -> u8 {
        self.get() % 8
    }

    /// The square displaced by a number of rows and columns, if it is on the board.
    #[inline(always)]
    pub fn offset(self, rows: i8, cols: i8) -> Option<Self> {
        let row = (self.row() as i8).checked_add(rows)?;
        let col = (self.col() as i8).checked_add(cols)?;
        Square::from_coords(row, col)
    }
}

unsafe impl Integer for Square {
    const MIN: u8 = Square::A8 as _;
    const MAX: u8 = Square::H1 as _;
}

impl From<Square> for u8 {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        sq.get()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.file(), f)?;
        fmt::Display::fmt(&self.rank(), f)?;
        Ok(())
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square")]
    InvalidFile(ParseFileError),
    #[display(fmt = "failed to parse square")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}
