use crate::util::Integer;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A row on the chess board.
///
/// Ranks are laid out the way boards are written down, top to bottom: [`Rank::Eighth`]
/// is row `0` and [`Rank::First`] is row `7`.
#[derive(
    Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Rank {
    #[display(fmt = "8")]
    Eighth,
    #[display(fmt = "7")]
    Seventh,
    #[display(fmt = "6")]
    Sixth,
    #[display(fmt = "5")]
    Fifth,
    #[display(fmt = "4")]
    Fourth,
    #[display(fmt = "3")]
    Third,
    #[display(fmt = "2")]
    Second,
    #[display(fmt = "1")]
    First,
}

impl Rank {
    /// Maps a rank digit to its [`Rank`], so that `'8'` is row `0`.
    #[inline(always)]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Rank::new(b'8' - c as u8)),
            _ => None,
        }
    }

    /// The row index, `0` for [`Rank::Eighth`].
    #[inline(always)]
    pub fn row(self) -> u8 {
        self.get()
    }
}

unsafe impl Integer for Rank {
    const MIN: u8 = Rank::Eighth as _;
    const MAX: u8 = Rank::First as _;
}

/// The reason why parsing [`Rank`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(
    fmt = "failed to parse rank, expected digit in the range `({}..={})`",
    "Rank::First",
    "Rank::Eighth"
)]
pub struct ParseRankError;

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::from_char(c).ok_or(ParseRankError),
            _ => Err(ParseRankError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn rank_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Rank>>(), size_of::<Rank>());
    }

    #[proptest]
    fn rank_digits_map_to_rows_from_top_to_bottom(#[strategy(1u8..=8)] d: u8) {
        let c = char::from(b'0' + d);
        assert_eq!(Rank::from_char(c).map(Rank::row), Some(8 - d));
    }

    #[proptest]
    fn parsing_printed_rank_is_an_identity(r: Rank) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[proptest]
    fn parsing_rank_fails_if_not_digit_between_1_and_8(
        #[filter(!('1'..='8').contains(&#c))] c: char,
    ) {
        assert_eq!(c.to_string().parse::<Rank>(), Err(ParseRankError));
    }

    #[proptest]
    fn parsing_rank_fails_if_length_not_one(#[filter(#s.chars().count() != 1)] s: String) {
        assert_eq!(s.parse::<Rank>(), Err(ParseRankError));
    }
}
