use super::Color;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The result of a chess game, as recorded at the end of its movetext.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    /// One of the sides won.
    Win(Color),
    /// Neither side won.
    Draw,
    /// The game is unfinished or its result unknown.
    Undecided,
}

impl Outcome {
    /// The winning side, if one of the sides won.
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Win(c) => Some(c),
            _ => None,
        }
    }
}

/// Prints the result marker that terminates the movetext.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(Color::White) => f.write_str("1-0"),
            Outcome::Win(Color::Black) => f.write_str("0-1"),
            Outcome::Draw => f.write_str("1/2-1/2"),
            Outcome::Undecided => f.write_str("*"),
        }
    }
}

/// The reason why parsing [`Outcome`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse result, expected one of `1-0`, `0-1`, `1/2-1/2` or `*`")]
pub struct ParseOutcomeError;

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1-0" => Ok(Outcome::Win(Color::White)),
            "0-1" => Ok(Outcome::Win(Color::Black)),
            "1/2-1/2" => Ok(Outcome::Draw),
            "*" => Ok(Outcome::Undecided),
            _ => Err(ParseOutcomeError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn neither_side_wins_draws_or_undecided_games() {
        assert_eq!(Outcome::Draw.winner(), None);
        assert_eq!(Outcome::Undecided.winner(), None);
    }

    #[proptest]
    fn one_side_wins_if_decisive(c: Color) {
        assert_eq!(Outcome::Win(c).winner(), Some(c));
    }

    #[proptest]
    fn parsing_printed_outcome_is_an_identity(o: Outcome) {
        assert_eq!(o.to_string().parse(), Ok(o));
    }

    #[proptest]
    fn parsing_outcome_fails_for_anything_but_result_markers(
        #[filter(!["1-0", "0-1", "1/2-1/2", "*"].contains(&#s.as_str()))] s: String,
    ) {
        assert_eq!(s.parse::<Outcome>(), Err(ParseOutcomeError));
    }
}
