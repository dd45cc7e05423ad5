use crate::notation::MovePair;
use derive_more::{Display, Error};

/// The reason why a sequence of [`MovePair`]s is not a well formed game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum InvalidSequence {
    #[display(fmt = "move pair {} is missing a move", _0)]
    MissingMove(#[error(not(source))] u32),
    #[display(fmt = "move pair numbers must be positive")]
    NonPositiveNumber,
    #[display(fmt = "expected move pair {}, found {}", expected, found)]
    NotConsecutive { expected: u32, found: u32 },
}

/// Checks that every pair but the last has both moves, and that pairs are numbered
/// consecutively from `1`.
pub fn validate(pairs: &[MovePair]) -> Result<(), InvalidSequence> {
    let (_, init) = match pairs.split_last() {
        None => return Ok(()),
        Some(split) => split,
    };

    for p in init {
        if p.white.is_none() || p.black.is_none() {
            return Err(InvalidSequence::MissingMove(p.number));
        } else if p.number == 0 {
            return Err(InvalidSequence::NonPositiveNumber);
        }
    }

    for (expected, p) in (1u32..).zip(pairs) {
        if p.number == 0 {
            return Err(InvalidSequence::NonPositiveNumber);
        } else if p.number != expected {
            return Err(InvalidSequence::NotConsecutive {
                expected,
                found: p.number,
            });
        }
    }

    Ok(())
}
