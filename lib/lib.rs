/// Chess domain types.
pub mod chess;
/// Resolution of moves written in algebraic notation.
pub mod notation;
/// Assorted utilities.
pub mod util;
