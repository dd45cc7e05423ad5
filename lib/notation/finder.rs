use crate::chess::{Board, File, Piece, Rank, Role, Square};
use arrayvec::ArrayVec;

const KNIGHT: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (2, 1),
    (1, 2),
    (1, -2),
    (2, -1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];

const ROYAL: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// How a [`Role`] covers the board, as a set of `(row, col)` steps.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Reach {
    /// A single step in each direction.
    Leap(&'static [(i8, i8)]),
    /// Any number of steps in each direction, until blocked.
    Slide(&'static [(i8, i8)]),
}

impl Reach {
    /// The [`Reach`] of a [`Role`].
    ///
    /// Pawns move differently depending on whether they capture, so they have none.
    pub fn of(role: Role) -> Option<Self> {
        match role {
            Role::Pawn => None,
            Role::Knight => Some(Reach::Leap(&KNIGHT)),
            Role::Bishop => Some(Reach::Slide(&DIAGONAL)),
            Role::Rook => Some(Reach::Slide(&ORTHOGONAL)),
            Role::Queen => Some(Reach::Slide(&ROYAL)),
            Role::King => Some(Reach::Leap(&ROYAL)),
        }
    }

    fn steps(&self) -> &'static [(i8, i8)] {
        match *self {
            Reach::Leap(s) | Reach::Slide(s) => s,
        }
    }
}

/// Squares holding a [`Piece`] that can reach the destination, in scan order.
///
/// The scan runs backwards from the destination, one direction at a time. Each direction
/// contributes at most one square, since sliding stops at the first occupied square.
pub fn candidates(board: &Board, piece: Piece, whither: Square) -> ArrayVec<Square, 8> {
    let mut found = ArrayVec::new();

    let reach = match Reach::of(piece.role()) {
        None => return found,
        Some(r) => r,
    };

    for &(rows, cols) in reach.steps() {
        let mut sq = whither;
        while let Some(next) = sq.offset(rows, cols) {
            sq = next;
            match board.piece_on(sq) {
                Some(p) if p == piece => {
                    found.push(sq);
                    break;
                }

                Some(_) => break,
                None if matches!(reach, Reach::Leap(_)) => break,
                None => continue,
            }
        }
    }

    found
}

/// The extra characters that tell apart pieces able to reach the same square.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Hint {
    File(File),
    Rank(Rank),
    Square(Square),
}

impl Hint {
    /// Parses a file letter, a rank digit or a whole square.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => File::from_char(c)
                .map(Hint::File)
                .or_else(|| Rank::from_char(c).map(Hint::Rank)),
            _ => s.parse().ok().map(Hint::Square),
        }
    }

    /// Whether the hint is consistent with a square.
    pub fn matches(&self, sq: Square) -> bool {
        match *self {
            Hint::File(f) => sq.file() == f,
            Hint::Rank(r) => sq.rank() == r,
            Hint::Square(s) => sq == s,
        }
    }
}

/// The one candidate consistent with the hint, if there is exactly one.
pub fn disambiguate(candidates: &[Square], hint: Hint) -> Option<Square> {
    let mut matching = candidates.iter().filter(|&&sq| hint.matches(sq));
    match (matching.next(), matching.next()) {
        (Some(&sq), None) => Some(sq),
        _ => None,
    }
}
