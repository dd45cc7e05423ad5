use crate::chess::{Board, Color, File, Move, Piece, Rank, Role, Square};
use crate::notation::{candidates, disambiguate, Hint, ResolveError};
use arrayvec::ArrayVec;
use tracing::instrument;

/// One side's move as written in [SAN], along with where it appears in the game.
///
/// [SAN]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Standard_Algebraic_Notation_.28SAN.29
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MoveToken<'a> {
    /// The number of the move pair.
    pub pair: u32,
    /// The side to move.
    pub turn: Color,
    /// The move text, e.g. `Nbd7`.
    pub san: &'a str,
}

impl<'a> MoveToken<'a> {
    pub fn new(pair: u32, turn: Color, san: &'a str) -> Self {
        MoveToken { pair, turn, san }
    }
}

/// Removes the first occurrence of a marker past the leading character.
fn strip(san: &mut String, marker: char) -> bool {
    match san.char_indices().skip(1).find(|&(_, c)| c == marker) {
        None => false,
        Some((i, _)) => {
            san.remove(i);
            true
        }
    }
}

/// Every `[a-h][1-8]` pair in the text, left to right.
fn squares(san: &str) -> Vec<Square> {
    san.chars()
        .zip(san.chars().skip(1))
        .filter_map(|(f, r)| Some(Square::new(File::from_char(f)?, Rank::from_char(r)?)))
        .collect()
}

/// The [`Square`] of the pawn that makes a move ending on `whither` from `file`.
fn pawn_source(
    board: &Board,
    turn: Color,
    file: File,
    whither: Square,
) -> Result<Square, ResolveError> {
    let whence = Square::from_coords(whither.row() as i8 + turn.rearward(), file.col() as i8)
        .ok_or(ResolveError::SourceNotFound(whither))?;

    if board.piece_on(whence) == Some(Piece(turn, Role::Pawn)) {
        Ok(whence)
    } else {
        Err(ResolveError::SourceNotFound(whence))
    }
}

fn castle(board: &Board, m: Move, queenside: bool) -> Result<ArrayVec<Move, 2>, ResolveError> {
    let home = m.turn.home();
    let (king_to, rook_from, rook_to) = if queenside {
        (File::C, File::A, File::D)
    } else {
        (File::G, File::H, File::F)
    };

    let king = Piece(m.turn, Role::King);
    let rook = Piece(m.turn, Role::Rook);
    let (kw, rw) = (Square::new(File::E, home), Square::new(rook_from, home));

    if board.piece_on(kw) != Some(king) {
        return Err(ResolveError::CastlingPieceMissing(king, kw));
    } else if board.piece_on(rw) != Some(rook) {
        return Err(ResolveError::CastlingPieceMissing(rook, rw));
    }

    let king_move = Move {
        whence: kw,
        whither: Square::new(king_to, home),
        ..m
    };

    let rook_move = Move::new(m.pair, m.turn, rw, Square::new(rook_to, home));
    Ok([king_move, rook_move].into())
}

/// Resolves one move in algebraic notation against the current [`Board`].
///
/// Castling yields two moves, the king's followed by the rook's, every other move yields
/// exactly one. The board is only read, applying the moves is up to the caller.
#[instrument(level = "trace", skip(board), err)]
pub fn resolve(board: &Board, token: MoveToken<'_>) -> Result<ArrayVec<Move, 2>, ResolveError> {
    let raw = token.san;
    let unrecognized = || ResolveError::UnrecognizedMoveShape(raw.into());

    let mut san = raw.to_string();
    let mut m = Move::new(token.pair, token.turn, Square::A8, Square::A8);
    m.capture = strip(&mut san, 'x');
    m.checkmate = strip(&mut san, '#');
    m.check = strip(&mut san, '+');

    let found = squares(&san);
    let whither = found.last().copied();
    let leading = san.chars().next();

    if let Some((body, promotion)) = san.split_once('=') {
        let whither = whither.ok_or_else(|| ResolveError::NoSquareInToken(raw.into()))?;
        let file = leading.and_then(File::from_char).ok_or_else(unrecognized)?;

        let mut chars = promotion.chars();
        let role = match (chars.next(), chars.next()) {
            (Some(c), None) => Role::from_san(c.to_ascii_uppercase()),
            _ => None,
        };

        if body.len() < 2 || !matches!(role, Some(r) if r != Role::King) {
            return Err(unrecognized());
        }

        m.whence = pawn_source(board, m.turn, file, whither)?;
        m.whither = whither;
        m.promotion = role.map(|r| Piece(m.turn, r));
        return Ok([m].into_iter().collect());
    }

    match san.as_str() {
        "O-O" | "0-0" => return castle(board, m, false),
        "O-O-O" | "0-0-0" => return castle(board, m, true),
        _ => {}
    }

    let whither = whither.ok_or_else(|| ResolveError::NoSquareInToken(raw.into()))?;
    m.whither = whither;

    if san.chars().count() == 2 {
        let pawn = Piece(m.turn, Role::Pawn);
        let behind = |n: i8| whither.offset(n * m.turn.rearward(), 0);

        let whence = match behind(1) {
            Some(sq) if board.piece_on(sq).is_none() => behind(2),
            sq => sq,
        }
        .ok_or(ResolveError::SourceNotFound(whither))?;

        if board.piece_on(whence) != Some(pawn) {
            return Err(ResolveError::SourceNotFound(whence));
        }

        m.whence = whence;
        return Ok([m].into_iter().collect());
    }

    match leading {
        Some(c) if c.is_ascii_lowercase() => {
            let file = File::from_char(c).ok_or_else(unrecognized)?;
            if found.len() != 1 {
                return Err(unrecognized());
            }

            if board.piece_on(whither).is_none() {
                let victim = whither
                    .offset(m.turn.rearward(), 0)
                    .ok_or(ResolveError::EnPassantTargetMissing(whither))?;

                if board.piece_on(victim) != Some(Piece(!m.turn, Role::Pawn)) {
                    return Err(ResolveError::EnPassantTargetMissing(victim));
                }

                m.en_passant = true;
            }

            m.whence = pawn_source(board, m.turn, file, whither)?;
            m.capture = true;
            Ok([m].into_iter().collect())
        }

        Some(c) => {
            let role = Role::from_san(c).ok_or_else(unrecognized)?;
            let piece = Piece(m.turn, role);

            let hint = san
                .strip_suffix(&whither.to_string())
                .and_then(|s| s.get(c.len_utf8()..))
                .ok_or_else(unrecognized)?;

            let hint = match hint {
                "" => None,
                h => Some(Hint::parse(h).ok_or_else(unrecognized)?),
            };

            let mut live = board.by_piece(piece);
            m.whence = match (live.next(), live.next()) {
                (Some(sq), None) if sq != whither => sq,
                (None, _) | (Some(_), None) => {
                    return Err(ResolveError::CandidateNotFound(piece, whither))
                }

                _ => match (&candidates(board, piece, whither)[..], hint) {
                    ([], _) => return Err(ResolveError::CandidateNotFound(piece, whither)),
                    ([sq], _) => *sq,
                    (several, Some(h)) => disambiguate(several, h)
                        .ok_or_else(|| ResolveError::AmbiguousMove(raw.into()))?,
                    (_, None) => return Err(ResolveError::AmbiguousMove(raw.into())),
                },
            };

            Ok([m].into_iter().collect())
        }

        None => Err(unrecognized()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Integer;
    use test_strategy::proptest;

    fn white(san: &str) -> MoveToken<'_> {
        MoveToken::new(1, Color::White, san)
    }

    fn black(san: &str) -> MoveToken<'_> {
        MoveToken::new(1, Color::Black, san)
    }

    fn single(moves: ArrayVec<Move, 2>) -> Move {
        assert_eq!(moves.len(), 1);
        moves[0]
    }

    #[test]
    fn pawn_push_from_the_start() {
        let m = single(resolve(&Board::default(), white("e4")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::E2, Square::E4));
        assert!(!m.capture && !m.check && !m.checkmate && !m.en_passant && !m.is_promotion());

        let m = single(resolve(&Board::default(), black("c6")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::C7, Square::C6));
    }

    #[test]
    fn pawn_push_requires_a_pawn_behind() {
        assert_eq!(
            resolve(&Board::default(), white("e5")),
            Err(ResolveError::SourceNotFound(Square::E3))
        );

        assert_eq!(
            resolve(&Board::default(), white("e1")),
            Err(ResolveError::SourceNotFound(Square::E1))
        );
    }

    #[test]
    fn pawn_capture_takes_the_piece_on_the_destination() {
        let b: Board = "rnbqkbnr/pppp1ppp/4p3/3N4/4P3/8/PPPP1PPP/RNBQKB1R".parse().unwrap();
        let m = single(resolve(&b, black("exd5")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::E6, Square::D5));
        assert!(m.capture && !m.en_passant);

        assert_eq!(
            resolve(&b, black("cxd5")),
            Err(ResolveError::SourceNotFound(Square::C6))
        );
    }

    #[test]
    fn pawn_capture_onto_an_empty_square_is_en_passant() {
        let b: Board = "4k3/8/8/8/3Pp3/8/8/4K3".parse().unwrap();
        let m = single(resolve(&b, black("exd3")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::E4, Square::D3));
        assert!(m.capture && m.en_passant);
        assert_eq!(m.en_passant_victim(), Some(Square::D4));

        let b: Board = "4k3/8/8/8/4p3/8/8/4K3".parse().unwrap();
        assert_eq!(
            resolve(&b, black("exd3")),
            Err(ResolveError::EnPassantTargetMissing(Square::D4))
        );
    }

    #[test]
    fn pawn_capture_of_multiple_squares_is_not_supported() {
        let b: Board = "4k3/8/8/8/3Pp3/8/8/4K3".parse().unwrap();
        assert_eq!(
            resolve(&b, black("e4xd3")),
            Err(ResolveError::UnrecognizedMoveShape("e4xd3".into()))
        );
    }

    #[test]
    fn kingside_castling_moves_king_and_rook() {
        let b: Board = "r3k2r/8/8/8/8/8/8/R3K2R".parse().unwrap();
        let moves = resolve(&b, white("O-O+")).unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!((moves[0].whence.get(), moves[0].whither.get()), (60, 62));
        assert_eq!((moves[1].whence.get(), moves[1].whither.get()), (63, 61));
        assert!(moves[0].check && !moves[1].check);

        let moves = resolve(&b, black("0-0")).unwrap();
        assert_eq!((moves[0].whence.get(), moves[0].whither.get()), (4, 6));
        assert_eq!((moves[1].whence.get(), moves[1].whither.get()), (7, 5));
    }

    #[test]
    fn queenside_castling_moves_king_and_rook() {
        let b: Board = "r3k2r/8/8/8/8/8/8/R3K2R".parse().unwrap();
        let moves = resolve(&b, white("O-O-O")).unwrap();
        assert_eq!((moves[0].whence.get(), moves[0].whither.get()), (60, 58));
        assert_eq!((moves[1].whence.get(), moves[1].whither.get()), (56, 59));

        let moves = resolve(&b, black("O-O-O")).unwrap();
        assert_eq!((moves[0].whence.get(), moves[0].whither.get()), (4, 2));
        assert_eq!((moves[1].whence.get(), moves[1].whither.get()), (0, 3));
    }

    #[test]
    fn castling_requires_king_and_rook_in_place() {
        let b: Board = "r3k3/8/8/8/8/8/8/R4RK1".parse().unwrap();
        assert_eq!(
            resolve(&b, white("O-O")),
            Err(ResolveError::CastlingPieceMissing(
                Piece(Color::White, Role::King),
                Square::E1
            ))
        );

        assert_eq!(
            resolve(&b, black("O-O")),
            Err(ResolveError::CastlingPieceMissing(
                Piece(Color::Black, Role::Rook),
                Square::H8
            ))
        );
    }

    #[test]
    fn promotion_changes_the_pawn() {
        let b: Board = "3rk3/4P3/8/8/8/8/8/4K3".parse().unwrap();
        let m = single(resolve(&b, white("exd8=Q")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::E7, Square::D8));
        assert!(m.capture && m.is_promotion());
        assert_eq!(m.promotion, Some(Piece(Color::White, Role::Queen)));

        let m = single(resolve(&b, white("e8=n+")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::E7, Square::E8));
        assert!(m.check && !m.capture);
        assert_eq!(m.promotion, Some(Piece(Color::White, Role::Knight)));

        let b: Board = "4k3/8/8/8/8/8/1p6/R3K3".parse().unwrap();
        let m = single(resolve(&b, black("bxa1=R")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::B2, Square::A1));
        assert_eq!(m.promotion, Some(Piece(Color::Black, Role::Rook)));
    }

    #[test]
    fn promotion_requires_a_piece_to_promote_to() {
        let b: Board = "3rk3/4P3/8/8/8/8/8/4K3".parse().unwrap();
        for san in ["e8=", "e8=K", "e8=P", "e8=QQ"] {
            assert_eq!(
                resolve(&b, white(san)),
                Err(ResolveError::UnrecognizedMoveShape(san.into()))
            );
        }
    }

    #[test]
    fn piece_move_with_no_such_piece_fails() {
        let b: Board = "4k3/8/8/8/8/8/8/4K3".parse().unwrap();
        assert_eq!(
            resolve(&b, white("Nd2")),
            Err(ResolveError::CandidateNotFound(
                Piece(Color::White, Role::Knight),
                Square::D2
            ))
        );
    }

    #[test]
    fn knights_are_told_apart_by_geometry() {
        let b = Board::default();
        let m = single(resolve(&b, white("Nf3")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::G1, Square::F3));

        let m = single(resolve(&b, white("Nc3")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::B1, Square::C3));
    }

    #[test]
    fn knights_are_told_apart_by_hint() {
        let b: Board = "r3k3/8/8/8/8/8/8/1N2KN2".parse().unwrap();
        let m = single(resolve(&b, white("Nbd2")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::B1, Square::D2));

        let m = single(resolve(&b, white("Nfxd2")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::F1, Square::D2));
        assert!(m.capture);

        assert_eq!(
            resolve(&b, white("Nd2")),
            Err(ResolveError::AmbiguousMove("Nd2".into()))
        );

        assert_eq!(
            resolve(&b, white("N1d2")),
            Err(ResolveError::AmbiguousMove("N1d2".into()))
        );
    }

    #[test]
    fn rooks_are_told_apart_by_rank_or_file() {
        let b: Board = "4k3/8/8/R7/8/8/8/R3K3".parse().unwrap();
        let m = single(resolve(&b, white("R1a3")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::A1, Square::A3));

        let b: Board = "3r3r/8/8/8/8/8/8/4K1k1".parse().unwrap();
        let m = single(resolve(&b, black("Rdf8")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::D8, Square::F8));
    }

    #[test]
    fn queens_are_told_apart_by_square() {
        let b: Board = "4k3/8/8/8/7Q/8/8/Q5KQ".parse().unwrap();
        let m = single(resolve(&b, white("Qh4e1")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::H4, Square::E1));
    }

    #[test]
    fn bishops_are_told_apart_by_blocked_diagonals() {
        let b: Board = "4k3/6B1/8/8/8/8/1P6/B3K3".parse().unwrap();
        let m = single(resolve(&b, white("Bd4")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::G7, Square::D4));

        let b: Board = "4k3/8/8/8/8/8/1B6/B3K3".parse().unwrap();
        let m = single(resolve(&b, white("Bd4")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::B2, Square::D4));
    }

    #[test]
    fn single_piece_moves_regardless_of_geometry() {
        let b: Board = "4k3/8/8/8/8/8/8/B3K3".parse().unwrap();
        let m = single(resolve(&b, white("Bh8")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::A1, Square::H8));

        let m = single(resolve(&b, black("Kd7#")).unwrap());
        assert_eq!((m.whence, m.whither), (Square::E8, Square::D7));
        assert!(m.checkmate && !m.check);
    }

    #[test]
    fn tokens_without_squares_are_rejected() {
        assert_eq!(
            resolve(&Board::default(), white("Nz")),
            Err(ResolveError::NoSquareInToken("Nz".into()))
        );
    }

    #[test]
    fn long_tokens_are_scanned_to_the_end() {
        let san = "Naaaaaaaaaaaaaaaaaaaaaaaaaf3";
        assert_eq!(
            resolve(&Board::default(), white(san)),
            Err(ResolveError::UnrecognizedMoveShape(san.into()))
        );

        let san = "Nzzzzzzzzzzzzzzzzzzzzzzzzzzz";
        assert_eq!(
            resolve(&Board::default(), white(san)),
            Err(ResolveError::NoSquareInToken(san.into()))
        );
    }

    #[test]
    fn unknown_piece_letters_are_rejected() {
        assert_eq!(
            resolve(&Board::default(), white("Pe4x")),
            Err(ResolveError::UnrecognizedMoveShape("Pe4x".into()))
        );

        assert_eq!(
            resolve(&Board::default(), white("Ze4")),
            Err(ResolveError::UnrecognizedMoveShape("Ze4".into()))
        );
    }

    #[proptest]
    fn resolved_moves_never_stay_in_place(
        b: Board,
        turn: Color,
        #[strategy("[NBRQK]?[a-h]?x?[a-h][1-8](=[QRBN])?[+#]?")] san: String,
    ) {
        if let Ok(moves) = resolve(&b, MoveToken::new(1, turn, &san)) {
            for m in moves {
                assert_ne!(m.whence, m.whither);
                assert_eq!(m.turn, turn);
                assert_eq!(b.piece_on(m.whence).map(|p| p.color()), Some(turn));
            }
        }
    }
}
