//! Standard Algebraic Notation over the rules engine's move type.
//!
//! The engine contract speaks SAN while the `chess` crate identifies moves by
//! source/destination squares, so both directions are needed: formatting for
//! moves an engine chose, parsing for externally supplied moves. Parsing is
//! done by matching against the generated SAN of every legal move, which
//! keeps the two directions consistent by construction.

use chess::{Board, ChessMove, File, MoveGen, Piece, Rank, Square};

fn file_char(file: File) -> char {
    (b'a' + file.to_index() as u8) as char
}

fn rank_char(rank: Rank) -> char {
    (b'1' + rank.to_index() as u8) as char
}

fn square_str(square: Square) -> String {
    format!("{}{}", file_char(square.get_file()), rank_char(square.get_rank()))
}

fn piece_letter(piece: Piece) -> &'static str {
    match piece {
        Piece::Pawn => "",
        Piece::Knight => "N",
        Piece::Bishop => "B",
        Piece::Rook => "R",
        Piece::Queen => "Q",
        Piece::King => "K",
    }
}

/// Render a legal move as SAN for the given position, including castling
/// notation, disambiguation, promotion suffix, and `+`/`#` markers.
pub fn move_to_san(board: &Board, mv: ChessMove) -> String {
    let source = mv.get_source();
    let dest = mv.get_dest();
    let piece = match board.piece_on(source) {
        Some(piece) => piece,
        None => return square_str(dest), // not a legal move for this board
    };

    let capture = board.piece_on(dest).is_some()
        || (piece == Piece::Pawn && source.get_file() != dest.get_file());

    let mut san = String::new();
    let castled = piece == Piece::King
        && (source.get_file().to_index() as i32 - dest.get_file().to_index() as i32).abs() == 2;

    if castled {
        san.push_str(if dest.get_file() == File::G { "O-O" } else { "O-O-O" });
    } else if piece == Piece::Pawn {
        if capture {
            san.push(file_char(source.get_file()));
            san.push('x');
        }
        san.push_str(&square_str(dest));
        if let Some(promotion) = mv.get_promotion() {
            san.push('=');
            san.push_str(piece_letter(promotion));
        }
    } else {
        san.push_str(piece_letter(piece));
        san.push_str(&disambiguation(board, piece, mv));
        if capture {
            san.push('x');
        }
        san.push_str(&square_str(dest));
    }

    let after = board.make_move_new(mv);
    if after.checkers().popcnt() > 0 {
        if MoveGen::new_legal(&after).len() == 0 {
            san.push('#');
        } else {
            san.push('+');
        }
    }
    san
}

/// Minimal disambiguation when another piece of the same kind can reach the
/// same destination: file first, then rank, then the full source square.
fn disambiguation(board: &Board, piece: Piece, mv: ChessMove) -> String {
    let source = mv.get_source();
    let rivals: Vec<Square> = MoveGen::new_legal(board)
        .filter(|other| {
            other.get_dest() == mv.get_dest()
                && other.get_source() != source
                && board.piece_on(other.get_source()) == Some(piece)
        })
        .map(|other| other.get_source())
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|rival| rival.get_file() != source.get_file()) {
        return file_char(source.get_file()).to_string();
    }
    if rivals.iter().all(|rival| rival.get_rank() != source.get_rank()) {
        return rank_char(source.get_rank()).to_string();
    }
    square_str(source)
}

/// Parse a SAN string against the legal moves of the given position.
///
/// Tolerant of missing or spurious check markers, annotation glyphs, and
/// zero-style castling (`0-0`). Returns `None` when the string does not
/// describe any legal move, the caller's graceful-degradation hook.
pub fn parse_san(board: &Board, san: &str) -> Option<ChessMove> {
    let wanted = normalize(san);
    if wanted.is_empty() {
        return None;
    }
    MoveGen::new_legal(board).find(|&mv| normalize(&move_to_san(board, mv)) == wanted)
}

fn normalize(san: &str) -> String {
    san.trim()
        .trim_end_matches(['+', '#', '!', '?'])
        .replace("0-0-0", "O-O-O")
        .replace("0-0", "O-O")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_pawn_and_knight_moves() {
        let board = Board::default();
        let e4 = ChessMove::new(Square::E2, Square::E4, None);
        assert_eq!(move_to_san(&board, e4), "e4");

        let nf3 = ChessMove::new(Square::G1, Square::F3, None);
        assert_eq!(move_to_san(&board, nf3), "Nf3");
    }

    #[test]
    fn test_castling() {
        let board = Board::from_str("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let short = ChessMove::new(Square::E1, Square::G1, None);
        assert_eq!(move_to_san(&board, short), "O-O");

        let long = ChessMove::new(Square::E1, Square::C1, None);
        assert_eq!(move_to_san(&board, long), "O-O-O");
    }

    #[test]
    fn test_disambiguation() {
        // Knights on a1 and c1 both reach b3
        let board = Board::from_str("4k3/8/8/8/8/8/8/N1N1K3 w - - 0 1").unwrap();
        let from_a = ChessMove::new(Square::A1, Square::B3, None);
        assert_eq!(move_to_san(&board, from_a), "Nab3");
    }

    #[test]
    fn test_promotion_with_check() {
        let board = Board::from_str("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let promote = ChessMove::new(Square::A7, Square::A8, Some(Piece::Queen));
        assert_eq!(move_to_san(&board, promote), "a8=Q+");
    }

    #[test]
    fn test_checkmate_suffix() {
        // Fool's mate delivery
        let board =
            Board::from_str("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2")
                .unwrap();
        let mate = ChessMove::new(Square::D8, Square::H4, None);
        assert_eq!(move_to_san(&board, mate), "Qh4#");
    }

    #[test]
    fn test_en_passant_capture() {
        let board = Board::from_str("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let ep = ChessMove::new(Square::E5, Square::D6, None);
        assert_eq!(move_to_san(&board, ep), "exd6");
    }

    #[test]
    fn test_parse_round_trip() {
        let board = Board::default();
        for mv in MoveGen::new_legal(&board) {
            let san = move_to_san(&board, mv);
            assert_eq!(parse_san(&board, &san), Some(mv), "round trip for {}", san);
        }
        assert_eq!(parse_san(&board, "e9"), None);
        assert_eq!(parse_san(&board, ""), None);
    }

    #[test]
    fn test_parse_tolerates_suffixes() {
        let board = Board::default();
        let e4 = ChessMove::new(Square::E2, Square::E4, None);
        assert_eq!(parse_san(&board, "e4!"), Some(e4));
        assert_eq!(parse_san(&board, " e4 "), Some(e4));
    }
}
