//! Positional evaluation heuristics shared by both engines.
//!
//! Everything here is a pure function over a board snapshot: hypothetical
//! moves are probed on throwaway clones and the input board is never mutated.
//! Sub-scores are clamped to their documented ranges so the adaptive skill
//! update downstream can never run away.

use chess::{BitBoard, Board, ChessMove, Color, MoveGen, Piece, Rank, Square};

/// The four central squares used for center-control scoring.
const CENTER_SQUARES: [Square; 4] = [Square::D4, Square::D5, Square::E4, Square::E5];

/// Standard material values in pawn units (king carries no material weight).
pub fn piece_value(piece: Piece) -> f32 {
    match piece {
        Piece::Pawn => 1.0,
        Piece::Knight => 3.0,
        Piece::Bishop => 3.0,
        Piece::Rook => 5.0,
        Piece::Queen => 9.0,
        Piece::King => 0.0,
    }
}

/// Signed material balance from White's perspective.
pub fn material_balance(board: &Board) -> f32 {
    let mut score = 0.0;
    for square in *board.combined() {
        if let Some(piece) = board.piece_on(square) {
            match board.color_on(square) {
                Some(Color::White) => score += piece_value(piece),
                Some(Color::Black) => score -= piece_value(piece),
                None => {}
            }
        }
    }
    score
}

/// Whether a move captures an enemy piece (including en passant).
pub fn is_capture(board: &Board, mv: ChessMove) -> bool {
    if board.piece_on(mv.get_dest()).is_some() {
        return true;
    }
    // En passant: a pawn moving diagonally onto an empty square
    board.piece_on(mv.get_source()) == Some(Piece::Pawn)
        && mv.get_source().get_file() != mv.get_dest().get_file()
}

/// Material value of the piece a move captures, 0.0 for quiet moves.
pub fn captured_value(board: &Board, mv: ChessMove) -> f32 {
    if let Some(piece) = board.piece_on(mv.get_dest()) {
        piece_value(piece)
    } else if is_capture(board, mv) {
        // En passant always takes a pawn
        piece_value(Piece::Pawn)
    } else {
        0.0
    }
}

/// Center control for the side to move, in [0, 1].
///
/// Each central square contributes 0.25 when occupied by the side to move,
/// or 0.15 when that side has a legal move landing on it.
pub fn center_control(board: &Board) -> f32 {
    let mover = board.side_to_move();
    let mut reachable = chess::EMPTY;
    for mv in MoveGen::new_legal(board) {
        reachable |= BitBoard::from_square(mv.get_dest());
    }

    let mut score: f32 = 0.0;
    for square in CENTER_SQUARES {
        if board.color_on(square) == Some(mover) {
            score += 0.25;
        } else if reachable & BitBoard::from_square(square) != chess::EMPTY {
            score += 0.15;
        }
    }
    score.min(1.0)
}

/// Fraction of the side-to-move's non-pawn pieces developed off the home
/// rank, normalized by the piece count beyond a bare-bones eight, in [0, 1].
pub fn piece_development(board: &Board) -> f32 {
    let mover = board.side_to_move();
    let home_rank = match mover {
        Color::White => Rank::First,
        Color::Black => Rank::Eighth,
    };

    let own = *board.color_combined(mover);
    let non_pawns = own & !*board.pieces(Piece::Pawn);
    let developed = non_pawns
        .filter(|square| square.get_rank() != home_rank)
        .count() as f32;

    let normalizer = (own.popcnt() as f32 - 8.0).max(1.0);
    (developed / normalizer).min(1.0)
}

/// Penalty for side-to-move pieces the opponent can capture right now,
/// 0.05 per pawn unit of exposed material, capped at 0.3.
///
/// Opponent replies are probed through a null move; when the side to move is
/// in check the probe is unavailable and the penalty degrades to zero.
pub fn undefended_penalty(board: &Board) -> f32 {
    let mover = board.side_to_move();
    let probe = match board.null_move() {
        Some(probe) => probe,
        None => return 0.0,
    };

    let mut attacked = chess::EMPTY;
    for mv in MoveGen::new_legal(&probe) {
        let dest = mv.get_dest();
        if board.color_on(dest) == Some(mover) {
            attacked |= BitBoard::from_square(dest);
        }
    }

    let mut penalty = 0.0;
    for square in attacked {
        if let Some(piece) = board.piece_on(square) {
            penalty += 0.05 * piece_value(piece);
        }
    }
    penalty.min(0.3)
}

/// Move-ordering score for alpha-beta efficiency.
///
/// Promotions score 15, captures 10 plus the captured value, checking moves
/// 5, quiet moves 0. Callers must use a stable sort so ties keep their
/// original move-list order.
pub fn move_heuristic(board: &Board, mv: ChessMove) -> f32 {
    if mv.get_promotion().is_some() {
        return 15.0;
    }
    if is_capture(board, mv) {
        return 10.0 + captured_value(board, mv);
    }
    let after = board.make_move_new(mv);
    if after.checkers().popcnt() > 0 {
        return 5.0;
    }
    0.0
}

/// Rough complexity measure: piece count plus a fifth of the legal move
/// count. Crowded, mobile positions score high and warrant shallower search.
pub fn position_complexity(board: &Board) -> f32 {
    let pieces = board.combined().popcnt() as f32;
    let moves = MoveGen::new_legal(board).len() as f32;
    pieces + 0.2 * moves
}
