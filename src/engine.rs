//! The capability surface shared by both engine personalities.
//!
//! The adaptive and hyperbolic engines differ in state and algorithm (full
//! minimax versus one-ply greedy) but expose the same two operations, so the
//! orchestrator holds either behind a trait object or the tagged variant.

use chess::Board;

use crate::adaptive::AdaptiveEngine;
use crate::hyperbolic::HyperbolicEngine;

/// Move selection and evaluation, the contract the orchestrator consumes.
pub trait MoveSelector {
    /// Pick a move in SAN, or `None` when the position has no legal moves.
    fn choose_move(&mut self, board: &Board) -> Option<String>;
    /// Signed evaluation of a position from White's perspective.
    fn evaluate_board(&self, board: &Board) -> f32;
}

impl MoveSelector for AdaptiveEngine {
    fn choose_move(&mut self, board: &Board) -> Option<String> {
        AdaptiveEngine::choose_move(self, board)
    }

    fn evaluate_board(&self, board: &Board) -> f32 {
        AdaptiveEngine::evaluate_board(self, board)
    }
}

impl MoveSelector for HyperbolicEngine {
    fn choose_move(&mut self, board: &Board) -> Option<String> {
        HyperbolicEngine::choose_move(self, board)
    }

    fn evaluate_board(&self, board: &Board) -> f32 {
        HyperbolicEngine::evaluate_board(self, board)
    }
}

/// Tagged variant over the two personalities, for callers that pick an
/// engine at runtime.
pub enum AnyEngine {
    Adaptive(AdaptiveEngine),
    Hyperbolic(HyperbolicEngine),
}

impl AnyEngine {
    pub fn name(&self) -> &'static str {
        match self {
            AnyEngine::Adaptive(_) => "adaptive",
            AnyEngine::Hyperbolic(_) => "hyperbolic",
        }
    }
}

impl MoveSelector for AnyEngine {
    fn choose_move(&mut self, board: &Board) -> Option<String> {
        match self {
            AnyEngine::Adaptive(engine) => engine.choose_move(board),
            AnyEngine::Hyperbolic(engine) => engine.choose_move(board),
        }
    }

    fn evaluate_board(&self, board: &Board) -> f32 {
        match self {
            AnyEngine::Adaptive(engine) => engine.evaluate_board(board),
            AnyEngine::Hyperbolic(engine) => engine.evaluate_board(board),
        }
    }
}
