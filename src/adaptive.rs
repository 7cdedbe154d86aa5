//! Adaptive engine: opponent modeling plus depth-limited alpha-beta search.
//!
//! The engine watches the opponent's moves, keeps a running skill estimate on
//! a 1-10 scale through exponential smoothing, classifies their style from
//! capture pressure, and retunes its own search depth and candidate sampling
//! accordingly. Weak estimated opponents get shallow, randomly thinned,
//! unordered search; strong ones get the full candidate list with heuristic
//! move ordering for better pruning.

use chess::{Board, BoardStatus, ChessMove, Color, MoveGen};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use crate::evaluation::{
    center_control, is_capture, material_balance, move_heuristic, piece_development,
    undefended_penalty,
};
use crate::san::{move_to_san, parse_san};

/// Smoothing factor for the skill update: heavily weights the latest move.
const ADAPTIVE_FACTOR: f32 = 0.8;

/// Score magnitude treated as a forced mate during root search.
const MATE_THRESHOLD: f32 = 100.0;

/// Skill band (rounded 1-10) to base search depth.
const DEPTH_TABLE: [u32; 10] = [1, 2, 3, 4, 5, 6, 6, 7, 8, 9];

/// Opponent playing-style classification derived from capture/mobility ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentStyle {
    Unknown,
    Aggressive,
    Defensive,
    Balanced,
}

impl OpponentStyle {
    /// Classify a style score in [-1, 1]: above 0.6 aggressive, below -0.6
    /// defensive, anything in between balanced.
    pub fn from_score(style_score: f32) -> Self {
        if style_score > 0.6 {
            OpponentStyle::Aggressive
        } else if style_score < -0.6 {
            OpponentStyle::Defensive
        } else {
            OpponentStyle::Balanced
        }
    }
}

impl fmt::Display for OpponentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OpponentStyle::Unknown => "unknown",
            OpponentStyle::Aggressive => "aggressive",
            OpponentStyle::Defensive => "defensive",
            OpponentStyle::Balanced => "balanced",
        };
        write!(f, "{}", label)
    }
}

/// One observed opponent move, as recorded in the profile history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub skill_estimate: f32,
    pub style: OpponentStyle,
    pub quality_score: f32,
    pub style_score: f32,
}

/// Session-scoped model of the observed opponent.
///
/// `skill_estimate` is invariantly clamped to [1, 10]; the history is
/// append-only and never reordered. One profile exists per engine instance,
/// never process-wide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpponentProfile {
    pub skill_estimate: f32,
    pub style: OpponentStyle,
    pub adaptive_factor: f32,
    pub history: Vec<ProfileEntry>,
}

impl Default for OpponentProfile {
    fn default() -> Self {
        Self {
            skill_estimate: 5.0,
            style: OpponentStyle::Unknown,
            adaptive_factor: ADAPTIVE_FACTOR,
            history: Vec::new(),
        }
    }
}

/// The adaptive engine itself: an opponent profile plus an injected PRNG.
///
/// All randomness (skill jitter, depth jitter, candidate sampling, weak-play
/// shuffles) flows through the seedable generator so behavior is reproducible
/// under a fixed seed.
pub struct AdaptiveEngine {
    profile: OpponentProfile,
    rng: StdRng,
}

impl Default for AdaptiveEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AdaptiveEngine {
    /// Create an engine with a fresh profile and an entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            profile: OpponentProfile::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with a deterministic generator, for reproducible
    /// play and property testing.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            profile: OpponentProfile::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reset the opponent model for a new game session.
    pub fn reset(&mut self) {
        self.profile = OpponentProfile::default();
    }

    /// Current skill estimate, always within [1, 10].
    pub fn skill_estimate(&self) -> f32 {
        self.profile.skill_estimate
    }

    /// Pin the skill estimate, clamped to [1, 10]. Useful to fix the playing
    /// strength for analysis instead of letting the model drift.
    pub fn set_skill_estimate(&mut self, estimate: f32) {
        self.profile.skill_estimate = estimate.clamp(1.0, 10.0);
    }

    /// Current style classification of the observed opponent.
    pub fn style(&self) -> OpponentStyle {
        self.profile.style
    }

    /// Number of opponent moves observed this session.
    pub fn observed_moves(&self) -> usize {
        self.profile.history.len()
    }

    /// Read-only view of the full opponent profile.
    pub fn profile(&self) -> &OpponentProfile {
        &self.profile
    }

    /// Fold one observed opponent move into the profile.
    ///
    /// `board` is the position *before* the move. An unparseable SAN is not
    /// an error: it degrades to minimal quality (0.1) so a hostile or buggy
    /// caller can never fault the model.
    pub fn update_opponent_assessment(&mut self, board: &Board, san: &str, time_taken_secs: f64) {
        let (quality_score, style_score) = match parse_san(board, san) {
            Some(mv) => {
                let after = board.make_move_new(mv);
                (
                    self.move_quality(board, mv, &after),
                    Self::style_score(&after),
                )
            }
            None => (0.1, 0.0),
        };

        // Faster, higher-quality moves push the estimate up
        let skill_adjustment = quality_score / (time_taken_secs.max(0.0) as f32 + 0.5);
        let target = (skill_adjustment * 10.0).clamp(1.0, 10.0);
        let factor = self.profile.adaptive_factor;
        self.profile.skill_estimate =
            ((1.0 - factor) * self.profile.skill_estimate + factor * target).clamp(1.0, 10.0);
        self.profile.style = OpponentStyle::from_score(style_score);
        self.profile.history.push(ProfileEntry {
            skill_estimate: self.profile.skill_estimate,
            style: self.profile.style,
            quality_score,
            style_score,
        });

        debug!(
            san,
            quality_score,
            style_score,
            skill_estimate = self.profile.skill_estimate,
            style = %self.profile.style,
            "opponent assessment updated"
        );
    }

    /// Quality of an observed move in [0.1, 1.0].
    fn move_quality(&self, board: &Board, mv: ChessMove, after: &Board) -> f32 {
        if after.status() == BoardStatus::Checkmate {
            return 1.0;
        }
        let mut quality = 0.5;
        if after.checkers().popcnt() > 0 {
            quality += 0.3;
        }
        if is_capture(board, mv) {
            quality += 0.2;
        }
        quality += (center_control(after) + piece_development(after)) / 4.0;
        quality -= undefended_penalty(after);
        quality.clamp(0.1, 1.0)
    }

    /// Style score in [-1, 1] from the mover's follow-up options: capturing
    /// replies count fully as attack, quiet replies count 0.1 as defense.
    ///
    /// The mover's replies are probed by flipping the turn with a null move;
    /// when that is illegal (the new side to move is in check) there is
    /// nothing to measure and the score is zero.
    fn style_score(after: &Board) -> f32 {
        let probe = match after.null_move() {
            Some(probe) => probe,
            None => return 0.0,
        };
        let mut attack = 0.0f32;
        let mut defense = 0.0f32;
        for mv in MoveGen::new_legal(&probe) {
            if is_capture(&probe, mv) {
                attack += 1.0;
            } else {
                defense += 0.1;
            }
        }
        if attack + defense == 0.0 {
            0.0
        } else {
            (attack - defense) / (attack + defense)
        }
    }

    /// Material balance plus a style-countering bonus.
    ///
    /// Against an aggressive opponent the mover's mobility is rewarded
    /// (keeping pieces defended and flexible); against a defensive one the
    /// mover's available captures are rewarded instead. Unknown or balanced
    /// styles get the raw material score. Always signed from White's
    /// perspective.
    pub fn evaluate_board(&self, board: &Board) -> f32 {
        let mut score = material_balance(board);
        let sign = match board.side_to_move() {
            Color::White => 1.0,
            Color::Black => -1.0,
        };
        match self.profile.style {
            OpponentStyle::Aggressive => {
                let mobility = MoveGen::new_legal(board).len() as f32;
                score += sign * 0.05 * mobility;
            }
            OpponentStyle::Defensive => {
                let captures = MoveGen::new_legal(board)
                    .filter(|&mv| is_capture(board, mv))
                    .count() as f32;
                score += sign * 0.08 * captures;
            }
            OpponentStyle::Unknown | OpponentStyle::Balanced => {}
        }
        score
    }

    /// Per-move effective skill: the estimate with uniform(-0.5, 1.0) jitter
    /// clamped to [1, 10], plus a warm-up point once more than ten opponent
    /// moves have been observed.
    pub fn skill_level(&mut self) -> f32 {
        let jitter: f32 = self.rng.gen_range(-0.5..1.0);
        let mut level = (self.profile.skill_estimate + jitter).clamp(1.0, 10.0);
        if self.profile.history.len() > 10 {
            level += 1.0;
        }
        level
    }

    /// Base search depth for the current skill estimate, with two
    /// independent 30% chances of +1 and -1 jitter (both may fire and cancel
    /// out). Never below 1.
    pub fn depth_for_opponent(&mut self) -> u32 {
        let band = (self.profile.skill_estimate.round() as i32).clamp(1, 10) as usize;
        let mut depth = DEPTH_TABLE[band - 1] as i32;
        if self.rng.gen::<f32>() < 0.3 {
            depth += 1;
        }
        if self.rng.gen::<f32>() < 0.3 {
            depth -= 1;
        }
        depth.max(1) as u32
    }

    /// Pick a move for the current position, or `None` when no legal move
    /// exists (terminal positions are the caller's signal to stop).
    pub fn choose_move(&mut self, board: &Board) -> Option<String> {
        if MoveGen::new_legal(board).len() == 0 {
            return None;
        }

        let skill_level = self.skill_level();
        let mut depth = self.depth_for_opponent() as i32;

        // Cap search cost in crowded positions
        let pieces = board.combined().popcnt();
        if pieces > 20 {
            depth -= 2;
        } else if pieces > 10 {
            depth -= 1;
        }
        let depth = depth.max(1) as u32;

        debug!(
            skill_level,
            depth,
            pieces,
            complexity = crate::evaluation::position_complexity(board),
            "starting adaptive search"
        );
        self.search_move(board, depth, skill_level)
    }

    /// Root alpha-beta search at a fixed depth and skill level.
    ///
    /// The candidate list is randomly thinned before ordering: 5 moves below
    /// skill 5, 15 below skill 8, everything otherwise. Ordering is applied
    /// only at skill 5 and above, so weak play is both materially restricted
    /// and unordered. Exposed separately from [`choose_move`] so analysis
    /// and tests can fix depth and skill.
    pub fn search_move(&mut self, board: &Board, depth: u32, skill_level: f32) -> Option<String> {
        let mut candidates: Vec<ChessMove> = MoveGen::new_legal(board).collect();
        if candidates.is_empty() {
            return None;
        }

        let limit = if skill_level < 5.0 {
            5
        } else if skill_level < 8.0 {
            15
        } else {
            candidates.len()
        };
        if limit < candidates.len() {
            candidates.shuffle(&mut self.rng);
            candidates.truncate(limit);
        }
        if skill_level >= 5.0 {
            sort_by_heuristic(board, &mut candidates);
        }

        let maximizing = board.side_to_move() == Color::White;
        let mut alpha = f32::NEG_INFINITY;
        let mut beta = f32::INFINITY;
        let mut best_move = candidates[0];
        let mut best_score = if maximizing {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };

        for &mv in &candidates {
            let after = board.make_move_new(mv);
            let score = self.minimax(
                &after,
                depth.saturating_sub(1),
                alpha,
                beta,
                !maximizing,
                skill_level,
            );
            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = mv;
                }
                alpha = alpha.max(best_score);
                if score >= MATE_THRESHOLD {
                    break;
                }
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = mv;
                }
                beta = beta.min(best_score);
                if score <= -MATE_THRESHOLD {
                    break;
                }
            }
        }

        debug!(best_score, candidates = candidates.len(), "search finished");
        Some(move_to_san(board, best_move))
    }

    /// Depth-limited minimax with alpha-beta pruning.
    ///
    /// Below skill 5 each node has a 30% chance of a full move-list shuffle,
    /// injecting extra randomness into weak play; at skill 5 and above moves
    /// are heuristically ordered at every node instead.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        maximizing: bool,
        skill_level: f32,
    ) -> f32 {
        if depth == 0 || board.status() != BoardStatus::Ongoing {
            return self.leaf_evaluation(board, depth);
        }

        let mut moves: Vec<ChessMove> = MoveGen::new_legal(board).collect();
        if skill_level < 5.0 {
            if self.rng.gen::<f32>() < 0.3 {
                moves.shuffle(&mut self.rng);
            }
        } else {
            sort_by_heuristic(board, &mut moves);
        }

        if maximizing {
            let mut best = f32::NEG_INFINITY;
            for mv in moves {
                let after = board.make_move_new(mv);
                best = best.max(self.minimax(&after, depth - 1, alpha, beta, false, skill_level));
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f32::INFINITY;
            for mv in moves {
                let after = board.make_move_new(mv);
                best = best.min(self.minimax(&after, depth - 1, alpha, beta, true, skill_level));
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Evaluation at search leaves: mate scores for checkmate (preferring
    /// shorter mates through the depth bonus), zero for stalemate, otherwise
    /// the style-aware board evaluation.
    fn leaf_evaluation(&self, board: &Board, depth: u32) -> f32 {
        match board.status() {
            BoardStatus::Checkmate => {
                let mate = MATE_THRESHOLD + depth as f32;
                if board.side_to_move() == Color::White {
                    -mate
                } else {
                    mate
                }
            }
            BoardStatus::Stalemate => 0.0,
            BoardStatus::Ongoing => self.evaluate_board(board),
        }
    }
}

/// Stable descending sort by the move-ordering heuristic; ties keep their
/// original move-list order.
fn sort_by_heuristic(board: &Board, moves: &mut [ChessMove]) {
    let mut scored: Vec<(f32, ChessMove)> = moves
        .iter()
        .map(|&mv| (move_heuristic(board, mv), mv))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    for (slot, (_, mv)) in moves.iter_mut().zip(scored) {
        *slot = mv;
    }
}
