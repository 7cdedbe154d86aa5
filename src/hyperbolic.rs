//! Hyperbolic engine: a fixed-personality, one-ply aggressive engine.
//!
//! No opponent model and no recursive search: every legal move is applied to
//! a clone, the resulting position is scored, the score is pushed through a
//! non-linear transform that exaggerates advantages, and temperature noise
//! decides between near-equal candidates.

use chess::{Board, ChessMove, Color, MoveGen};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluation::{captured_value, piece_value};
use crate::san::move_to_san;

/// Exponent applied to the raw score inside [`HyperbolicEngine::evaluate_board`].
const EVAL_EXPONENT: f32 = 1.2;

/// Exponent applied per candidate move during selection. Deliberately
/// distinct from [`EVAL_EXPONENT`].
const SELECTION_EXPONENT: f32 = 1.3;

/// Immutable personality constants, fixed at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HyperbolicConfig {
    /// Scales both the mobility bonus and the selection noise band.
    pub temperature: f32,
    /// Scales the attack bonus for available captures.
    pub risk_factor: f32,
}

impl Default for HyperbolicConfig {
    fn default() -> Self {
        Self {
            temperature: 1.2,
            risk_factor: 1.5,
        }
    }
}

/// The engine: a config plus an injected PRNG for the selection noise.
pub struct HyperbolicEngine {
    config: HyperbolicConfig,
    rng: StdRng,
}

impl Default for HyperbolicEngine {
    fn default() -> Self {
        Self::new(HyperbolicConfig::default())
    }
}

/// `sign(x) * |x|^exponent`, the non-linear transform that gives the engine
/// its name.
fn signed_pow(score: f32, exponent: f32) -> f32 {
    score.signum() * score.abs().powf(exponent)
}

/// The selection-time transform with its 1.3 exponent, exposed for tests and
/// telemetry.
pub fn hyperbolic_transform(score: f32) -> f32 {
    signed_pow(score, SELECTION_EXPONENT)
}

impl HyperbolicEngine {
    /// Create an engine with the given personality and an entropy-seeded
    /// generator.
    pub fn new(config: HyperbolicConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic engine for reproducible play and tests.
    pub fn with_seed(config: HyperbolicConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Personality constants this engine was built with.
    pub fn config(&self) -> HyperbolicConfig {
        self.config
    }

    /// Aggressive board evaluation.
    ///
    /// Each piece contributes its signed material value plus a signed
    /// mobility bonus (0.05 x temperature per legal move from its square).
    /// Captures available from a square feed an attack bonus of
    /// 0.1 x captured value x risk factor which accumulates WITHOUT a color
    /// sign; the signed sum goes through the 1.2-exponent transform and the
    /// unsigned attack bonus is added back afterwards. The unsigned
    /// accumulation is longstanding observed behavior and is kept as is.
    pub fn evaluate_board(&self, board: &Board) -> f32 {
        let moves: Vec<ChessMove> = MoveGen::new_legal(board).collect();

        let mut raw = 0.0f32;
        let mut attack_bonus = 0.0f32;
        for square in *board.combined() {
            let piece = match board.piece_on(square) {
                Some(piece) => piece,
                None => continue,
            };
            let sign = match board.color_on(square) {
                Some(Color::White) => 1.0,
                _ => -1.0,
            };

            let mut mobility = 0u32;
            for mv in moves.iter().filter(|mv| mv.get_source() == square) {
                mobility += 1;
                let captured = captured_value(board, *mv);
                if captured > 0.0 {
                    attack_bonus += 0.1 * captured * self.config.risk_factor;
                }
            }

            raw += sign
                * (piece_value(piece) + 0.05 * self.config.temperature * mobility as f32);
        }

        signed_pow(raw, EVAL_EXPONENT) + attack_bonus
    }

    /// One-ply greedy move selection: evaluate every resulting position,
    /// transform it, add uniform temperature noise, keep the best noisy
    /// score (max for White, min for Black). Full enumeration, no pruning.
    /// Returns `None` when no legal move exists.
    pub fn choose_move(&mut self, board: &Board) -> Option<String> {
        let maximizing = board.side_to_move() == Color::White;
        let half_band = self.config.temperature / 2.0;

        let mut best: Option<(ChessMove, f32)> = None;
        for mv in MoveGen::new_legal(board) {
            let after = board.make_move_new(mv);
            let noise: f32 = self.rng.gen_range(-half_band..=half_band);
            let score = hyperbolic_transform(self.evaluate_board(&after)) + noise;
            let better = match best {
                None => true,
                Some((_, incumbent)) => {
                    if maximizing {
                        score > incumbent
                    } else {
                        score < incumbent
                    }
                }
            };
            if better {
                best = Some((mv, score));
            }
        }

        best.map(|(mv, score)| {
            debug!(score, "hyperbolic selection finished");
            move_to_san(board, mv)
        })
    }
}
