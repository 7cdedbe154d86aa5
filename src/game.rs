//! Game orchestration: turn alternation, timing, and the move log.
//!
//! A session owns the rules-engine game state, the active engine, and an
//! append-only log of move records. Externally supplied moves (a human, or a
//! second AI driven by the caller) are folded into the opponent model before
//! they are applied; engine moves are timed around the search call. Terminal
//! status is queried from the rules engine after every half-move.

use chess::{Board, Color, Game, GameResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::debug;

use crate::adaptive::{AdaptiveEngine, OpponentStyle};
use crate::engine::{AnyEngine, MoveSelector};
use crate::errors::{EngineError, Result};
use crate::san::{move_to_san, parse_san};

/// Side indicator for a half-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl From<Color> for Player {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Player::White,
            Color::Black => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "white"),
            Player::Black => write!(f, "black"),
        }
    }
}

/// Terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    WhiteWins,
    BlackWins,
    Stalemate,
    Draw,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::WhiteWins => write!(f, "white wins"),
            GameOutcome::BlackWins => write!(f, "black wins"),
            GameOutcome::Stalemate => write!(f, "stalemate"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// One half-move as logged by the orchestrator. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub san: String,
    pub player: Player,
    /// Adaptive evaluation of the resulting position, for display/telemetry
    pub evaluation: f32,
    /// Engine skill estimate at the time of an engine move
    pub skill_level: Option<f32>,
    pub time_taken_secs: Option<f64>,
    /// Opponent skill estimate after folding in an observed move
    pub adaptive_skill: Option<f32>,
}

/// One game session: rules-engine state, the active engine, the opponent
/// model, and the move log. Session state lives only in memory.
pub struct GameSession {
    game: Game,
    engine: AnyEngine,
    /// Standalone opponent model, consulted only when the playing engine is
    /// not itself adaptive (the adaptive engine carries its own).
    analyzer: AdaptiveEngine,
    ai_player: Player,
    records: Vec<MoveRecord>,
}

impl GameSession {
    /// Start a session from the standard starting position.
    pub fn new(engine: AnyEngine, ai_player: Player) -> Self {
        Self {
            game: Game::new(),
            engine,
            analyzer: AdaptiveEngine::new(),
            ai_player,
            records: Vec::new(),
        }
    }

    /// Start a session from an arbitrary position.
    pub fn from_position(board: Board, engine: AnyEngine, ai_player: Player) -> Self {
        Self {
            game: Game::new_with_board(board),
            engine,
            analyzer: AdaptiveEngine::new(),
            ai_player,
            records: Vec::new(),
        }
    }

    fn model(&self) -> &AdaptiveEngine {
        match &self.engine {
            AnyEngine::Adaptive(engine) => engine,
            AnyEngine::Hyperbolic(_) => &self.analyzer,
        }
    }

    fn model_mut(&mut self) -> &mut AdaptiveEngine {
        match &mut self.engine {
            AnyEngine::Adaptive(engine) => engine,
            AnyEngine::Hyperbolic(_) => &mut self.analyzer,
        }
    }

    /// Apply an externally validated opponent move given in SAN.
    ///
    /// The pre-move position and think time feed the opponent model before
    /// the move is applied; the logged record carries the adaptive
    /// evaluation of the resulting position.
    pub fn apply_opponent_move(&mut self, san: &str, time_taken_secs: f64) -> Result<MoveRecord> {
        if let Some(outcome) = self.outcome() {
            return Err(EngineError::GameOver(outcome.to_string()));
        }
        let before = self.game.current_position();
        let player = Player::from(before.side_to_move());
        if player == self.ai_player {
            return Err(EngineError::InvalidMove(
                "it is the engine's turn to move".to_string(),
            ));
        }
        let mv = parse_san(&before, san)
            .ok_or_else(|| EngineError::InvalidMove(san.to_string()))?;
        let canonical = move_to_san(&before, mv);

        self.model_mut()
            .update_opponent_assessment(&before, san, time_taken_secs);
        self.game.make_move(mv);
        self.settle_draws();

        let after = self.game.current_position();
        let record = MoveRecord {
            san: canonical,
            player,
            evaluation: self.model().evaluate_board(&after),
            skill_level: None,
            time_taken_secs: Some(time_taken_secs),
            adaptive_skill: Some(self.model().skill_estimate()),
        };
        debug!(san = %record.san, player = %record.player, "opponent move applied");
        self.records.push(record.clone());
        Ok(record)
    }

    /// Let the active engine move, timing the selection. Returns `Ok(None)`
    /// at a terminal position; terminal detection should normally have
    /// halted the loop already, so `None` is a signal, not an error.
    pub fn play_engine_move(&mut self) -> Result<Option<MoveRecord>> {
        if self.is_over() {
            return Ok(None);
        }
        let before = self.game.current_position();
        let player = Player::from(before.side_to_move());
        if player != self.ai_player {
            return Err(EngineError::InvalidMove(
                "it is the opponent's turn to move".to_string(),
            ));
        }

        let start = Instant::now();
        let san = match self.engine.choose_move(&before) {
            Some(san) => san,
            None => return Ok(None),
        };
        let elapsed = start.elapsed().as_secs_f64();

        let mv = parse_san(&before, &san)
            .ok_or_else(|| EngineError::InvalidMove(san.clone()))?;
        self.game.make_move(mv);
        self.settle_draws();

        let after = self.game.current_position();
        let record = MoveRecord {
            san,
            player,
            evaluation: self.model().evaluate_board(&after),
            skill_level: Some(self.model().skill_estimate()),
            time_taken_secs: Some(elapsed),
            adaptive_skill: None,
        };
        debug!(
            san = %record.san,
            player = %record.player,
            elapsed,
            "engine move applied"
        );
        self.records.push(record.clone());
        Ok(Some(record))
    }

    /// Claim fifty-move or threefold-repetition draws as soon as they are
    /// available, so the loop halts instead of shuffling forever.
    fn settle_draws(&mut self) {
        if self.game.can_declare_draw() {
            self.game.declare_draw();
        }
    }

    /// Terminal result, `None` while the game is still running.
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.game.result()? {
            GameResult::WhiteCheckmates | GameResult::BlackResigns => Some(GameOutcome::WhiteWins),
            GameResult::BlackCheckmates | GameResult::WhiteResigns => Some(GameOutcome::BlackWins),
            GameResult::Stalemate => Some(GameOutcome::Stalemate),
            GameResult::DrawAccepted | GameResult::DrawDeclared => Some(GameOutcome::Draw),
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Snapshot of the current position.
    pub fn position(&self) -> Board {
        self.game.current_position()
    }

    /// The append-only move log.
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn ai_player(&self) -> Player {
        self.ai_player
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Opponent skill estimate held by the session's model.
    pub fn skill_estimate(&self) -> f32 {
        self.model().skill_estimate()
    }

    /// Opponent style classification held by the session's model.
    pub fn opponent_style(&self) -> OpponentStyle {
        self.model().style()
    }
}
