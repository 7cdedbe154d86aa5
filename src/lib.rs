//! # Adaptive Chess Engine
//!
//! A chess AI core built around three pieces: a hand-tuned positional
//! **evaluation library**, an **adaptive engine** that models the opponent's
//! skill and style and retunes its alpha-beta search accordingly, and a
//! fixed-personality **hyperbolic engine** that plays aggressive one-ply
//! chess through a non-linear evaluation transform.
//!
//! Legal move generation, position mutation, and terminal-state detection are
//! delegated entirely to the `chess` crate; this crate only scores, orders,
//! and selects among moves the rules engine already certifies as legal.
//!
//! ## Quick Start
//!
//! ```rust
//! use adaptive_chess_engine::AdaptiveEngine;
//! use chess::Board;
//!
//! let mut engine = AdaptiveEngine::with_seed(42);
//! let board = Board::default();
//!
//! // Fold an observed opponent move into the model, then answer it
//! engine.update_opponent_assessment(&board, "e4", 2.0);
//! if let Some(san) = engine.choose_move(&board) {
//!     println!("engine plays {}", san);
//! }
//! println!(
//!     "opponent skill {:.1}, style {}",
//!     engine.skill_estimate(),
//!     engine.style()
//! );
//! ```
//!
//! All randomness (skill jitter, depth jitter, candidate sampling) flows
//! through a seedable generator injected at construction, so games and
//! property tests are reproducible under a fixed seed.

// Core modules
pub mod errors;

pub mod adaptive;
pub mod engine;
pub mod evaluation;
pub mod game;
pub mod hyperbolic;
pub mod san;

// Re-export commonly used types
pub use adaptive::{AdaptiveEngine, OpponentProfile, OpponentStyle, ProfileEntry};
pub use engine::{AnyEngine, MoveSelector};
pub use errors::EngineError;
pub use game::{GameOutcome, GameSession, MoveRecord, Player};
pub use hyperbolic::{hyperbolic_transform, HyperbolicConfig, HyperbolicEngine};
pub use san::{move_to_san, parse_san};
