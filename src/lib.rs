//! game-2048: a deterministic NxN 2048 engine
//!
//! This crate provides:
//! - A `Board` grid type with pure move staging (`shift`), legal-move masks and tile spawning
//! - A `GameEngine` owning one episode behind a two-phase propose/confirm protocol
//! - A seedable `RandomSource` so every episode can be replayed exactly
//! - A one-hot board encoder (`encoding`) for policy networks
//! - Parallel random self-play (`selfplay`) used by the `game-2048` binary
//!
//! Quick start:
//! ```
//! use game_2048::{Direction, GameEngine};
//!
//! // Deterministic 4x4 game
//! let mut game = GameEngine::new(4, Some(42)).unwrap();
//!
//! // Stage, inspect, then commit
//! let staged = game.propose_move(Direction::Left);
//! let _gain = staged.outcome.score_delta;
//! let report = game.confirm_move().unwrap();
//! assert_eq!(game.total_score(), report.score_delta);
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use game_2048::GameEngine;
//!
//! let mut game = GameEngine::new(4, Some(123)).unwrap();
//! let mut moves = 0u32;
//!
//! // The engine never stops you; check the mask yourself.
//! while !game.is_over() && moves < 8 {
//!     let dir = game.valid_moves().valid_directions()[0];
//!     game.step(dir).unwrap();
//!     moves += 1;
//! }
//! assert!(moves > 0);
//! ```
//!
pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod game;
pub mod random;
pub mod selfplay;

pub use config::EngineConfig;
pub use engine::{Board, Direction, MoveOutcome, Score, StagedMove, Tile, ValidMoveMask};
pub use error::{EngineError, Result};
pub use game::{EngineState, GameEngine, MoveReport};
pub use random::RandomSource;
