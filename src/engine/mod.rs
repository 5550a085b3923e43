//! Engine module: NxN 2048 board, pure line/board shift ops, legal-move
//! detection and tile spawning.
//!
//! - `Board` is the grid state with read helpers.
//! - `shift` stages a move without touching the source board.
//! - `spawn_tile` is the only op that mutates a board in place.

mod ops;
pub mod state;

pub use state::{Board, Direction, Score, Tile, MAX_TILE, MIN_SIZE};

pub use ops::{
    is_game_over, merge_line, shift, spawn_tile, valid_moves, MergedLine, MoveOutcome, SpawnedTile,
    StagedMove, ValidMoveMask, FOUR_THRESHOLD,
};
