use crate::engine::Tile;

/// Errors surfaced by the engine. Every variant is a caller contract
/// violation detected at the call boundary; nothing is retried internally.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("board size must be at least 2, got {0}")]
    InvalidSize(usize),
    #[error("cannot spawn a tile: board has no empty cell")]
    BoardFull,
    #[error("invalid direction index {0}; expected 0 (up), 1 (down), 2 (right) or 3 (left)")]
    InvalidDirection(usize),
    #[error("confirm_move called without a staged move")]
    NoStagedMove,
    #[error("invalid tile value {value} at ({row}, {col}); tiles are 0 or a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: Tile },
    #[error("grid is not square: expected {expected} cells in row {row}, found {found}")]
    NotSquare { row: usize, expected: usize, found: usize },
    #[error("tile {value} exceeds the ceiling of {max}")]
    TileOverflow { value: Tile, max: Tile },
}

pub type Result<T> = std::result::Result<T, EngineError>;
