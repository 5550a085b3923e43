//! One-hot power-of-two planes for feeding a board to a policy network.
//!
//! Layout is `[row][col][channel]`, flattened row-major. Channel 0 marks an
//! empty cell; a tile `2^k` lights channel `k`.

use crate::engine::{Board, Tile, MAX_TILE};
use crate::error::{EngineError, Result};

/// Largest exponent a channel can hold.
pub const MAX_EXPONENT: u32 = MAX_TILE.trailing_zeros();
/// Number of channels per cell.
pub const CHANNELS: usize = MAX_EXPONENT as usize + 1;

/// log2 of a tile, 0 for an empty cell.
#[inline]
pub fn exponent(tile: Tile) -> u32 {
    if tile == 0 { 0 } else { tile.trailing_zeros() }
}

/// Per-cell exponents, row-major.
pub fn exponents(board: &Board) -> Result<Vec<u8>> {
    board
        .cells()
        .iter()
        .map(|&t| {
            if t > MAX_TILE {
                Err(EngineError::TileOverflow { value: t, max: MAX_TILE })
            } else {
                Ok(exponent(t) as u8)
            }
        })
        .collect()
}

/// Flattened `N * N * CHANNELS` one-hot tensor.
///
/// ```
/// use game_2048::{encoding, Board};
/// let b = Board::from_rows(&[vec![0u32, 2], vec![4, 32768]]).unwrap();
/// let x = encoding::one_hot(&b).unwrap();
/// assert_eq!(x.len(), 4 * encoding::CHANNELS);
/// assert_eq!(x[0], 1.0);
/// assert_eq!(x[3 * encoding::CHANNELS + 15], 1.0);
/// ```
pub fn one_hot(board: &Board) -> Result<Vec<f32>> {
    let exps = exponents(board)?;
    let mut out = vec![0.0f32; exps.len() * CHANNELS];
    for (cell, &k) in exps.iter().enumerate() {
        out[cell * CHANNELS + k as usize] = 1.0;
    }
    Ok(out)
}
