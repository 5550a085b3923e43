use std::fmt;

use serde::{Deserialize, Serialize};

use super::ops;
use crate::error::{EngineError, Result};

pub type Tile = u32;
pub type Score = u64;

/// Smallest supported board side.
pub const MIN_SIZE: usize = 2;

/// Largest tile a committed board may hold, `2^15`. Downstream encoders
/// reserve one channel per exponent up to this value.
pub const MAX_TILE: Tile = 1 << 15;

/// A direction to move/merge tiles.
///
/// Discriminants are the stable external action indices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Right = 2,
    Left = 3,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Right, Direction::Left];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Result<Self> {
        Self::ALL.get(idx).copied().ok_or(EngineError::InvalidDirection(idx))
    }
}

impl TryFrom<usize> for Direction {
    type Error = EngineError;
    fn try_from(idx: usize) -> Result<Self> {
        Direction::from_index(idx)
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;
    fn try_from(idx: u8) -> Result<Self> {
        Direction::from_index(idx as usize)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Left => "left",
        };
        f.write_str(s)
    }
}

/// Square NxN grid of tile values, row-major. `0` is an empty cell.
///
/// Only `Serialize` is derived: boards enter the crate through `empty` or
/// `from_rows`, which enforce the tile invariant.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// An empty `size x size` board.
    pub fn empty(size: usize) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(EngineError::InvalidSize(size));
        }
        Ok(Board { size, cells: vec![0; size * size] })
    }

    /// Build a board from rows, checking shape and tile values. Tiles above
    /// `MAX_TILE` are refused, so no merge on a board can exceed `2 * MAX_TILE`.
    ///
    /// ```
    /// use game_2048::Board;
    /// let b = Board::from_rows(&[vec![2u32, 0], vec![0, 4]]).unwrap();
    /// assert_eq!(b.count_empty(), 2);
    /// assert!(Board::from_rows(&[vec![3u32, 0], vec![0, 0]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let mut board = Board::empty(size)?;
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(EngineError::NotSquare { row: r, expected: size, found: row.len() });
            }
            for (c, &value) in row.iter().enumerate() {
                if value != 0 && (value < 2 || !value.is_power_of_two()) {
                    return Err(EngineError::InvalidTile { row: r, col: c, value });
                }
                if value > MAX_TILE {
                    return Err(EngineError::TileOverflow { value, max: MAX_TILE });
                }
                board.cells[r * size + c] = value;
            }
        }
        Ok(board)
    }

    /// Build from cells that are already known to be a valid grid.
    pub(crate) fn from_cells(size: usize, cells: Vec<Tile>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Board { size, cells }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile at (`row`, `col`). Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: Tile) {
        self.cells[row * self.size + col] = value;
    }

    /// Row-major view of every cell.
    #[inline]
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> &[Tile] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn column(&self, col: usize) -> Vec<Tile> {
        (0..self.size).map(|r| self.get(r, col)).collect()
    }

    /// Owned `N x N` snapshot.
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }

    /// Empty cells as (row, col), in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    #[inline]
    pub fn count_non_empty(&self) -> usize {
        self.cells.len() - self.count_empty()
    }

    /// Highest tile value present (0 on an empty board).
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values. Merges conserve it; spawns grow it.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }

    /// Slide/merge in `dir` without touching `self`.
    #[inline]
    pub fn shift(&self, dir: Direction) -> ops::StagedMove {
        ops::shift(self, dir)
    }

    /// Return true if no legal moves remain.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        ops::is_game_over(self)
    }

    pub(crate) fn clear(&mut self) {
        self.cells.iter_mut().for_each(|v| *v = 0);
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board").field("size", &self.size).field("rows", &self.to_rows()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = "-".repeat(self.size * 8 - 1);
        for (r, row) in self.cells.chunks(self.size).enumerate() {
            if r > 0 {
                writeln!(f, "{sep}")?;
            }
            let line: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(7),
        x => format!("{x:^7}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_rejects_small_boards() {
        assert_eq!(Board::empty(1), Err(EngineError::InvalidSize(1)));
        assert_eq!(Board::empty(0), Err(EngineError::InvalidSize(0)));
        assert!(Board::empty(2).is_ok());
    }

    #[test]
    fn it_validates_rows() {
        assert!(matches!(
            Board::from_rows(&[vec![2u32, 0, 0], vec![0, 0]]),
            Err(EngineError::NotSquare { row: 0, expected: 2, found: 3 })
        ));
        assert!(matches!(
            Board::from_rows(&[vec![2u32, 1], vec![0, 0]]),
            Err(EngineError::InvalidTile { row: 0, col: 1, value: 1 })
        ));
        assert!(matches!(
            Board::from_rows(&[vec![2u32, 0], vec![6, 0]]),
            Err(EngineError::InvalidTile { row: 1, col: 0, value: 6 })
        ));
    }

    #[test]
    fn it_rejects_tiles_above_the_ceiling() {
        assert_eq!(
            Board::from_rows(&[vec![65536u32, 0], vec![0, 0]]),
            Err(EngineError::TileOverflow { value: 65536, max: MAX_TILE })
        );
        assert!(Board::from_rows(&[vec![1u32 << 31, 1 << 31], vec![0, 0]]).is_err());
        let top = Board::from_rows(&[vec![MAX_TILE, MAX_TILE], vec![0, 0]]).unwrap();
        let staged = top.shift(Direction::Left);
        assert_eq!(staged.board.get(0, 0), 2 * MAX_TILE);
    }

    #[test]
    fn it_reads_rows_and_columns() {
        let b = Board::from_rows(&[vec![2u32, 4, 8], vec![0, 16, 0], vec![32, 0, 2]]).unwrap();
        assert_eq!(b.size(), 3);
        assert_eq!(b.row(1), &[0, 16, 0]);
        assert_eq!(b.column(0), vec![2, 0, 32]);
        assert_eq!(b.get(2, 2), 2);
        assert_eq!(b.to_rows()[0], vec![2, 4, 8]);
    }

    #[test]
    fn it_counts_cells() {
        let b = Board::from_rows(&[vec![2u32, 0], vec![0, 1024]]).unwrap();
        assert_eq!(b.count_empty(), 2);
        assert_eq!(b.count_non_empty(), 2);
        assert_eq!(b.empty_cells(), vec![(0, 1), (1, 0)]);
        assert_eq!(b.highest_tile(), 1024);
        assert_eq!(b.tile_sum(), 1026);
        assert_eq!(Board::empty(4).unwrap().highest_tile(), 0);
    }

    #[test]
    fn it_maps_direction_indices() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
            assert_eq!(Direction::try_from(i).unwrap(), *d);
        }
        assert_eq!(Direction::try_from(2u8), Ok(Direction::Right));
        assert_eq!(Direction::from_index(4), Err(EngineError::InvalidDirection(4)));
    }

    #[test]
    fn it_displays_grid() {
        let b = Board::from_rows(&[vec![2u32, 0], vec![0, 128]]).unwrap();
        let s = b.to_string();
        assert_eq!(s.lines().count(), 3);
        assert!(s.contains("128"));
    }
}
