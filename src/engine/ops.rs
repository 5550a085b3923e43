use log::trace;
use serde::{Deserialize, Serialize};

use super::state::{Board, Direction, Score, Tile};
use crate::error::{EngineError, Result};
use crate::random::RandomSource;

/// A spawn draws a 4 when `uniform_float() >= FOUR_THRESHOLD`, else a 2.
pub const FOUR_THRESHOLD: f64 = 0.9;

/// Score gained and merges performed by one move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub score_delta: Score,
    pub merge_count: u32,
}

impl MoveOutcome {
    fn absorb(&mut self, other: MoveOutcome) {
        self.score_delta += other.score_delta;
        self.merge_count += other.merge_count;
    }
}

/// One row/column after a merge pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLine {
    pub tiles: Vec<Tile>,
    pub outcome: MoveOutcome,
}

/// Candidate board for a direction. Never aliases the board it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedMove {
    pub direction: Direction,
    pub board: Board,
    pub outcome: MoveOutcome,
}

impl StagedMove {
    /// True when committing this staged board would change `from`.
    #[inline]
    pub fn changes(&self, from: &Board) -> bool {
        self.board != *from
    }
}

/// Compact one line and merge equal neighbours.
///
/// Tiles are packed toward index 0, or toward the last index when `reverse`
/// is set. Pairs are formed in input order, and a tile merges at most once.
///
/// ```
/// use game_2048::engine::merge_line;
/// let m = merge_line(&[0, 2, 2, 2], true);
/// assert_eq!(m.tiles, vec![0, 0, 2, 4]);
/// assert_eq!((m.outcome.score_delta, m.outcome.merge_count), (4, 1));
/// ```
pub fn merge_line(line: &[Tile], reverse: bool) -> MergedLine {
    let n = line.len();
    let compacted: Vec<Tile> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut tiles = vec![0; n];
    let mut outcome = MoveOutcome::default();

    let mut written = 0;
    let mut i = 0;
    while i < compacted.len() {
        let value = if i + 1 < compacted.len() && compacted[i] == compacted[i + 1] {
            let merged = compacted[i] + compacted[i + 1];
            outcome.score_delta += merged as Score;
            outcome.merge_count += 1;
            i += 2;
            merged
        } else {
            i += 1;
            compacted[i - 1]
        };
        let pos = if reverse { n - 1 - written } else { written };
        tiles[pos] = value;
        written += 1;
    }

    MergedLine { tiles, outcome }
}

/// Slide/merge tiles in the given direction. No randomness, no mutation.
pub fn shift(board: &Board, direction: Direction) -> StagedMove {
    let n = board.size();
    let mut cells = vec![0; n * n];
    let mut outcome = MoveOutcome::default();

    for k in 0..n {
        // Read each line starting from the edge tiles slide toward.
        let line: Vec<Tile> = match direction {
            Direction::Up => board.column(k),
            Direction::Down => board.column(k).into_iter().rev().collect(),
            Direction::Left => board.row(k).to_vec(),
            Direction::Right => board.row(k).iter().rev().copied().collect(),
        };
        let reverse = matches!(direction, Direction::Down | Direction::Right);
        let merged = merge_line(&line, reverse);
        outcome.absorb(merged.outcome);

        for (j, &v) in merged.tiles.iter().enumerate() {
            let idx = match direction {
                Direction::Up | Direction::Down => j * n + k,
                Direction::Left | Direction::Right => k * n + j,
            };
            cells[idx] = v;
        }
    }

    StagedMove { direction, board: Board::from_cells(n, cells), outcome }
}

/// Legal-move flags indexed by `Direction::index()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidMoveMask([bool; 4]);

impl ValidMoveMask {
    pub const NONE: ValidMoveMask = ValidMoveMask([false; 4]);

    #[inline]
    pub fn is_valid(&self, dir: Direction) -> bool {
        self.0[dir.index()]
    }

    /// False once the episode is stuck.
    #[inline]
    pub fn any(&self) -> bool {
        self.0.iter().any(|&b| b)
    }

    #[inline]
    pub fn as_array(&self) -> [bool; 4] {
        self.0
    }

    pub fn valid_directions(&self) -> Vec<Direction> {
        Direction::ALL.into_iter().filter(|&d| self.is_valid(d)).collect()
    }
}

impl From<[bool; 4]> for ValidMoveMask {
    fn from(flags: [bool; 4]) -> Self {
        ValidMoveMask(flags)
    }
}

/// Which directions would change `board`. Reads only.
pub fn valid_moves(board: &Board) -> ValidMoveMask {
    let mut flags = [false; 4];
    for dir in Direction::ALL {
        flags[dir.index()] = shift(board, dir).changes(board);
    }
    ValidMoveMask(flags)
}

/// True if no move in any direction changes the board.
pub fn is_game_over(board: &Board) -> bool {
    Direction::ALL.into_iter().all(|dir| !shift(board, dir).changes(board))
}

/// Where a spawn landed and what it placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedTile {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

/// Insert a 2 (90%) or 4 (10%) into a uniformly chosen empty cell.
///
/// Fails with `BoardFull` before touching the board or the generator when
/// there is nowhere to place a tile.
pub fn spawn_tile(board: &mut Board, rng: &mut RandomSource) -> Result<SpawnedTile> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return Err(EngineError::BoardFull);
    }
    let (row, col) = empty[rng.choose_index(empty.len())];
    let value = generate_random_tile(rng);
    board.set(row, col, value);
    trace!("spawned {value} at ({row}, {col})");
    Ok(SpawnedTile { row, col, value })
}

fn generate_random_tile(rng: &mut RandomSource) -> Tile {
    if rng.uniform_float() >= FOUR_THRESHOLD { 4 } else { 2 }
}
