//! The stage-then-confirm game loop.
//!
//! ```text
//! Ready --propose_move--> Staged --confirm_move--> Ready
//!   ^                       |  ^                      |
//!   |                       +--+ (re-propose)         |
//!   +-------------------- reset (from any state) -----+
//! ```
//!
//! `propose_move` computes a candidate board without touching the canonical
//! one. `confirm_move` commits it, adds the score, spawns a tile and refreshes
//! the legal-move mask in one all-or-nothing step.

use log::{debug, warn};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::engine::{self, Board, Direction, Score, StagedMove, ValidMoveMask, MAX_TILE};
use crate::error::{EngineError, Result};
use crate::random::RandomSource;

/// Which half of the move protocol the engine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Ready,
    Staged,
}

/// Result of a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub score_delta: Score,
    pub merge_count: u32,
    /// Legal directions on the board after the spawn.
    pub valid_moves: ValidMoveMask,
}

/// Owns one episode: the canonical board, its score and its random source.
///
/// ```
/// use game_2048::{Direction, GameEngine};
/// let mut game = GameEngine::new(4, Some(10)).unwrap();
/// assert_eq!(game.board().count_non_empty(), 2);
/// game.propose_move(Direction::Left);
/// let report = game.confirm_move().unwrap();
/// assert_eq!(game.total_score(), report.score_delta);
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    total_score: Score,
    staged: Option<StagedMove>,
    valid_moves: ValidMoveMask,
    rng: RandomSource,
}

impl GameEngine {
    /// New `size x size` game with two starting tiles.
    pub fn new(size: usize, seed: Option<u64>) -> Result<Self> {
        Self::with_rng(size, RandomSource::from_seed(seed))
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.size, config.seed)
    }

    pub fn with_rng(size: usize, rng: RandomSource) -> Result<Self> {
        let board = Board::empty(size)?;
        let mut game = GameEngine {
            board,
            total_score: 0,
            staged: None,
            valid_moves: ValidMoveMask::NONE,
            rng,
        };
        game.populate();
        Ok(game)
    }

    /// Resume from an existing position. No tiles are added.
    pub fn from_board(board: Board, total_score: Score, rng: RandomSource) -> Self {
        let valid_moves = engine::valid_moves(&board);
        GameEngine { board, total_score, staged: None, valid_moves, rng }
    }

    /// Stage `direction` against the current board. Replaces any earlier
    /// staged move; the board and score are untouched.
    pub fn propose_move(&mut self, direction: Direction) -> &StagedMove {
        self.staged.insert(engine::shift(&self.board, direction))
    }

    /// Like `propose_move`, taking the external action index (0..=3).
    pub fn propose_move_index(&mut self, index: usize) -> Result<&StagedMove> {
        let direction = Direction::from_index(index)?;
        Ok(self.propose_move(direction))
    }

    /// Commit the staged move, spawn one tile and recompute legal moves.
    ///
    /// On error nothing changes, including the staged move.
    pub fn confirm_move(&mut self) -> Result<MoveReport> {
        let Some(staged) = self.staged.take() else {
            warn!("confirm_move without a staged move");
            return Err(EngineError::NoStagedMove);
        };
        if let Err(e) = check_committable(&staged.board) {
            warn!("rejecting staged {} move: {e}", staged.direction);
            self.staged = Some(staged);
            return Err(e);
        }

        let StagedMove { direction, board, outcome } = staged;
        self.board = board;
        self.total_score += outcome.score_delta;
        engine::spawn_tile(&mut self.board, &mut self.rng)?;
        self.valid_moves = engine::valid_moves(&self.board);

        debug!(
            "committed {direction}: +{} ({} merges), total {}",
            outcome.score_delta, outcome.merge_count, self.total_score
        );

        Ok(MoveReport {
            score_delta: outcome.score_delta,
            merge_count: outcome.merge_count,
            valid_moves: self.valid_moves,
        })
    }

    /// `propose_move` followed by `confirm_move`.
    pub fn step(&mut self, direction: Direction) -> Result<MoveReport> {
        self.propose_move(direction);
        self.confirm_move()
    }

    /// Empty the board, zero the score, drop any staged move and spawn two
    /// fresh tiles. The random source keeps its stream.
    pub fn reset(&mut self) -> &Board {
        self.board.clear();
        self.total_score = 0;
        self.staged = None;
        self.populate();
        debug!("reset {0}x{0} board", self.board.size());
        &self.board
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn total_score(&self) -> Score {
        self.total_score
    }

    #[inline]
    pub fn valid_moves(&self) -> ValidMoveMask {
        self.valid_moves
    }

    #[inline]
    pub fn staged(&self) -> Option<&StagedMove> {
        self.staged.as_ref()
    }

    pub fn state(&self) -> EngineState {
        if self.staged.is_some() { EngineState::Staged } else { EngineState::Ready }
    }

    /// True once no direction changes the board. The engine never enforces
    /// this; callers stop issuing moves themselves.
    #[inline]
    pub fn is_over(&self) -> bool {
        !self.valid_moves.any()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    fn populate(&mut self) {
        for _ in 0..2 {
            // An empty board has at least MIN_SIZE^2 = 4 cells.
            engine::spawn_tile(&mut self.board, &mut self.rng)
                .expect("fresh board has room for two tiles");
        }
        self.valid_moves = engine::valid_moves(&self.board);
    }
}

fn check_committable(board: &Board) -> Result<()> {
    let highest = board.highest_tile();
    if highest > MAX_TILE {
        return Err(EngineError::TileOverflow { value: highest, max: MAX_TILE });
    }
    if board.count_empty() == 0 {
        return Err(EngineError::BoardFull);
    }
    Ok(())
}
