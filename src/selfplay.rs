//! Random self-play episodes, one engine per worker.
//!
//! Each episode picks uniformly among the currently legal directions until
//! the board is stuck, a move cap is hit or the next merge would pass the
//! tile ceiling. Episodes share nothing, so they fan out over rayon without
//! locking.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::engine::{Board, Score, Tile};
use crate::error::{EngineError, Result};
use crate::game::GameEngine;
use crate::random::RandomSource;

// Keeps the move picker's stream apart from the spawn stream of the same seed.
const POLICY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Final state of one episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub seed: Option<u64>,
    pub score: Score,
    pub moves: u64,
    pub highest_tile: Tile,
    /// True when play stopped because no direction was legal.
    pub stuck: bool,
    /// True when play stopped because the chosen move would exceed `MAX_TILE`.
    pub hit_tile_cap: bool,
    pub final_board: Vec<Vec<Tile>>,
}

/// Play one episode with a uniform-random legal-move policy.
pub fn play_random_episode(config: &EngineConfig, max_moves: Option<u64>) -> Result<EpisodeSummary> {
    let mut game = GameEngine::from_config(config)?;
    let mut picker = RandomSource::from_seed(config.seed.map(|s| s ^ POLICY_SEED_SALT));
    play_out(&mut game, &mut picker, max_moves, config.seed)
}

/// Drive `game` until it is stuck, hits the move cap or reaches the tile
/// ceiling. The ceiling ends the episode like the move cap does.
fn play_out(
    game: &mut GameEngine,
    picker: &mut RandomSource,
    max_moves: Option<u64>,
    seed: Option<u64>,
) -> Result<EpisodeSummary> {
    let mut moves = 0u64;
    let mut hit_tile_cap = false;

    while !game.is_over() && max_moves.map_or(true, |cap| moves < cap) {
        let legal = game.valid_moves().valid_directions();
        let dir = legal[picker.choose_index(legal.len())];
        match game.step(dir) {
            Ok(_) => moves += 1,
            Err(EngineError::TileOverflow { value, .. }) => {
                info!("episode stopped at move {moves}: {dir} would make a {value} tile");
                hit_tile_cap = true;
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summarize(0, seed, game, moves, hit_tile_cap))
}

/// Play `episodes` independent games in parallel. Episode `i` uses seed
/// `seed + i` when the base config is seeded. `on_done` fires once per
/// finished episode, from whichever worker ran it.
pub fn run_episodes<F>(
    base: &EngineConfig,
    episodes: usize,
    max_moves: Option<u64>,
    on_done: F,
) -> Result<Vec<EpisodeSummary>>
where
    F: Fn(&EpisodeSummary) + Sync,
{
    base.validate()?;
    let results = (0..episodes)
        .into_par_iter()
        .map(|i| {
            let cfg = EngineConfig::new(base.size, base.seed.map(|s| s.wrapping_add(i as u64)));
            let mut summary = play_random_episode(&cfg, max_moves)?;
            summary.episode = i;
            on_done(&summary);
            Ok(summary)
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(best) = results.iter().max_by_key(|s| s.score) {
        info!(
            "{} episodes done; best score {} (episode {}, highest tile {})",
            results.len(),
            best.score,
            best.episode,
            best.highest_tile
        );
    }
    Ok(results)
}

fn summarize(
    episode: usize,
    seed: Option<u64>,
    game: &GameEngine,
    moves: u64,
    hit_tile_cap: bool,
) -> EpisodeSummary {
    let board: &Board = game.board();
    EpisodeSummary {
        episode,
        seed,
        score: game.total_score(),
        moves,
        highest_tile: board.highest_tile(),
        stuck: game.is_over(),
        hit_tile_cap,
        final_board: board.to_rows(),
    }
}
