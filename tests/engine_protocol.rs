//! Scenario tests for the propose/confirm protocol through the public API.

use game_2048::engine::{self, merge_line};
use game_2048::{Board, Direction, EngineError, EngineState, GameEngine, RandomSource};

fn board(rows: &[&[u32]]) -> Board {
    Board::from_rows(rows).unwrap()
}

#[test]
fn line_merge_examples() {
    let m = merge_line(&[2, 2, 0, 0], false);
    assert_eq!(m.tiles, vec![4, 0, 0, 0]);
    assert_eq!((m.outcome.score_delta, m.outcome.merge_count), (4, 1));

    let m = merge_line(&[0, 2, 2, 2], true);
    assert_eq!(m.tiles, vec![0, 0, 2, 4]);
    assert_eq!((m.outcome.score_delta, m.outcome.merge_count), (4, 1));
}

#[test]
fn stuck_board_reports_no_moves() {
    let b = board(&[&[2, 4, 8, 16], &[16, 8, 4, 2], &[2, 4, 8, 16], &[16, 8, 4, 2]]);
    assert_eq!(engine::valid_moves(&b).as_array(), [false; 4]);
    let game = GameEngine::from_board(b, 100, RandomSource::seeded(0));
    assert!(game.is_over());
    assert_eq!(game.total_score(), 100);
}

#[test]
fn confirm_returns_mask_in_index_order() {
    // Only column 0 holds a tile at the top: Up and Left are no-ops.
    let b = board(&[&[2, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
    let mut game = GameEngine::from_board(b, 0, RandomSource::seeded(12));
    assert_eq!(game.valid_moves().as_array(), [false, true, true, false]);

    game.propose_move_index(Direction::Down as usize).unwrap();
    let report = game.confirm_move().unwrap();
    assert_eq!(game.board().get(2, 0), 2);
    assert_eq!(report.valid_moves, engine::valid_moves(game.board()));
}

#[test]
fn out_of_range_direction_keeps_previous_stage() {
    let mut game = GameEngine::new(4, Some(8)).unwrap();
    let staged = game.propose_move(Direction::Right).clone();
    assert_eq!(game.propose_move_index(7).unwrap_err(), EngineError::InvalidDirection(7));
    assert_eq!(game.staged(), Some(&staged));
}

#[test]
fn every_confirm_adds_exactly_one_tile() {
    let mut game = GameEngine::new(4, Some(2020)).unwrap();
    let mut picks = RandomSource::seeded(1);
    for _ in 0..300 {
        if game.is_over() {
            break;
        }
        let legal = game.valid_moves().valid_directions();
        let staged = game.propose_move(legal[picks.choose_index(legal.len())]).clone();
        let score_before = game.total_score();
        let report = game.confirm_move().unwrap();
        assert_eq!(game.board().count_non_empty(), staged.board.count_non_empty() + 1);
        assert_eq!(game.total_score(), score_before + report.score_delta);
        assert_eq!(report.score_delta, staged.outcome.score_delta);
        assert_eq!(game.state(), EngineState::Ready);
    }
}

#[test]
fn reset_from_staged_state() {
    let mut game = GameEngine::new(5, Some(33)).unwrap();
    for _ in 0..10 {
        let dir = game.valid_moves().valid_directions()[0];
        game.step(dir).unwrap();
    }
    game.propose_move(Direction::Up);
    let fresh = game.reset().clone();
    assert_eq!(fresh.size(), 5);
    assert_eq!(fresh.count_non_empty(), 2);
    assert!(fresh.cells().iter().all(|&v| matches!(v, 0 | 2 | 4)));
    assert_eq!(game.total_score(), 0);
    assert_eq!(game.confirm_move(), Err(EngineError::NoStagedMove));
}

#[test]
fn unseeded_engines_still_work() {
    let mut game = GameEngine::new(4, None).unwrap();
    assert_eq!(game.board().count_non_empty(), 2);
    let dir = game.valid_moves().valid_directions()[0];
    assert!(game.step(dir).is_ok());
}
