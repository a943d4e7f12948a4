//! Integration tests for HEXFLIP
//!
//! Tests the full stack: board model, move engine, turn controller and AI players

use hexflip_core::{
    board::all_hexes,
    rules::{flips_for, legal_moves},
    Board, Difficulty, FirstLegal, GameError, GameResult, GameState, HeuristicAI, Hex,
    MoveSelector, Player, Score, Status, StrategyConfig, FIRST_PLAYER,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Uniformly random player, for exploring reachable positions
struct RandomPlayer(ChaCha8Rng);

impl MoveSelector for RandomPlayer {
    fn select_move(&mut self, _board: &Board, _player: Player, legal: &[Hex]) -> Option<Hex> {
        legal.choose(&mut self.0).copied()
    }
}

fn random_game(seed: u64) -> GameState {
    let mut player = RandomPlayer(ChaCha8Rng::seed_from_u64(seed));
    let mut game = GameState::new();
    while !game.is_finished() {
        game.play_computer_move(&mut player).unwrap();
    }
    game
}

fn hex(q: i8, r: i8, s: i8) -> Hex {
    Hex::try_new(q, r, s).unwrap()
}

// ============================================================================
// OPENING AND RESET
// ============================================================================

#[test]
fn test_opening_configuration() {
    let game = GameState::new();
    let board = game.board();

    assert_eq!(board.get(hex(0, 0, 0)), Some(Player::Black));
    let ring: Vec<Option<Player>> = hexflip_core::DIRECTIONS.iter().map(|&d| board.get(d)).collect();
    assert_eq!(
        ring,
        vec![
            Some(Player::Black),
            Some(Player::White),
            Some(Player::Black),
            Some(Player::White),
            Some(Player::Black),
            Some(Player::White),
        ]
    );
    assert_eq!(game.score(), Score { black: 4, white: 3 });
    assert_eq!(game.current_player(), Some(FIRST_PLAYER));
}

#[test]
fn test_reset_after_full_game() {
    let mut game = random_game(11);
    assert!(game.is_finished());

    game.reset();
    assert_eq!(game.board(), &Board::initial());
    assert_eq!(game.score(), Score { black: 4, white: 3 });
    assert_eq!(game.status(), Status::AwaitingMove(Player::Black));
}

// ============================================================================
// MOVE ENGINE PROPERTIES
// ============================================================================

#[test]
fn test_single_step_capture_scenario() {
    let mut game = GameState::new();
    let outcome = game.attempt_move(hex(2, 0, -2)).unwrap();

    assert_eq!(outcome.flipped, vec![hex(1, 0, -1)]);
    assert_eq!(game.score().black, 6);
    assert_eq!(game.score().white, 2);
}

#[test]
fn test_properties_hold_through_random_games() {
    for seed in 0..20 {
        let mut selector = RandomPlayer(ChaCha8Rng::seed_from_u64(seed));
        let mut game = GameState::new();

        while let Some(player) = game.current_player() {
            let board = game.board().clone();

            // Legality is exactly "captures something"
            let legal = legal_moves(&board, player);
            for cell in all_hexes() {
                assert_eq!(legal.contains(&cell), !flips_for(&board, cell, player).is_empty());
            }

            let before = game.score();
            let outcome = game.play_computer_move(&mut selector).unwrap();
            let after = game.score();

            assert!(after.of(player) > before.of(player));
            assert!(after.of(player.opponent()) <= before.of(player.opponent()));
            assert_eq!(after.of(player), before.of(player) + 1 + outcome.flipped.len() as u32);
            assert_eq!(after.total() as usize, game.board().occupied_count());
        }

        let score = game.score();
        assert_eq!(game.result(), Some(GameResult::from_score(score)));
        assert!(legal_moves(game.board(), Player::Black).is_empty());
        assert!(legal_moves(game.board(), Player::White).is_empty());
    }
}

#[test]
fn test_passes_do_not_touch_board() {
    for seed in 0..30 {
        let game = random_game(seed);
        let mut replay = GameState::new();
        for record in game.history() {
            let board_before = replay.board().clone();
            let outcome = replay.attempt_move(record.hex).unwrap();
            assert_eq!(&outcome, record);

            let changed = all_hexes()
                .filter(|&h| board_before.get(h) != replay.board().get(h))
                .count();
            assert_eq!(changed, 1 + outcome.flipped.len());

            if let Some(skipped) = outcome.passed {
                assert_eq!(replay.current_player(), Some(skipped.opponent()));
            }
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_illegal_moves_rejected() {
    let mut game = GameState::new();

    let occupied = game.attempt_move(hex(0, 0, 0)).unwrap_err();
    assert!(matches!(occupied, GameError::IllegalMove { .. }));

    let off_board = game.attempt_move(hex(5, -5, 0)).unwrap_err();
    assert!(matches!(off_board, GameError::IllegalMove { .. }));

    let no_capture = game.attempt_move(hex(-3, 0, 3)).unwrap_err();
    assert_eq!(no_capture, GameError::IllegalMove { hex: hex(-3, 0, 3), player: Player::Black });

    assert!(game.history().is_empty());
}

#[test]
fn test_commands_after_game_over() {
    let mut game = random_game(5);
    let mut ai = HeuristicAI::for_difficulty(Difficulty::Hard, 0);
    assert_eq!(game.attempt_move(hex(0, 0, 0)), Err(GameError::GameOver));
    assert_eq!(game.request_computer_move(&mut ai), Err(GameError::GameOver));
}

#[test]
fn test_with_placement_out_of_bounds_is_error() {
    let board = Board::initial();
    let result = board.with_placement(hex(0, 5, -5), Player::White, &[]);
    assert_eq!(result, Err(GameError::OutOfBounds(hex(0, 5, -5))));
}

// ============================================================================
// AI TESTS
// ============================================================================

#[test]
fn test_all_difficulties_finish_games() {
    for black in Difficulty::ALL {
        for white in Difficulty::ALL {
            let mut black_ai = HeuristicAI::for_difficulty(black, 1);
            let mut white_ai = HeuristicAI::for_difficulty(white, 2);
            let mut game = GameState::new();

            while let Some(player) = game.current_player() {
                let ai = if player == Player::Black { &mut black_ai } else { &mut white_ai };
                game.play_computer_move(ai).unwrap();
            }

            assert!(game.moves_played() <= 61 - 7);
            assert!(game.result().is_some());
        }
    }
}

#[test]
fn test_hard_selection_repeatable() {
    let game = random_game(3);
    let history = game.history();
    let midgame = history.len() / 2;

    let mut replay = GameState::new();
    for record in &history[..midgame] {
        replay.attempt_move(record.hex).unwrap();
    }

    let picks: Vec<Hex> = (0..5)
        .map(|seed| {
            let mut ai = HeuristicAI::for_difficulty(Difficulty::Hard, seed);
            replay.request_computer_move(&mut ai).unwrap()
        })
        .collect();
    assert!(picks.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_selector_is_pluggable() {
    let mut game = GameState::new();
    let first = game.legal_moves()[0];
    let outcome = game.play_computer_move(&mut FirstLegal).unwrap();
    assert_eq!(outcome.hex, first);
}

#[test]
fn test_strategy_file_overrides_preset() {
    let path = std::env::temp_dir().join(format!("hexflip-strategy-{}.json", std::process::id()));
    let json = serde_json::json!({
        "strategies": {
            "easy": { "capture_weight": 1.0, "position_weight": 0.0, "mobility_weight": 0.0, "noise": 0.0 }
        }
    });
    std::fs::write(&path, json.to_string()).unwrap();

    let config = StrategyConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let easy = config.heuristics(Difficulty::Easy);
    assert!(easy.is_deterministic());
    assert_eq!(config.heuristics(Difficulty::Medium), Difficulty::Medium.heuristics());

    // Flat greedy policy on the opening: every move flips one, first one wins
    let game = GameState::new();
    let mut ai = config.selector(Difficulty::Easy, 8);
    assert_eq!(game.request_computer_move(&mut ai), Ok(game.legal_moves()[0]));
}

#[test]
fn test_game_state_serializes() {
    let mut game = GameState::new();
    game.attempt_move(hex(2, 0, -2)).unwrap();

    let json = serde_json::to_value(&game).unwrap();
    assert_eq!(json["score"]["black"], 6);
    assert_eq!(json["status"]["AwaitingMove"], "white");
    assert_eq!(json["board"].as_array().unwrap().len(), 8);
    assert_eq!(json["history"][0]["flipped"][0]["q"], 1);
}
