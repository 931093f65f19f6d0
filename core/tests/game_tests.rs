// SPDX-License-Identifier: MIT OR Apache-2.0

use goflip_core::{game::RESIGN_SCORE, Color, Game, GameConfig, GameError, GamePhase};

fn config(players: usize) -> GameConfig {
    GameConfig {
        board_size: 5,
        moves_per_turn: 1,
        players_per_game: players,
        seed: 42,
    }
}

#[test]
fn config_ranges_are_validated() {
    assert!(matches!(
        Game::new(GameConfig { players_per_game: 1, ..config(2) }),
        Err(GameError::InvalidConfig(_))
    ));
    assert!(matches!(
        Game::new(GameConfig { players_per_game: 7, ..config(2) }),
        Err(GameError::InvalidConfig(_))
    ));
    assert!(matches!(
        Game::new(GameConfig { moves_per_turn: 0, ..config(2) }),
        Err(GameError::InvalidConfig(_))
    ));
    assert!(matches!(
        Game::new(GameConfig { board_size: 1, ..config(2) }),
        Err(GameError::InvalidConfig(_))
    ));
}

#[test]
fn seating_assigns_lowest_free_color_automatically() {
    let mut game = Game::new(config(3)).unwrap();
    game.add_player("a", Some(Color::White)).unwrap();
    assert_eq!(game.add_player("b", None).unwrap(), Color::Black);
    assert_eq!(game.add_player("c", None).unwrap(), Color::Red);
}

#[test]
fn explicit_colors_are_checked() {
    let mut game = Game::new(config(2)).unwrap();
    game.add_player("a", Some(Color::Black)).unwrap();
    assert_eq!(
        game.add_player("b", Some(Color::Black)),
        Err(GameError::ColorTaken(Color::Black))
    );
    // yellow is outside a two-player rotation
    assert_eq!(
        game.add_player("b", Some(Color::Yellow)),
        Err(GameError::InvalidColor(Color::Yellow))
    );
    assert_eq!(
        game.add_player("b", Some(Color::Empty)),
        Err(GameError::InvalidColor(Color::Empty))
    );
}

#[test]
fn seating_beyond_capacity_signals_game_full() {
    let mut game = Game::new(config(2)).unwrap();
    game.add_player("a", None).unwrap();
    game.add_player("b", None).unwrap();
    assert_eq!(game.add_player("c", None), Err(GameError::GameFull));
    assert_eq!(game.add_player_random("c"), Err(GameError::GameFull));
}

#[test]
fn random_seating_is_deterministic_per_seed() {
    let seat = |seed| {
        let mut game = Game::new(GameConfig { seed, ..config(4) }).unwrap();
        let mut colors = Vec::new();
        for name in ["a", "b", "c", "d"] {
            colors.push(game.add_player_random(name).unwrap());
        }
        colors
    };
    assert_eq!(seat(7), seat(7));
    // every color handed out exactly once, never Empty
    let mut colors = seat(7);
    colors.sort_unstable_by_key(|c| c.ordinal());
    assert_eq!(colors, vec![Color::Black, Color::White, Color::Red, Color::Green]);
}

#[test]
fn phase_moves_to_in_progress_when_full() {
    let mut game = Game::new(config(2)).unwrap();
    assert_eq!(game.phase(), GamePhase::AwaitingPlayers);
    game.add_player("a", None).unwrap();
    assert_eq!(game.phase(), GamePhase::AwaitingPlayers);
    game.add_player("b", None).unwrap();
    assert_eq!(game.phase(), GamePhase::InProgress);
}

#[test]
fn nothing_can_be_played_before_the_game_starts() {
    let mut game = Game::new(config(2)).unwrap();
    game.add_player("a", Some(Color::Black)).unwrap();
    assert!(!game.is_valid_move(Color::Black, 0, 0));
    assert!(!game.is_valid_pass(Color::Black));
    assert!(!game.is_valid_resign(Color::Black));
    assert_eq!(game.pass(Color::Black), Err(GameError::NotInProgress));
    assert_eq!(game.resign(Color::Black), Err(GameError::NotInProgress));
}

fn started(players: usize) -> Game {
    let mut game = Game::new(config(players)).unwrap();
    for (i, name) in ["a", "b", "c", "d", "e", "f"].iter().take(players).enumerate() {
        game.add_player(name, Color::nth(i + 1)).unwrap();
    }
    game
}

#[test]
fn full_round_of_passes_finishes_the_game() {
    let mut game = started(3);
    assert_eq!(game.pass(Color::Black).unwrap(), None);
    assert_eq!(game.pass(Color::White).unwrap(), None);
    let report = game.pass(Color::Red).unwrap().expect("game should end");
    assert_eq!(report.len(), 3);
    assert_eq!(game.phase(), GamePhase::Finished);
}

#[test]
fn a_move_breaks_the_pass_streak() {
    let mut game = started(2);
    game.pass(Color::Black).unwrap();
    game.play(Color::White, 2, 2).unwrap();
    // the earlier pass no longer counts
    assert_eq!(game.pass(Color::Black).unwrap(), None);
    let report = game.pass(Color::White).unwrap().expect("game should end");
    assert_eq!(report, vec![0, 25]);
}

#[test]
fn pass_streak_restarts_when_the_first_color_passes() {
    let mut game = started(2);
    game.play(Color::Black, 0, 0).unwrap();
    // white pass, then black pass: the round now starts at black
    assert_eq!(game.pass(Color::White).unwrap(), None);
    assert_eq!(game.pass(Color::Black).unwrap(), None);
    assert_eq!(game.phase(), GamePhase::InProgress);
    // white completes the black-led round
    assert!(game.pass(Color::White).unwrap().is_some());
    assert_eq!(game.phase(), GamePhase::Finished);
}

#[test]
fn out_of_turn_pass_is_rejected() {
    let mut game = started(2);
    assert_eq!(game.pass(Color::White), Err(GameError::OutOfTurn(Color::White)));
    assert!(game.is_valid_pass(Color::Black));
    assert!(!game.is_valid_pass(Color::White));
}

#[test]
fn resignation_reports_the_sentinel_for_every_player() {
    let mut game = started(3);
    game.play(Color::Black, 2, 2).unwrap();
    // resignation is open to any seated player, turn or not
    assert!(game.is_valid_resign(Color::Red));
    let report = game.resign(Color::Red).unwrap();
    assert_eq!(report, vec![RESIGN_SCORE; 3]);
    assert_eq!(game.phase(), GamePhase::Finished);
    assert_eq!(game.resign(Color::Red), Err(GameError::NotInProgress));
}

#[test]
fn unseated_colors_cannot_resign() {
    let mut game = started(2);
    assert!(!game.is_valid_resign(Color::Red));
    assert_eq!(game.resign(Color::Red), Err(GameError::NotSeated(Color::Red)));
}

#[test]
fn score_report_is_in_color_order_regardless_of_seating() {
    let mut game = Game::new(config(2)).unwrap();
    game.add_player("late", Some(Color::White)).unwrap();
    game.add_player("early", Some(Color::Black)).unwrap();
    game.play(Color::Black, 2, 2).unwrap();
    // black owns the board: report is [black, white]
    assert_eq!(game.score_report(), vec![25, 0]);
}

#[test]
fn cloned_games_share_no_state() {
    let mut game = started(2);
    game.play(Color::Black, 0, 0).unwrap();
    let mut copy = game.clone();
    copy.play(Color::White, 1, 1).unwrap();
    assert_eq!(game.board().get(1, 1), Some(Color::Empty));
    assert_eq!(game.turn(), Color::White);
    assert_eq!(copy.turn(), Color::Black);
}
