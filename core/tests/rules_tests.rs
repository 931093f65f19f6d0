// SPDX-License-Identifier: MIT OR Apache-2.0

use goflip_core::{Color, Coord, Game, GameConfig, GameError, Validity};

fn two_player_game(board_size: u8) -> Game {
    let mut game = Game::new(GameConfig {
        board_size,
        ..GameConfig::default()
    })
    .unwrap();
    game.add_player("joop", Some(Color::Black)).unwrap();
    game.add_player("piet", Some(Color::White)).unwrap();
    game
}

#[test]
fn turn_ownership_is_checked_before_anything_else() {
    let game = two_player_game(9);
    // coordinates are nonsense, but it is not white's turn
    assert_eq!(game.check_move(Color::White, -5, 99), Validity::NotTurn);
    assert_eq!(game.check_move(Color::Empty, 0, 0), Validity::NotTurn);
}

#[test]
fn off_board_coordinates_are_not_field() {
    let game = two_player_game(9);
    assert_eq!(game.check_move(Color::Black, 9, 0), Validity::NotField);
    assert_eq!(game.check_move(Color::Black, -1, 4), Validity::NotField);
    assert_eq!(game.check_move(Color::Black, 0, 9), Validity::NotField);
}

#[test]
fn occupied_cells_are_not_free() {
    let mut game = two_player_game(9);
    game.play(Color::Black, 3, 3).unwrap();
    assert_eq!(game.check_move(Color::White, 3, 3), Validity::NotFreeField);
}

#[test]
fn capturing_move_empties_the_whole_chain() {
    let mut game = two_player_game(5);
    game.play(Color::Black, 1, 0).unwrap();
    game.play(Color::White, 0, 0).unwrap();
    let captured = game.play(Color::Black, 0, 1).unwrap();

    assert_eq!(captured, vec![Coord::new(0, 0)]);
    assert_eq!(game.board().get(0, 0), Some(Color::Empty));
}

#[test]
fn true_suicide_is_rejected() {
    let mut game = two_player_game(5);
    // white builds a diamond around (1,1); black plays elsewhere
    for (bx, by, wx, wy) in [(4, 4, 1, 0), (4, 3, 0, 1), (3, 4, 2, 1), (3, 3, 1, 2)] {
        game.play(Color::Black, bx, by).unwrap();
        game.play(Color::White, wx, wy).unwrap();
    }
    assert_eq!(game.check_move(Color::Black, 1, 1), Validity::Suicide);
    assert_eq!(
        game.play(Color::Black, 1, 1),
        Err(GameError::IllegalMove(Validity::Suicide))
    );
    // the rejected trial must not have leaked into the live game
    assert_eq!(game.board().get(1, 1), Some(Color::Empty));
    assert_eq!(game.turn(), Color::Black);
}

#[test]
fn suicide_looking_move_that_captures_is_valid() {
    let mut game = two_player_game(5);
    // black walls in two white stones whose last shared liberty is (0,0)
    game.play(Color::Black, 2, 0).unwrap();
    game.play(Color::White, 1, 0).unwrap();
    game.play(Color::Black, 1, 1).unwrap();
    game.play(Color::White, 0, 1).unwrap();
    game.play(Color::Black, 0, 2).unwrap();
    game.play(Color::White, 4, 4).unwrap();

    // (0,0) has no empty neighbor, but the move captures both whites
    assert_eq!(game.check_move(Color::Black, 0, 0), Validity::Valid);
    let captured = game.play(Color::Black, 0, 0).unwrap();
    assert_eq!(captured.len(), 2);
    assert!(captured.contains(&Coord::new(1, 0)));
    assert!(captured.contains(&Coord::new(0, 1)));
}

#[test]
fn recreating_a_previous_board_is_ko() {
    let mut game = two_player_game(5);
    // classic ko shape around (1,1)/(2,1)
    game.play(Color::Black, 1, 0).unwrap();
    game.play(Color::White, 2, 0).unwrap();
    game.play(Color::Black, 0, 1).unwrap();
    game.play(Color::White, 3, 1).unwrap();
    game.play(Color::Black, 1, 2).unwrap();
    game.play(Color::White, 2, 2).unwrap();
    game.play(Color::Black, 4, 4).unwrap();
    game.play(Color::White, 1, 1).unwrap();

    // black takes the ko
    let captured = game.play(Color::Black, 2, 1).unwrap();
    assert_eq!(captured, vec![Coord::new(1, 1)]);

    // immediate recapture would reproduce the previous board
    assert_eq!(game.check_move(Color::White, 1, 1), Validity::Ko);
    assert_eq!(
        game.play(Color::White, 1, 1),
        Err(GameError::IllegalMove(Validity::Ko))
    );

    // any other white move is still open
    assert_eq!(game.check_move(Color::White, 4, 0), Validity::Valid);
}

#[test]
fn look_ahead_simulation_never_mutates_the_live_game() {
    let mut game = two_player_game(5);
    game.play(Color::Black, 1, 0).unwrap();
    game.play(Color::White, 0, 0).unwrap();

    let before = game.clone();
    // this check simulates a capture of white (0,0)
    assert_eq!(game.check_move(Color::Black, 0, 1), Validity::Valid);
    assert_eq!(game.board(), before.board());
    assert_eq!(game.turn(), before.turn());
    assert_eq!(game.score(Color::White), before.score(Color::White));
}

#[test]
fn turn_rotates_after_each_move_for_two_players() {
    let mut game = two_player_game(9);
    assert_eq!(game.turn(), Color::Black);
    game.play(Color::Black, 0, 0).unwrap();
    assert_eq!(game.turn(), Color::White);
    game.play(Color::White, 1, 0).unwrap();
    assert_eq!(game.turn(), Color::Black);
}

#[test]
fn turn_advances_every_m_moves_with_multiple_moves_per_turn() {
    let mut game = Game::new(GameConfig {
        board_size: 9,
        moves_per_turn: 2,
        players_per_game: 3,
        seed: 0,
    })
    .unwrap();
    game.add_player("a", Some(Color::Black)).unwrap();
    game.add_player("b", Some(Color::White)).unwrap();
    game.add_player("c", Some(Color::Red)).unwrap();

    game.play(Color::Black, 0, 0).unwrap();
    assert_eq!(game.turn(), Color::Black);
    game.play(Color::Black, 1, 0).unwrap();
    assert_eq!(game.turn(), Color::White);
    game.play(Color::White, 2, 0).unwrap();
    game.play(Color::White, 3, 0).unwrap();
    assert_eq!(game.turn(), Color::Red);
    game.play(Color::Red, 4, 0).unwrap();
    game.play(Color::Red, 5, 0).unwrap();
    // full cycle through the three playing colors
    assert_eq!(game.turn(), Color::Black);
}

#[test]
fn pass_hands_the_next_color_a_full_allotment() {
    let mut game = Game::new(GameConfig {
        board_size: 9,
        moves_per_turn: 2,
        players_per_game: 3,
        seed: 0,
    })
    .unwrap();
    game.add_player("a", Some(Color::Black)).unwrap();
    game.add_player("b", Some(Color::White)).unwrap();
    game.add_player("c", Some(Color::Red)).unwrap();

    // black uses one of two moves, then passes
    game.play(Color::Black, 0, 0).unwrap();
    assert_eq!(game.pass(Color::Black).unwrap(), None);
    assert_eq!(game.turn(), Color::White);
    // white still gets both placements
    game.play(Color::White, 1, 0).unwrap();
    assert_eq!(game.turn(), Color::White);
    game.play(Color::White, 2, 0).unwrap();
    assert_eq!(game.turn(), Color::Red);
}
