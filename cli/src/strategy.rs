// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in move strategies
//!
//! Strategies only propose moves the engine would accept, so a client
//! driving one never gets kicked for an illegal submission.

use goflip_core::{Color, Coord, Game, Move};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks the next action for `color` on the given game state.
pub trait Strategy {
    fn decide(&mut self, game: &Game, color: Color) -> Move;
}

/// Plays a random valid move, passing only when the board offers none.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn decide(&mut self, game: &Game, color: Color) -> Move {
        let size = game.board().size() as i32;
        // random probes first, then a scan so a crowded board still
        // finds its last open fields
        for _ in 0..4 * size * size {
            let x = self.rng.gen_range(0..size);
            let y = self.rng.gen_range(0..size);
            if game.is_valid_move(color, x, y) {
                return Move::Place(Coord::new(x as u8, y as u8));
            }
        }
        first_valid(game, color).map_or(Move::Pass, Move::Place)
    }
}

fn first_valid(game: &Game, color: Color) -> Option<Coord> {
    let size = game.board().size() as i32;
    for y in 0..size {
        for x in 0..size {
            if game.is_valid_move(color, x, y) {
                return Some(Coord::new(x as u8, y as u8));
            }
        }
    }
    None
}

/// Plays the valid move with the highest immediate score for its own
/// color, simulating every candidate on a copy of the game. Ties go to
/// the earliest field in scan order.
pub struct GreedyStrategy;

impl Strategy for GreedyStrategy {
    fn decide(&mut self, game: &Game, color: Color) -> Move {
        let size = game.board().size() as i32;
        let mut best: Option<(i32, Coord)> = None;
        for y in 0..size {
            for x in 0..size {
                if !game.is_valid_move(color, x, y) {
                    continue;
                }
                let mut trial = game.clone();
                // validated above; play cannot fail
                let _ = trial.play(color, x, y);
                let score = trial.score(color);
                if best.map_or(true, |(s, _)| score > s) {
                    best = Some((score, Coord::new(x as u8, y as u8)));
                }
            }
        }
        best.map_or(Move::Pass, |(_, coord)| Move::Place(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goflip_core::GameConfig;

    fn two_player_game() -> Game {
        let mut game = Game::new(GameConfig {
            board_size: 5,
            moves_per_turn: 1,
            players_per_game: 2,
            seed: 0,
        })
        .unwrap();
        game.add_player("joop", Some(Color::Black)).unwrap();
        game.add_player("piet", Some(Color::White)).unwrap();
        game
    }

    #[test]
    fn random_only_proposes_valid_moves() {
        let game = two_player_game();
        let mut strategy = RandomStrategy::new(7);
        for _ in 0..10 {
            match strategy.decide(&game, Color::Black) {
                Move::Place(coord) => {
                    assert!(game.is_valid_move(Color::Black, coord.x as i32, coord.y as i32));
                }
                other => panic!("empty board, expected a placement, got {other:?}"),
            }
        }
    }

    #[test]
    fn strategies_pass_when_no_move_is_accepted() {
        let mut game = two_player_game();
        // a finished game accepts no placement from anyone
        game.pass(Color::Black).unwrap();
        game.pass(Color::White).unwrap();

        assert_eq!(RandomStrategy::new(1).decide(&game, Color::Black), Move::Pass);
        assert_eq!(GreedyStrategy.decide(&game, Color::Black), Move::Pass);
    }

    #[test]
    fn greedy_takes_the_capture() {
        let mut game = two_player_game();
        game.play(Color::Black, 1, 0).unwrap();
        game.play(Color::White, 0, 0).unwrap();

        // (0, 1) takes white's last liberty; the capture hands black
        // the entire empty board as territory
        let mut strategy = GreedyStrategy;
        assert_eq!(
            strategy.decide(&game, Color::Black),
            Move::Place(Coord::new(0, 1))
        );
    }
}
