// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game state machine: seats, turns, passes, resignation, Ko history
//!
//! A `Game` is owned by exactly one session context and is not
//! internally synchronized; callers serialize access per game. All
//! rejection paths are result codes or typed errors, never panics, so
//! a session host always has a well-defined protocol reply.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{scoring, Board, Color, Coord, GameError, GroupTracker, Validity, MAX_PLAYERS, MIN_PLAYERS};

/// Score reported for every player when a game ends by resignation or
/// abandonment instead of mutual passing.
pub const RESIGN_SCORE: i32 = -1;

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Seats are still being filled
    AwaitingPlayers,
    /// The match is running
    InProgress,
    /// Terminal; the game object is discarded by its host
    Finished,
}

/// A seat at the table: a name and the color it plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    color: Color,
}

impl Player {
    /// Player name as registered with the host
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assigned color; `Empty` only for a player not yet seated
    pub fn color(&self) -> Color {
        self.color
    }
}

/// Parameters a game is created with. All of them are immutable for
/// the lifetime of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: u8,
    /// Consecutive placements a color makes before the turn advances
    pub moves_per_turn: u32,
    /// Number of colors in the rotation (2-6)
    pub players_per_game: usize,
    /// Seed for the per-session RNG used in random color assignment
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 9,
            moves_per_turn: 1,
            players_per_game: 2,
            seed: 0,
        }
    }
}

/// The rule engine for one match.
///
/// Cloning a game yields a fully independent copy (board, chains,
/// history, RNG); the validity check relies on this for its
/// look-ahead simulation.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    tracker: GroupTracker,
    players: Vec<Player>,
    turn: Color,
    /// 1-based number of the next placement
    turn_counter: u32,
    moves_per_turn: u32,
    pass_counter: usize,
    players_per_game: usize,
    /// Board snapshot after every completed move, for the Ko check
    history: Vec<Board>,
    phase: GamePhase,
    rng: StdRng,
}

impl Game {
    /// Create an empty game from a validated configuration.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&config.players_per_game) {
            return Err(GameError::InvalidConfig(format!(
                "players per game must be {MIN_PLAYERS}-{MAX_PLAYERS}, got {}",
                config.players_per_game
            )));
        }
        if config.moves_per_turn == 0 {
            return Err(GameError::InvalidConfig("moves per turn must be at least 1".into()));
        }
        if config.board_size < 2 {
            return Err(GameError::InvalidConfig(format!(
                "board size {} is too small",
                config.board_size
            )));
        }
        Ok(Self {
            board: Board::new(config.board_size),
            tracker: GroupTracker::new(),
            players: Vec::with_capacity(config.players_per_game),
            turn: Color::first(),
            turn_counter: 1,
            moves_per_turn: config.moves_per_turn,
            pass_counter: 0,
            players_per_game: config.players_per_game,
            history: Vec::new(),
            phase: GamePhase::AwaitingPlayers,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Read-only board snapshot
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The color whose turn it is
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Seated players, in seating order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of colors this game is configured for
    pub fn players_per_game(&self) -> usize {
        self.players_per_game
    }

    /// Placements a color makes before the turn advances
    pub fn moves_per_turn(&self) -> u32 {
        self.moves_per_turn
    }

    /// The player holding `color`, if seated
    pub fn player_by_color(&self, color: Color) -> Option<&Player> {
        self.players.iter().find(|p| p.color == color)
    }

    fn is_seated(&self, color: Color) -> bool {
        self.player_by_color(color).is_some()
    }

    fn free_colors(&self) -> Vec<Color> {
        (1..=self.players_per_game)
            .filter_map(Color::nth)
            .filter(|&c| !self.is_seated(c))
            .collect()
    }

    /// Seat a player, with an explicit color or the lowest free one.
    ///
    /// Filling the last seat moves the game to `InProgress`.
    pub fn add_player(&mut self, name: &str, color: Option<Color>) -> Result<Color, GameError> {
        if self.players.len() == self.players_per_game {
            return Err(GameError::GameFull);
        }
        let color = match color {
            Some(c) => {
                match c.ordinal() {
                    Some(ord) if ord <= self.players_per_game => {}
                    _ => return Err(GameError::InvalidColor(c)),
                }
                if self.is_seated(c) {
                    return Err(GameError::ColorTaken(c));
                }
                c
            }
            None => self.free_colors()[0],
        };
        self.players.push(Player {
            name: name.to_string(),
            color,
        });
        tracing::debug!(player = name, %color, "player seated");
        if self.players.len() == self.players_per_game {
            self.phase = GamePhase::InProgress;
            tracing::info!(players = self.players.len(), "game started");
        }
        Ok(color)
    }

    /// Seat a player on a random free color, drawn from the session RNG.
    pub fn add_player_random(&mut self, name: &str) -> Result<Color, GameError> {
        if self.players.len() == self.players_per_game {
            return Err(GameError::GameFull);
        }
        let free = self.free_colors();
        let color = free[self.rng.gen_range(0..free.len())];
        self.add_player(name, Some(color))
    }

    /// Check a prospective move, in strict priority order: turn
    /// ownership, board bounds, occupancy, then a full simulation on a
    /// disposable copy of the game. The simulation resolves captures
    /// before judging the mover's own liberties (suicide) and before
    /// comparing against the board history (Ko), so both checks always
    /// see the post-capture board.
    pub fn check_move(&self, color: Color, x: i32, y: i32) -> Validity {
        if self.phase != GamePhase::InProgress || color != self.turn {
            return Validity::NotTurn;
        }
        if !self.board.is_field(x, y) {
            return Validity::NotField;
        }
        if !self.board.is_empty(x, y) {
            return Validity::NotFreeField;
        }

        // trial application; must not leak into the live game
        let mut trial = self.clone();
        let index = trial.apply(color, x, y);

        let own = trial
            .tracker
            .chain_at(color, index)
            .expect("placed stone must be tracked");
        if GroupTracker::liberties(&trial.board, own) == 0 {
            tracing::debug!(%color, x, y, "suicide rejected");
            return Validity::Suicide;
        }
        if self.history.iter().any(|b| *b == trial.board) {
            tracing::debug!(%color, x, y, "ko violation detected");
            return Validity::Ko;
        }
        Validity::Valid
    }

    /// Whether `color` may currently place a stone at `(x, y)`.
    pub fn is_valid_move(&self, color: Color, x: i32, y: i32) -> bool {
        self.check_move(color, x, y).is_valid()
    }

    /// Whether `color` may currently pass.
    pub fn is_valid_pass(&self, color: Color) -> bool {
        self.phase == GamePhase::InProgress && color == self.turn
    }

    /// Whether `color` may resign. Any seated player can, at any time
    /// while the game is in progress.
    pub fn is_valid_resign(&self, color: Color) -> bool {
        self.phase == GamePhase::InProgress && self.is_seated(color)
    }

    /// Place stone and resolve captures; returns the placement index.
    fn apply(&mut self, color: Color, x: i32, y: i32) -> usize {
        let index = self.board.index(Coord::new(x as u8, y as u8));
        self.board.set_index(index, color);
        self.tracker.after_move(&mut self.board, color, index);
        index
    }

    /// Play a validated move. The whole step is atomic from the
    /// caller's perspective: placement, capture resolution, history
    /// recording and turn advance all land, or the move is rejected
    /// before any mutation.
    ///
    /// Returns the coordinates of captured stones.
    pub fn play(&mut self, color: Color, x: i32, y: i32) -> Result<Vec<Coord>, GameError> {
        let validity = self.check_move(color, x, y);
        if !validity.is_valid() {
            return Err(GameError::IllegalMove(validity));
        }
        let index = self.board.index(Coord::new(x as u8, y as u8));
        self.board.set_index(index, color);
        let captured = self.tracker.after_move(&mut self.board, color, index);
        self.pass_counter = 0;
        self.history.push(self.board.clone());
        self.next_turn();
        tracing::debug!(%color, x, y, captured = captured.len(), "move played");
        Ok(captured.into_iter().map(|i| self.board.coord(i)).collect())
    }

    fn next_turn(&mut self) {
        if self.turn_counter % self.moves_per_turn == 0 {
            self.turn = self.turn.next(self.players_per_game);
        }
        self.turn_counter += 1;
    }

    /// Pass the turn. A full round of consecutive passes, one per
    /// color starting from the first color in rotation, ends the game;
    /// the final score report (color order) is returned in that case.
    pub fn pass(&mut self, color: Color) -> Result<Option<Vec<i32>>, GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::NotInProgress);
        }
        if color != self.turn {
            return Err(GameError::OutOfTurn(color));
        }
        if color == Color::first() {
            self.pass_counter = 1;
        } else {
            self.pass_counter += 1;
        }
        if self.pass_counter == self.players.len() {
            self.phase = GamePhase::Finished;
            let report = self.score_report();
            tracing::info!(?report, "game finished by consecutive passes");
            return Ok(Some(report));
        }
        self.turn = self.turn.next(self.players_per_game);
        // the next color starts with a full allotment of moves
        self.turn_counter = ((self.turn_counter - 1) / self.moves_per_turn + 1) * self.moves_per_turn + 1;
        Ok(None)
    }

    /// Resign ("table-flip"). Ends the game immediately; every entry of
    /// the report is [`RESIGN_SCORE`], signaling abnormal termination.
    pub fn resign(&mut self, color: Color) -> Result<Vec<i32>, GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::NotInProgress);
        }
        if !self.is_seated(color) {
            return Err(GameError::NotSeated(color));
        }
        self.phase = GamePhase::Finished;
        tracing::info!(%color, "game ended by table-flip");
        Ok(vec![RESIGN_SCORE; self.players.len()])
    }

    /// Current score of one color: stones plus enclosed territory.
    pub fn score(&self, color: Color) -> i32 {
        scoring::score(&self.board, &self.tracker, color)
    }

    /// Per-player scores in color order.
    pub fn score_report(&self) -> Vec<i32> {
        let mut colors: Vec<Color> = self.players.iter().map(Player::color).collect();
        colors.sort_unstable_by_key(|c| c.ordinal());
        colors.into_iter().map(|c| self.score(c)).collect()
    }
}
