// SPDX-License-Identifier: MIT OR Apache-2.0

//! goflip core - Go rules engine
//!
//! This crate provides the game logic for a networked multi-player Go
//! variant:
//! - Board representation with value equality and deep copies
//! - Incremental stone-chain tracking for capture resolution
//! - Flood-fill territory scoring
//! - The turn/pass/resignation state machine with board-history Ko checks
//!
//! The engine is synchronous and protocol-agnostic: it speaks in colors,
//! coordinates and result codes, and never performs I/O.

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod game;
pub mod scoring;
pub mod tracker;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use board::Board;
pub use game::{Game, GameConfig, GamePhase, Player};
pub use tracker::GroupTracker;

/// Fewest colors a game can be configured for.
pub const MIN_PLAYERS: usize = 2;
/// Most colors a game can be configured for.
pub const MAX_PLAYERS: usize = 6;

/// State of a board cell, or the color a player owns.
///
/// Ordering is significant: it defines the turn rotation, and automatic
/// color assignment hands out the lowest free playing color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Unoccupied cell; also the color of a not-yet-seated player
    Empty,
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
}

/// Playing colors in rotation order (everything except `Empty`).
const PLAYING: [Color; MAX_PLAYERS] = [
    Color::Black,
    Color::White,
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
];

impl Color {
    /// The color that opens every game.
    pub fn first() -> Self {
        Color::Black
    }

    /// 1-based position in the rotation, `None` for `Empty`.
    pub fn ordinal(self) -> Option<usize> {
        PLAYING.iter().position(|&c| c == self).map(|i| i + 1)
    }

    /// Playing color at the given 1-based rotation position.
    pub fn nth(ordinal: usize) -> Option<Self> {
        if (1..=MAX_PLAYERS).contains(&ordinal) {
            Some(PLAYING[ordinal - 1])
        } else {
            None
        }
    }

    /// The color that moves after this one in a game of `num_players`
    /// colors. `Empty` has no successor and maps to itself.
    pub fn next(self, num_players: usize) -> Self {
        match self.ordinal() {
            Some(ord) if ord < num_players => PLAYING[ord],
            Some(_) => Color::first(),
            None => Color::Empty,
        }
    }

    /// Uniformly random playing color for a game of `num_players` colors.
    /// Never yields `Empty`.
    pub fn random<R: rand::Rng>(num_players: usize, rng: &mut R) -> Self {
        PLAYING[rng.gen_range(0..num_players.min(MAX_PLAYERS))]
    }

    /// Parse a lowercase color name as it appears on the wire.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "black" => Some(Color::Black),
            "white" => Some(Color::White),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "blue" => Some(Color::Blue),
            "yellow" => Some(Color::Yellow),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Empty => "empty",
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        };
        write!(f, "{name}")
    }
}

/// Board coordinate, 0-based column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column)
    pub x: u8,
    /// Y coordinate (row)
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check if the coordinate lies on a board of the given size
    pub fn is_valid(&self, board_size: u8) -> bool {
        self.x < board_size && self.y < board_size
    }
}

/// A player action, as produced by client strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Place a stone at the coordinate
    Place(Coord),
    /// Pass the turn
    Pass,
    /// Resign the game ("table-flip")
    Resign,
}

/// Outcome of the move validity check, in evaluation priority order.
///
/// These are result codes, not errors: the session host forwards them
/// verbatim as the reason on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
    /// The move is legal
    Valid,
    /// It is not this color's turn
    NotTurn,
    /// The coordinate is not on the board
    NotField,
    /// The cell is already occupied
    NotFreeField,
    /// The mover's own chain would end with zero liberties without
    /// capturing anything
    Suicide,
    /// The resulting board repeats an earlier position
    Ko,
}

impl Validity {
    /// Whether the checked move may be played.
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Validity::Valid => "VALID",
            Validity::NotTurn => "NOT_TURN",
            Validity::NotField => "NOT_FIELD",
            Validity::NotFreeField => "NOT_FREE_FIELD",
            Validity::Suicide => "SUICIDE",
            Validity::Ko => "KO",
        };
        write!(f, "{code}")
    }
}

/// Errors that can occur when driving a game.
///
/// Routine rule rejections travel as [`Validity`] codes; these variants
/// cover misuse of the engine API itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// All seats are taken
    #[error("game is full")]
    GameFull,

    /// The requested color is already assigned to another player
    #[error("color {0} is already taken")]
    ColorTaken(Color),

    /// The requested color is not playable in this game
    #[error("color {0} is not playable in this game")]
    InvalidColor(Color),

    /// The color has no seat in this game
    #[error("color {0} is not seated at this game")]
    NotSeated(Color),

    /// The game has not started or is already over
    #[error("game is not in progress")]
    NotInProgress,

    /// It is not this color's turn
    #[error("it is not {0}'s turn")]
    OutOfTurn(Color),

    /// A move was submitted without passing the validity check
    #[error("illegal move: {0}")]
    IllegalMove(Validity),

    /// The game configuration is out of range
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}
