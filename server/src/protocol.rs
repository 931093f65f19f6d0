// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-based text protocol between clients and the server
//!
//! One command per line, fields separated by single spaces, colors as
//! lowercase names. The engine knows nothing of this module: it is the
//! session host's job to translate between wire commands and engine
//! calls.

use std::fmt;
use std::str::FromStr;

use goflip_core::Color;
use thiserror::Error;

/// Smallest board a client may request.
pub const BOARD_SIZE_MIN: u8 = 5;
/// Largest board a client may request.
pub const BOARD_SIZE_MAX: u8 = 19;

/// Board sizes are odd and within the supported range.
pub fn is_valid_board_size(size: i64) -> bool {
    (BOARD_SIZE_MIN as i64..=BOARD_SIZE_MAX as i64).contains(&size) && size % 2 == 1
}

/// A command sent by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Register a player name
    Player { name: String },
    /// Request a game on a board of the given size
    Go { board_size: u8 },
    /// Withdraw from the matchmaking queue
    Cancel,
    /// Place a stone
    Move { x: i32, y: i32 },
    /// Pass the turn
    Pass,
    /// Resign the game
    Tableflip,
    /// Send a chat message to the other players
    Chat { message: String },
}

/// A command sent by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerCommand {
    /// Queued; a game will start once enough players are waiting
    Waiting,
    /// The game starts: your color, the board size, the moves each
    /// color plays per turn, and the other players' names in rotation
    /// order starting after your color
    Ready {
        color: Color,
        board_size: u8,
        moves_per_turn: u32,
        opponents: Vec<String>,
    },
    /// A move was accepted and played
    Valid { color: Color, x: i32, y: i32 },
    /// A move was rejected; the reason is the engine's validity code
    Invalid { color: Color, reason: String },
    /// A player passed
    Passed { color: Color },
    /// A player resigned
    Tableflipped { color: Color },
    /// The game is over; scores in color order, all entries the
    /// resignation sentinel on abnormal termination
    End { scores: Vec<i32> },
    /// Something was wrong with the last command
    Warning { message: String },
    /// Chat message relayed from another player
    Chat { from: String, message: String },
    /// The connection is being dropped by the server
    Kicked,
}

/// Errors raised while decoding a protocol line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The first word is not a known keyword
    #[error("unknown command {0:?}")]
    UnknownKeyword(String),

    /// Right keyword, wrong arguments
    #[error("malformed {keyword} command: {reason}")]
    Malformed {
        keyword: &'static str,
        reason: &'static str,
    },

    /// Board size out of range or even
    #[error("unsupported board size {0}")]
    BadBoardSize(i64),

    /// A color name that is not part of any game
    #[error("unknown color {0:?}")]
    BadColor(String),

    /// Empty line
    #[error("empty command")]
    Empty,
}

fn parse_int<T: FromStr>(word: &str, keyword: &'static str) -> Result<T, ProtocolError> {
    word.parse().map_err(|_| ProtocolError::Malformed {
        keyword,
        reason: "expected an integer",
    })
}

fn parse_color(word: &str) -> Result<Color, ProtocolError> {
    Color::from_name(word).ok_or_else(|| ProtocolError::BadColor(word.to_string()))
}

impl FromStr for ClientCommand {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split(' ');
        let keyword = words.next().filter(|w| !w.is_empty()).ok_or(ProtocolError::Empty)?;
        let rest: Vec<&str> = words.collect();
        match keyword {
            "PLAYER" => match rest.as_slice() {
                [name] if !name.is_empty() => Ok(ClientCommand::Player {
                    name: (*name).to_string(),
                }),
                _ => Err(ProtocolError::Malformed {
                    keyword: "PLAYER",
                    reason: "expected exactly one name",
                }),
            },
            "GO" => match rest.as_slice() {
                [size] => {
                    let size: i64 = parse_int(size, "GO")?;
                    if !is_valid_board_size(size) {
                        return Err(ProtocolError::BadBoardSize(size));
                    }
                    Ok(ClientCommand::Go {
                        board_size: size as u8,
                    })
                }
                _ => Err(ProtocolError::Malformed {
                    keyword: "GO",
                    reason: "expected exactly one board size",
                }),
            },
            "CANCEL" => match rest.as_slice() {
                [] => Ok(ClientCommand::Cancel),
                _ => Err(ProtocolError::Malformed {
                    keyword: "CANCEL",
                    reason: "takes no arguments",
                }),
            },
            "MOVE" => match rest.as_slice() {
                [x, y] => Ok(ClientCommand::Move {
                    x: parse_int(x, "MOVE")?,
                    y: parse_int(y, "MOVE")?,
                }),
                _ => Err(ProtocolError::Malformed {
                    keyword: "MOVE",
                    reason: "expected two coordinates",
                }),
            },
            "PASS" => match rest.as_slice() {
                [] => Ok(ClientCommand::Pass),
                _ => Err(ProtocolError::Malformed {
                    keyword: "PASS",
                    reason: "takes no arguments",
                }),
            },
            "TABLEFLIP" => match rest.as_slice() {
                [] => Ok(ClientCommand::Tableflip),
                _ => Err(ProtocolError::Malformed {
                    keyword: "TABLEFLIP",
                    reason: "takes no arguments",
                }),
            },
            "CHAT" => {
                if rest.is_empty() {
                    Err(ProtocolError::Malformed {
                        keyword: "CHAT",
                        reason: "expected a message",
                    })
                } else {
                    Ok(ClientCommand::Chat {
                        message: rest.join(" "),
                    })
                }
            }
            other => Err(ProtocolError::UnknownKeyword(other.to_string())),
        }
    }
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientCommand::Player { name } => write!(f, "PLAYER {name}"),
            ClientCommand::Go { board_size } => write!(f, "GO {board_size}"),
            ClientCommand::Cancel => write!(f, "CANCEL"),
            ClientCommand::Move { x, y } => write!(f, "MOVE {x} {y}"),
            ClientCommand::Pass => write!(f, "PASS"),
            ClientCommand::Tableflip => write!(f, "TABLEFLIP"),
            ClientCommand::Chat { message } => write!(f, "CHAT {message}"),
        }
    }
}

impl FromStr for ServerCommand {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split(' ');
        let keyword = words.next().filter(|w| !w.is_empty()).ok_or(ProtocolError::Empty)?;
        let rest: Vec<&str> = words.collect();
        match keyword {
            "WAITING" => Ok(ServerCommand::Waiting),
            "READY" => match rest.as_slice() {
                [color, size, moves, opponents @ ..] if !opponents.is_empty() => {
                    Ok(ServerCommand::Ready {
                        color: parse_color(color)?,
                        board_size: {
                            let size: i64 = parse_int(size, "READY")?;
                            if !is_valid_board_size(size) {
                                return Err(ProtocolError::BadBoardSize(size));
                            }
                            size as u8
                        },
                        moves_per_turn: parse_int(moves, "READY")?,
                        opponents: opponents.iter().map(|s| s.to_string()).collect(),
                    })
                }
                _ => Err(ProtocolError::Malformed {
                    keyword: "READY",
                    reason: "expected color, board size, moves per turn and opponents",
                }),
            },
            "VALID" => match rest.as_slice() {
                [color, x, y] => Ok(ServerCommand::Valid {
                    color: parse_color(color)?,
                    x: parse_int(x, "VALID")?,
                    y: parse_int(y, "VALID")?,
                }),
                _ => Err(ProtocolError::Malformed {
                    keyword: "VALID",
                    reason: "expected color and two coordinates",
                }),
            },
            "INVALID" => match rest.as_slice() {
                [color, reason @ ..] if !reason.is_empty() => Ok(ServerCommand::Invalid {
                    color: parse_color(color)?,
                    reason: reason.join(" "),
                }),
                _ => Err(ProtocolError::Malformed {
                    keyword: "INVALID",
                    reason: "expected color and reason",
                }),
            },
            "PASSED" => match rest.as_slice() {
                [color] => Ok(ServerCommand::Passed {
                    color: parse_color(color)?,
                }),
                _ => Err(ProtocolError::Malformed {
                    keyword: "PASSED",
                    reason: "expected exactly one color",
                }),
            },
            "TABLEFLIPPED" => match rest.as_slice() {
                [color] => Ok(ServerCommand::Tableflipped {
                    color: parse_color(color)?,
                }),
                _ => Err(ProtocolError::Malformed {
                    keyword: "TABLEFLIPPED",
                    reason: "expected exactly one color",
                }),
            },
            "END" => {
                let scores = rest
                    .iter()
                    .map(|w| parse_int(w, "END"))
                    .collect::<Result<Vec<i32>, _>>()?;
                if scores.is_empty() {
                    return Err(ProtocolError::Malformed {
                        keyword: "END",
                        reason: "expected at least one score",
                    });
                }
                Ok(ServerCommand::End { scores })
            }
            "WARNING" => Ok(ServerCommand::Warning {
                message: rest.join(" "),
            }),
            "CHAT" => match rest.as_slice() {
                [from, message @ ..] if !message.is_empty() => Ok(ServerCommand::Chat {
                    from: from.trim_end_matches(':').to_string(),
                    message: message.join(" "),
                }),
                _ => Err(ProtocolError::Malformed {
                    keyword: "CHAT",
                    reason: "expected sender and message",
                }),
            },
            "KICKED" => Ok(ServerCommand::Kicked),
            other => Err(ProtocolError::UnknownKeyword(other.to_string())),
        }
    }
}

impl fmt::Display for ServerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerCommand::Waiting => write!(f, "WAITING"),
            ServerCommand::Ready {
                color,
                board_size,
                moves_per_turn,
                opponents,
            } => {
                write!(f, "READY {color} {board_size} {moves_per_turn}")?;
                for name in opponents {
                    write!(f, " {name}")?;
                }
                Ok(())
            }
            ServerCommand::Valid { color, x, y } => write!(f, "VALID {color} {x} {y}"),
            ServerCommand::Invalid { color, reason } => write!(f, "INVALID {color} {reason}"),
            ServerCommand::Passed { color } => write!(f, "PASSED {color}"),
            ServerCommand::Tableflipped { color } => write!(f, "TABLEFLIPPED {color}"),
            ServerCommand::End { scores } => {
                write!(f, "END")?;
                for score in scores {
                    write!(f, " {score}")?;
                }
                Ok(())
            }
            ServerCommand::Warning { message } => write!(f, "WARNING {message}"),
            ServerCommand::Chat { from, message } => write!(f, "CHAT {from}: {message}"),
            ServerCommand::Kicked => write!(f, "KICKED"),
        }
    }
}
