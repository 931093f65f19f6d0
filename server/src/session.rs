// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session host: one task owning one game
//!
//! The engine is not internally synchronized, so a session task has
//! exclusive ownership of its `Game` and serializes all commands
//! arriving from the seated connections. Outcomes are broadcast to
//! every participant as protocol commands.

use goflip_core::{Color, Game, GameConfig, GameError};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::protocol::{ClientCommand, ServerCommand};

/// Message from a connection task to its session.
#[derive(Debug)]
pub enum SessionMessage {
    /// A parsed command from the player at `seat`
    Command { seat: usize, command: ClientCommand },
    /// The player's connection went away
    Disconnected { seat: usize },
}

/// Sender half used by connection tasks; seats are handed out by the
/// server in the order the players were matched.
pub type SessionHandle = UnboundedSender<SessionMessage>;

struct Seat {
    name: String,
    color: Color,
    tx: UnboundedSender<ServerCommand>,
}

/// A running game and its participants.
pub struct Session {
    game: Game,
    seats: Vec<Seat>,
    rx: UnboundedReceiver<SessionMessage>,
}

impl Session {
    /// Create the game, seat every player on a random color, announce
    /// `READY` to each, and spawn the session task.
    pub fn start(
        config: GameConfig,
        players: Vec<(String, UnboundedSender<ServerCommand>)>,
    ) -> Result<SessionHandle, GameError> {
        let mut game = Game::new(config)?;
        let mut seats = Vec::with_capacity(players.len());
        for (name, tx) in players {
            let color = game.add_player_random(&name)?;
            seats.push(Seat { name, color, tx });
        }

        let num_players = game.players_per_game();
        for seat in &seats {
            // other players in rotation order, starting after this seat
            let mut opponents = Vec::with_capacity(num_players - 1);
            let mut color = seat.color.next(num_players);
            while color != seat.color {
                if let Some(player) = game.player_by_color(color) {
                    opponents.push(player.name().to_string());
                }
                color = color.next(num_players);
            }
            let _ = seat.tx.send(ServerCommand::Ready {
                color: seat.color,
                board_size: game.board().size(),
                moves_per_turn: game.moves_per_turn(),
                opponents,
            });
        }

        let (tx, rx) = unbounded_channel();
        tokio::spawn(Session { game, seats, rx }.run());
        Ok(tx)
    }

    async fn run(mut self) {
        while let Some(message) = self.rx.recv().await {
            let over = match message {
                SessionMessage::Command { seat, command } => self.handle(seat, command),
                SessionMessage::Disconnected { seat } => self.abandon(seat),
            };
            if over {
                break;
            }
        }
        tracing::debug!("session closed");
    }

    fn broadcast(&self, command: ServerCommand) {
        for seat in &self.seats {
            let _ = seat.tx.send(command.clone());
        }
    }

    fn send(&self, seat: usize, command: ServerCommand) {
        let _ = self.seats[seat].tx.send(command);
    }

    /// Handle one command; returns true when the session is over.
    fn handle(&mut self, seat: usize, command: ClientCommand) -> bool {
        let color = self.seats[seat].color;
        match command {
            ClientCommand::Move { x, y } => {
                let validity = self.game.check_move(color, x, y);
                if validity.is_valid() {
                    // the check just passed; play cannot fail
                    let _ = self.game.play(color, x, y);
                    self.broadcast(ServerCommand::Valid { color, x, y });
                    false
                } else {
                    // clients are expected to pre-validate; an illegal
                    // submission costs them the game, as in a kick
                    tracing::warn!(name = %self.seats[seat].name, %validity, "illegal move, kicking");
                    self.broadcast(ServerCommand::Invalid {
                        color,
                        reason: validity.to_string(),
                    });
                    self.send(seat, ServerCommand::Kicked);
                    self.abandon(seat)
                }
            }
            ClientCommand::Pass => {
                if !self.game.is_valid_pass(color) {
                    self.send(
                        seat,
                        ServerCommand::Warning {
                            message: format!("it is not {color}'s turn"),
                        },
                    );
                    return false;
                }
                match self.game.pass(color) {
                    Ok(report) => {
                        self.broadcast(ServerCommand::Passed { color });
                        match report {
                            Some(scores) => {
                                self.broadcast(ServerCommand::End { scores });
                                true
                            }
                            None => false,
                        }
                    }
                    Err(err) => {
                        self.send(seat, ServerCommand::Warning { message: err.to_string() });
                        false
                    }
                }
            }
            ClientCommand::Tableflip => match self.game.resign(color) {
                Ok(scores) => {
                    self.broadcast(ServerCommand::Tableflipped { color });
                    self.broadcast(ServerCommand::End { scores });
                    true
                }
                Err(err) => {
                    self.send(seat, ServerCommand::Warning { message: err.to_string() });
                    false
                }
            },
            ClientCommand::Chat { message } => {
                let from = self.seats[seat].name.clone();
                for (i, other) in self.seats.iter().enumerate() {
                    if i != seat {
                        let _ = other.tx.send(ServerCommand::Chat {
                            from: from.clone(),
                            message: message.clone(),
                        });
                    }
                }
                false
            }
            ClientCommand::Player { .. } | ClientCommand::Go { .. } | ClientCommand::Cancel => {
                self.send(
                    seat,
                    ServerCommand::Warning {
                        message: "already in a game".to_string(),
                    },
                );
                false
            }
        }
    }

    /// A player is gone; end the game as a table-flip on their behalf.
    fn abandon(&mut self, seat: usize) -> bool {
        let color = self.seats[seat].color;
        // resign fails only if the game is already over, in which case
        // there is nothing left to report
        if let Ok(scores) = self.game.resign(color) {
            tracing::info!(name = %self.seats[seat].name, "player left, game abandoned");
            self.broadcast(ServerCommand::Tableflipped { color });
            self.broadcast(ServerCommand::End { scores });
        }
        true
    }
}
