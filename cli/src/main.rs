// SPDX-License-Identifier: MIT OR Apache-2.0

//! goflip terminal client
//!
//! Connects to a goflip server, queues for a game and plays it, either
//! interactively or with one of the built-in strategies. The client
//! keeps a local mirror of the game so it can pre-validate moves
//! instead of being kicked for an illegal one.

mod render;
mod strategy;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use goflip_core::game::RESIGN_SCORE;
use goflip_core::{Color, Game, GameConfig, GamePhase, Move};
use goflip_server::protocol::{self, ClientCommand, ServerCommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tracing_subscriber::EnvFilter;

use crate::strategy::{GreedyStrategy, RandomStrategy, Strategy};

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(name = "goflip", about = "goflip game client", version)]
struct Args {
    /// Server host
    #[clap(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[clap(short, long, default_value = "7878")]
    port: u16,

    /// Name to register with
    #[clap(short, long)]
    name: String,

    /// Who plays the moves
    #[clap(short, long, value_enum, default_value_t = Control::Human)]
    control: Control,

    /// Requested board size (odd, 5-19); the first queued player's
    /// request wins
    #[clap(long, default_value = "9")]
    size: u8,

    /// Seed for the random strategy
    #[clap(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Control {
    /// Moves are typed on the console
    Human,
    /// Random valid moves
    Random,
    /// Highest immediate score gain
    Greedy,
}

/// Local mirror of the hosted game, kept in lockstep with the
/// broadcasts so moves can be validated before they are sent.
struct Mirror {
    game: Game,
    color: Color,
}

struct Client {
    name: String,
    strategy: Option<Box<dyn Strategy>>,
    mirror: Option<Mirror>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    if !protocol::is_valid_board_size(args.size as i64) {
        bail!(
            "board size must be odd and {}-{}",
            protocol::BOARD_SIZE_MIN,
            protocol::BOARD_SIZE_MAX
        );
    }

    let strategy: Option<Box<dyn Strategy>> = match args.control {
        Control::Human => None,
        Control::Random => Some(Box::new(RandomStrategy::new(
            args.seed.unwrap_or_else(rand::random),
        ))),
        Control::Greedy => Some(Box::new(GreedyStrategy)),
    };

    let stream = TcpStream::connect((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("connecting to {}:{}", args.host, args.port))?;
    tracing::info!(host = %args.host, port = args.port, "connected");

    let client = Client {
        name: args.name,
        strategy,
        mirror: None,
    };
    client.run(stream, args.size).await
}

impl Client {
    async fn run(mut self, stream: TcpStream, size: u8) -> Result<()> {
        let (read_half, mut write) = stream.into_split();
        send(&mut write, ClientCommand::Player { name: self.name.clone() }).await?;
        send(&mut write, ClientCommand::Go { board_size: size }).await?;

        let mut server = BufReader::new(read_half).lines();
        let mut console = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                line = server.next_line() => {
                    let Some(line) = line.context("server connection lost")? else {
                        println!("server closed the connection");
                        break;
                    };
                    match line.trim_end_matches('\r').parse::<ServerCommand>() {
                        Ok(command) => {
                            if self.handle(command, &mut write).await? {
                                break;
                            }
                        }
                        Err(err) => tracing::warn!(%err, raw = line, "unreadable server line"),
                    }
                }
                line = console.next_line() => {
                    let Some(line) = line? else { break };
                    if !self.console(line.trim(), &mut write).await? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// One server command; returns true when the client should exit.
    async fn handle(&mut self, command: ServerCommand, write: &mut OwnedWriteHalf) -> Result<bool> {
        match command {
            ServerCommand::Waiting => println!("waiting for players..."),
            ServerCommand::Ready { color, board_size, moves_per_turn, opponents } => {
                let num_players = opponents.len() + 1;
                let mut game = Game::new(GameConfig {
                    board_size,
                    moves_per_turn,
                    players_per_game: num_players,
                    seed: 0,
                })?;
                game.add_player(&self.name, Some(color))?;
                // opponents arrive in rotation order starting after us
                let mut next = color.next(num_players);
                for opponent in &opponents {
                    game.add_player(opponent, Some(next))?;
                    next = next.next(num_players);
                }
                println!("game on: you play {color} against {}", opponents.join(", "));
                println!("{}", render::draw(game.board()));
                self.mirror = Some(Mirror { game, color });
                self.act(write).await?;
            }
            ServerCommand::Valid { color, x, y } => {
                if let Some(mirror) = &mut self.mirror {
                    match mirror.game.play(color, x, y) {
                        Ok(captured) if !captured.is_empty() => {
                            println!("{color} played {x} {y}, capturing {} stones", captured.len());
                        }
                        Ok(_) => println!("{color} played {x} {y}"),
                        Err(err) => tracing::error!(%err, "mirror out of sync with server"),
                    }
                    println!("{}", render::draw(mirror.game.board()));
                }
                self.act(write).await?;
            }
            ServerCommand::Passed { color } => {
                if let Some(mirror) = &mut self.mirror {
                    let _ = mirror.game.pass(color);
                    println!("{color} passed");
                }
                self.act(write).await?;
            }
            ServerCommand::Invalid { color, reason } => {
                println!("{color}'s move was rejected: {reason}");
            }
            ServerCommand::Tableflipped { color } => println!("{color} flipped the table"),
            ServerCommand::End { scores } => {
                report(&scores);
                self.mirror = None;
                return Ok(true);
            }
            ServerCommand::Warning { message } => println!("server: {message}"),
            ServerCommand::Chat { from, message } => println!("[{from}] {message}"),
            ServerCommand::Kicked => {
                println!("kicked for an illegal move");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Let the configured strategy act whenever the mirror says it is
    /// our turn; a human gets a prompt instead.
    async fn act(&mut self, write: &mut OwnedWriteHalf) -> Result<()> {
        let Some(mirror) = &self.mirror else { return Ok(()) };
        if mirror.game.phase() != GamePhase::InProgress || mirror.game.turn() != mirror.color {
            return Ok(());
        }
        let Some(strategy) = &mut self.strategy else {
            println!(
                "your turn as {}: move <x> <y> | pass | flip | chat <text> | quit",
                mirror.color
            );
            return Ok(());
        };
        let command = match strategy.decide(&mirror.game, mirror.color) {
            Move::Place(coord) => ClientCommand::Move {
                x: coord.x as i32,
                y: coord.y as i32,
            },
            Move::Pass => ClientCommand::Pass,
            Move::Resign => ClientCommand::Tableflip,
        };
        send(write, command).await
    }

    /// One console line; returns false when the user wants to quit.
    async fn console(&mut self, line: &str, write: &mut OwnedWriteHalf) -> Result<bool> {
        let mut parts = line.split_whitespace();
        match parts.next() {
            None => {}
            Some("quit") => return Ok(false),
            Some("chat") => {
                let message = line["chat".len()..].trim().to_string();
                send(write, ClientCommand::Chat { message }).await?;
            }
            Some("move") => {
                let coords = (parts.next(), parts.next());
                let ((Some(x), Some(y)), None) = (coords, parts.next()) else {
                    println!("usage: move <x> <y>");
                    return Ok(true);
                };
                let (Ok(x), Ok(y)) = (x.parse::<i32>(), y.parse::<i32>()) else {
                    println!("usage: move <x> <y>");
                    return Ok(true);
                };
                match &self.mirror {
                    Some(mirror) => {
                        let validity = mirror.game.check_move(mirror.color, x, y);
                        if validity.is_valid() {
                            send(write, ClientCommand::Move { x, y }).await?;
                        } else {
                            // the server kicks for illegal moves, so
                            // refuse them locally
                            println!("that move would be rejected: {validity}");
                        }
                    }
                    None => println!("no game in progress"),
                }
            }
            Some("pass") => send(write, ClientCommand::Pass).await?,
            Some("flip") => send(write, ClientCommand::Tableflip).await?,
            Some(other) => println!("unknown command {other:?}"),
        }
        Ok(true)
    }
}

/// Print the end-of-game report; scores arrive in color order.
fn report(scores: &[i32]) {
    if scores.iter().all(|&s| s == RESIGN_SCORE) {
        println!("game over without a result");
        return;
    }
    let named: Vec<String> = scores
        .iter()
        .enumerate()
        .map(|(i, score)| match Color::nth(i + 1) {
            Some(color) => format!("{color} {score}"),
            None => score.to_string(),
        })
        .collect();
    println!("final scores: {}", named.join(", "));
}

async fn send(write: &mut OwnedWriteHalf, command: ClientCommand) -> Result<()> {
    let line = format!("{command}\n");
    write.write_all(line.as_bytes()).await?;
    Ok(())
}
