// SPDX-License-Identifier: MIT OR Apache-2.0

//! TCP accept loop and per-connection plumbing
//!
//! Every connection gets a reader loop (this module) and a writer task
//! fed by an unbounded channel; game state itself lives in session
//! tasks. Shared server state is only the lobby and the conn-to-session
//! routing table.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use goflip_core::GameConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio::sync::Mutex;

use crate::lobby::{ConnId, Lobby, PendingPlayer};
use crate::protocol::{ClientCommand, ServerCommand};
use crate::session::{Session, SessionHandle, SessionMessage};

/// Server-wide settings; per-game settings except the board size, which
/// clients request with `GO`.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    /// Players seated per game (2-6)
    pub players_per_game: usize,
    /// Placements per turn in every hosted game
    pub moves_per_turn: u32,
    /// Base seed for per-session RNGs; random when absent
    pub seed: Option<u64>,
}

struct Shared {
    lobby: Lobby,
    /// Connection -> (session, seat) routing for seated players
    sessions: HashMap<ConnId, (SessionHandle, usize)>,
    games_started: u64,
    config: ServerConfig,
}

/// The goflip server: lobby plus any number of concurrent sessions.
pub struct Server {
    shared: Mutex<Shared>,
    next_conn: AtomicU64,
}

impl Server {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        Arc::new(Self {
            shared: Mutex::new(Shared {
                lobby: Lobby::new(config.players_per_game),
                sessions: HashMap::new(),
                games_started: 0,
                config,
            }),
            next_conn: AtomicU64::new(1),
        })
    }

    /// Accept connections until the listener fails.
    pub async fn run(self: Arc<Self>, listener: TcpListener) -> Result<()> {
        loop {
            let (stream, addr) = listener.accept().await?;
            let conn = self.next_conn.fetch_add(1, Ordering::Relaxed);
            tracing::info!(%addr, conn, "client connected");
            let server = Arc::clone(&self);
            tokio::spawn(async move {
                if let Err(err) = server.handle_connection(conn, stream).await {
                    tracing::warn!(conn, %err, "connection error");
                }
                tracing::info!(conn, "client disconnected");
            });
        }
    }

    async fn handle_connection(&self, conn: ConnId, stream: TcpStream) -> Result<()> {
        let (read_half, mut write_half) = stream.into_split();
        let (tx, mut rx) = unbounded_channel::<ServerCommand>();

        let writer = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                let line = format!("{command}\n");
                if write_half.write_all(line.as_bytes()).await.is_err() {
                    break;
                }
            }
            let _ = write_half.shutdown().await;
        });

        let mut lines = BufReader::new(read_half).lines();
        let mut name: Option<String> = None;
        while let Some(line) = lines.next_line().await? {
            let line = line.trim_end_matches('\r');
            match line.parse::<ClientCommand>() {
                Ok(command) => self.dispatch(conn, &mut name, command, &tx).await,
                Err(err) => {
                    tracing::debug!(conn, %err, raw = line, "bad command");
                    let _ = tx.send(ServerCommand::Warning {
                        message: err.to_string(),
                    });
                }
            }
        }

        self.disconnect(conn).await;
        drop(tx);
        let _ = writer.await;
        Ok(())
    }

    async fn dispatch(
        &self,
        conn: ConnId,
        name: &mut Option<String>,
        command: ClientCommand,
        tx: &UnboundedSender<ServerCommand>,
    ) {
        let mut shared = self.shared.lock().await;

        // seated players talk to their session
        let mut command = command;
        if let Some((handle, seat)) = shared.sessions.get(&conn).map(|(h, s)| (h.clone(), *s)) {
            match handle.send(SessionMessage::Command { seat, command }) {
                Ok(()) => return,
                Err(err) => {
                    // the session is over; recover the command and
                    // handle it as from an idle connection
                    shared.sessions.remove(&conn);
                    let SessionMessage::Command { command: recovered, .. } = err.0 else {
                        return;
                    };
                    command = recovered;
                }
            }
        }

        match command {
            ClientCommand::Player { name: new_name } => {
                tracing::debug!(conn, name = %new_name, "player registered");
                *name = Some(new_name);
            }
            ClientCommand::Go { board_size } => {
                let Some(name) = name.clone() else {
                    let _ = tx.send(ServerCommand::Warning {
                        message: "register with PLAYER first".to_string(),
                    });
                    return;
                };
                let _ = tx.send(ServerCommand::Waiting);
                let group = shared.lobby.enqueue(PendingPlayer {
                    conn,
                    name,
                    board_size,
                    tx: tx.clone(),
                });
                if let Some(group) = group {
                    self.start_session(&mut shared, group);
                }
            }
            ClientCommand::Cancel => {
                if !shared.lobby.withdraw(conn) {
                    let _ = tx.send(ServerCommand::Warning {
                        message: "nothing to cancel".to_string(),
                    });
                }
            }
            ClientCommand::Move { .. }
            | ClientCommand::Pass
            | ClientCommand::Tableflip
            | ClientCommand::Chat { .. } => {
                let _ = tx.send(ServerCommand::Warning {
                    message: "no game in progress".to_string(),
                });
            }
        }
    }

    /// Build the game config for a matched group and wire every member
    /// to the freshly spawned session.
    fn start_session(&self, shared: &mut Shared, group: Vec<PendingPlayer>) {
        let seed = match shared.config.seed {
            Some(base) => base.wrapping_add(shared.games_started),
            None => rand::random(),
        };
        shared.games_started += 1;
        let config = GameConfig {
            board_size: group[0].board_size,
            moves_per_turn: shared.config.moves_per_turn,
            players_per_game: shared.config.players_per_game,
            seed,
        };
        let conns: Vec<ConnId> = group.iter().map(|p| p.conn).collect();
        let players = group.into_iter().map(|p| (p.name, p.tx)).collect();
        match Session::start(config, players) {
            Ok(handle) => {
                for (seat, conn) in conns.into_iter().enumerate() {
                    shared.sessions.insert(conn, (handle.clone(), seat));
                }
            }
            Err(err) => {
                // config was validated at startup; only reachable on a bug
                tracing::error!(%err, "failed to start session");
            }
        }
    }

    async fn disconnect(&self, conn: ConnId) {
        let mut shared = self.shared.lock().await;
        shared.lobby.withdraw(conn);
        if let Some((handle, seat)) = shared.sessions.remove(&conn) {
            let _ = handle.send(SessionMessage::Disconnected { seat });
        }
    }
}
