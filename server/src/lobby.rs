// SPDX-License-Identifier: MIT OR Apache-2.0

//! Matchmaking: queued players are filled into games in arrival order
//!
//! The lobby itself is synchronous state; the server wraps it in a
//! mutex and spawns a session whenever a full group comes back.

use tokio::sync::mpsc::UnboundedSender;

use crate::protocol::ServerCommand;

/// Opaque per-connection identifier.
pub type ConnId = u64;

/// A registered client waiting for a game.
#[derive(Debug, Clone)]
pub struct PendingPlayer {
    pub conn: ConnId,
    pub name: String,
    /// Board size this player asked for; the first player of a group
    /// decides the size the game is actually played on
    pub board_size: u8,
    /// Channel to the connection's writer task
    pub tx: UnboundedSender<ServerCommand>,
}

/// First-come-first-served matchmaking queue.
#[derive(Debug)]
pub struct Lobby {
    queue: Vec<PendingPlayer>,
    players_per_game: usize,
}

impl Lobby {
    pub fn new(players_per_game: usize) -> Self {
        Self {
            queue: Vec::new(),
            players_per_game,
        }
    }

    /// Number of players currently waiting.
    pub fn waiting(&self) -> usize {
        self.queue.len()
    }

    /// Queue a player. When this fills a group, the whole group is
    /// drained and returned so the caller can start a session; the
    /// first player's requested board size applies.
    pub fn enqueue(&mut self, player: PendingPlayer) -> Option<Vec<PendingPlayer>> {
        tracing::debug!(name = %player.name, waiting = self.queue.len() + 1, "player queued");
        self.queue.push(player);
        if self.queue.len() == self.players_per_game {
            let group: Vec<PendingPlayer> = self.queue.drain(..).collect();
            tracing::info!(players = group.len(), board_size = group[0].board_size, "group matched");
            Some(group)
        } else {
            None
        }
    }

    /// Remove a queued player (CANCEL or disconnect before matching).
    pub fn withdraw(&mut self, conn: ConnId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|p| p.conn != conn);
        before != self.queue.len()
    }
}
