// SPDX-License-Identifier: MIT OR Apache-2.0

//! goflip server binary

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use goflip_server::{Server, ServerConfig};

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(name = "goflip-server", about = "goflip game server", version)]
struct Args {
    /// Port to listen on
    #[clap(short, long, default_value = "7878")]
    port: u16,

    /// Players seated per game
    #[clap(long, default_value = "2", value_parser = clap::value_parser!(usize))]
    players_per_game: usize,

    /// Consecutive placements a color makes before the turn advances
    #[clap(long, default_value = "1")]
    moves_per_turn: u32,

    /// Base seed for color assignment, for reproducible games
    #[clap(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if !(goflip_core::MIN_PLAYERS..=goflip_core::MAX_PLAYERS).contains(&args.players_per_game) {
        anyhow::bail!(
            "players per game must be {}-{}",
            goflip_core::MIN_PLAYERS,
            goflip_core::MAX_PLAYERS
        );
    }
    if args.moves_per_turn == 0 {
        anyhow::bail!("moves per turn must be at least 1");
    }

    let listener = TcpListener::bind(("0.0.0.0", args.port)).await?;
    tracing::info!(port = args.port, players_per_game = args.players_per_game, "listening");

    let server = Server::new(ServerConfig {
        players_per_game: args.players_per_game,
        moves_per_turn: args.moves_per_turn,
        seed: args.seed,
    });
    server.run(listener).await
}
