// SPDX-License-Identifier: MIT OR Apache-2.0

//! goflip server - matchmaking and session hosting
//!
//! This crate provides everything around the rule engine:
//! - The line-based text protocol spoken with clients
//! - A first-come-first-served matchmaking lobby
//! - Session tasks, each owning one game and broadcasting outcomes
//! - The TCP accept loop and per-connection plumbing

#![deny(unsafe_code)]

pub mod lobby;
pub mod protocol;
pub mod server;
pub mod session;

pub use protocol::{ClientCommand, ProtocolError, ServerCommand};
pub use server::{Server, ServerConfig};
