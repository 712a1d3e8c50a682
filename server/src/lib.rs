//! # Hangman Server Library
//!
//! This library provides the server side of a small family of JSON
//! protocols, each message framed with a 4-byte big-endian length prefix.
//! The flagship service is a word-guessing game with a process-wide
//! leaderboard; a second utility service shares the same transport and
//! connection loop.
//!
//! ## Core Responsibilities
//!
//! ### Connection Handling
//! Every accepted TCP connection is served on its own task. Requests are
//! read as length-prefixed JSON frames and answered strictly in order, one
//! response per request. A malformed frame is answered with an error and
//! the connection stays open.
//!
//! ### Session State
//! Each connection owns a [`session::Session`] for its whole lifetime. The
//! session is an explicit state machine (`NoName`, `Idle`, `Playing`), so
//! a game can never exist without a player name.
//!
//! ### Shared Leaderboard
//! Finished games (wins and losses, never give-ups) are appended to a
//! single [`leaderboard::Leaderboard`] injected into the service. It is the
//! only state shared between connections.
//!
//! ## Module Organization
//!
//! - `config`: listening address, service selection and resource directory
//! - `error`: game, utility and fatal start-up errors
//! - `game`: the puzzle, guess validation and scoring
//! - `leaderboard`: append-only record of finished games
//! - `network`: the [`network::Service`] trait, accept loop and per-connection loop
//! - `render`: masked word and gallows views
//! - `resources`: word pools and hangman art, bundled or loaded from disk
//! - `router`: request dispatch for the hangman service
//! - `session`: per-connection state machine
//! - `utility`: the echo/arithmetic/cart service
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::leaderboard::Leaderboard;
//! use server::network::Server;
//! use server::resources::Resources;
//! use server::router::HangmanService;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resources = Arc::new(Resources::load(None)?);
//!     let service = HangmanService::new(resources, Arc::new(Leaderboard::new()));
//!
//!     let server = Server::bind("127.0.0.1:8888", service).await?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod network;
pub mod render;
pub mod resources;
pub mod router;
pub mod session;
pub mod utility;
