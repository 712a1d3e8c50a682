//! # Hangman Client Library
//!
//! Terminal client for the hangman server. It keeps a small cached view of
//! the session and never decides game outcomes itself; every state change
//! comes from a server response.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! A [`network::Connection`] over TCP using the shared length-prefixed
//! JSON framing. Typed requests for hangman, raw JSON values for the
//! utility service.
//!
//! ### Game Module (`game`)
//! Client-side mirror of the session state (`NoName`, main menu, in game),
//! updated from responses.
//!
//! ### Input Module (`input`)
//! Parses typed lines into menu choices and guesses.
//!
//! ### Rendering Module (`rendering`)
//! Formats boards, leaderboards and errors as text.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::Connection;
//! use shared::Request;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut connection = Connection::connect("127.0.0.1:8888").await?;
//!
//!     let response = connection.request(&Request::Name { name: "Ada".into() }).await?;
//!     println!("{}", response.message());
//!
//!     connection.request(&Request::Quit).await?;
//!     Ok(())
//! }
//! ```

pub mod game;
pub mod input;
pub mod network;
pub mod rendering;
