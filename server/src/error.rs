//! Error types for the protocol servers.
//!
//! [`GameError`] and [`UtilityError`] are protocol-level failures: they are
//! rendered into `{ok: false, message}` responses and the connection stays
//! open. [`ServerError`] covers start-up failures that stop the process.

use shared::{Difficulty, ProtocolError};
use std::process::ExitCode;
use thiserror::Error;

/// A hangman request that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Player name not set. Set your name first.")]
    NoName,

    #[error("A game is already in progress. Finish it or give up first.")]
    GameInProgress,

    #[error("Invalid difficulty: {0}. Must be easy, medium, or hard.")]
    InvalidDifficulty(String),

    #[error("Server error: Word list for {0} is empty.")]
    EmptyWordPool(Difficulty),

    #[error("No game in progress. Start a new game first.")]
    NotPlaying,

    #[error("Invalid input: guess must be a single alphabetic letter.")]
    InvalidLetter,

    #[error("Letter '{}' already guessed.", .0.to_ascii_uppercase())]
    AlreadyGuessed(char),

    #[error("Invalid word guess. Word must be {expected_len} letters long and contain only letters.")]
    InvalidWordGuess { expected_len: usize },
}

/// Failures of the utility service's operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UtilityError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Array 'nums' cannot be empty")]
    EmptyNums,

    #[error("Values in array need to be ints")]
    NonIntegerNums,

    #[error("Result does not fit in a 64-bit integer")]
    Overflow,

    #[error("Field 'quantity' must be a positive integer")]
    NonPositiveQuantity,

    #[error("Action '{0}' is not supported for type 'cart'.")]
    UnknownAction(String),

    #[error("Item '{0}' not found in cart")]
    ItemNotFound(String),

    #[error("Cannot remove {requested} {item}(s), only {held} in cart")]
    NotEnoughItems {
        item: String,
        requested: u64,
        held: u64,
    },
}

impl From<shared::ValidationError> for GameError {
    fn from(err: shared::ValidationError) -> Self {
        GameError::Protocol(err.into())
    }
}

impl From<shared::ValidationError> for UtilityError {
    fn from(err: shared::ValidationError) -> Self {
        UtilityError::Protocol(err.into())
    }
}

/// Fatal errors that prevent the server from serving anyone.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Word lists or hangman art could not be loaded or were unusable
    #[error("Resource error ({path}): {reason}")]
    Resource { path: String, reason: String },

    /// Binding or accepting on the listening socket failed
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),
}

impl ServerError {
    pub fn resource(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ServerError::Resource {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ServerError::Resource { .. } => ExitCode::from(3),
            ServerError::Network(_) => ExitCode::from(4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_guessed_message_is_uppercase() {
        assert_eq!(
            GameError::AlreadyGuessed('p').to_string(),
            "Letter 'P' already guessed."
        );
    }

    #[test]
    fn test_invalid_word_guess_message() {
        let err = GameError::InvalidWordGuess { expected_len: 5 };
        assert_eq!(
            err.to_string(),
            "Invalid word guess. Word must be 5 letters long and contain only letters."
        );
    }

    #[test]
    fn test_validation_errors_pass_through() {
        let err: UtilityError = shared::ValidationError::MissingField("data".into()).into();
        assert_eq!(err.to_string(), "Field 'data' does not exist in request");
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let resource = ServerError::resource("words", "empty");
        let network = ServerError::Network(std::io::Error::other("bind"));
        assert_ne!(
            format!("{:?}", resource.exit_code()),
            format!("{:?}", network.exit_code())
        );
    }
}
