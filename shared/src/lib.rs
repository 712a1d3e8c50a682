use serde::{Deserialize, Serialize};
use std::fmt;

pub mod codec;
pub mod envelope;

pub use envelope::{Envelope, FieldType, ProtocolError, ValidationError};

use envelope::{request_type, require_str};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Case-insensitive lookup, surrounding whitespace ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Score multiplier in tenths: 1.0, 1.2 and 1.5.
    pub fn multiplier_tenths(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 12,
            Difficulty::Hard => 15,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Win,
    Loss,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub difficulty: Difficulty,
}

/// The type of a hangman request, known before any of its fields are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Name,
    Start,
    GuessLetter,
    GuessWord,
    GetState,
    GetLetters,
    GiveUp,
    Leaderboard,
    Quit,
}

impl RequestKind {
    /// Reads the envelope's `type`, case-insensitively.
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, ProtocolError> {
        let kind = request_type(envelope)?;

        match kind.to_ascii_lowercase().as_str() {
            "name" => Ok(RequestKind::Name),
            "start" => Ok(RequestKind::Start),
            "guess_letter" => Ok(RequestKind::GuessLetter),
            "guess_word" => Ok(RequestKind::GuessWord),
            "get_state" => Ok(RequestKind::GetState),
            "get_letters" => Ok(RequestKind::GetLetters),
            "give_up" => Ok(RequestKind::GiveUp),
            "leaderboard" => Ok(RequestKind::Leaderboard),
            "quit" => Ok(RequestKind::Quit),
            _ => Err(ProtocolError::UnsupportedType(kind.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Name => "name",
            RequestKind::Start => "start",
            RequestKind::GuessLetter => "guess_letter",
            RequestKind::GuessWord => "guess_word",
            RequestKind::GetState => "get_state",
            RequestKind::GetLetters => "get_letters",
            RequestKind::GiveUp => "give_up",
            RequestKind::Leaderboard => "leaderboard",
            RequestKind::Quit => "quit",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requests understood by the hangman service.
///
/// Serializes to the wire shape (`{"type": "guess_letter", "letter": "e"}`).
/// Servers decode in two steps, [`RequestKind::from_envelope`] and then
/// [`Request::decode`], so that session state can be checked before the
/// fields are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Name { name: String },
    Start { difficulty: String },
    GuessLetter { letter: String },
    GuessWord { word: String },
    GetState,
    GetLetters,
    GiveUp,
    Leaderboard,
    Quit,
}

impl Request {
    /// Reads the fields required by `kind`.
    pub fn decode(kind: RequestKind, envelope: &Envelope) -> Result<Self, ValidationError> {
        let request = match kind {
            RequestKind::Name => Request::Name {
                name: require_str(envelope, "name")?.to_string(),
            },
            RequestKind::Start => Request::Start {
                difficulty: require_str(envelope, "difficulty")?.to_string(),
            },
            RequestKind::GuessLetter => Request::GuessLetter {
                letter: require_str(envelope, "letter")?.to_string(),
            },
            RequestKind::GuessWord => Request::GuessWord {
                word: require_str(envelope, "word")?.to_string(),
            },
            RequestKind::GetState => Request::GetState,
            RequestKind::GetLetters => Request::GetLetters,
            RequestKind::GiveUp => Request::GiveUp,
            RequestKind::Leaderboard => Request::Leaderboard,
            RequestKind::Quit => Request::Quit,
        };

        Ok(request)
    }

    /// Both decoding steps at once, for callers with no state to check.
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, ProtocolError> {
        let kind = RequestKind::from_envelope(envelope)?;
        Ok(Self::decode(kind, envelope)?)
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            Request::Name { .. } => RequestKind::Name,
            Request::Start { .. } => RequestKind::Start,
            Request::GuessLetter { .. } => RequestKind::GuessLetter,
            Request::GuessWord { .. } => RequestKind::GuessWord,
            Request::GetState => RequestKind::GetState,
            Request::GetLetters => RequestKind::GetLetters,
            Request::GiveUp => RequestKind::GiveUp,
            Request::Leaderboard => RequestKind::Leaderboard,
            Request::Quit => RequestKind::Quit,
        }
    }
}

/// A response envelope. `P` carries the service-specific fields, flattened
/// next to `ok`, `type` and `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<P = Payload> {
    pub ok: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> Response<P> {
    pub fn success(kind: &str, message: impl Into<String>, payload: P) -> Self {
        Self {
            ok: true,
            kind: Some(kind.to_string()),
            message: Some(message.into()),
            payload,
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

impl<P: Default> Response<P> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            kind: None,
            message: Some(message.into()),
            payload: P::default(),
        }
    }
}

/// Hangman response bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Board(BoardView),
    Letters { guessed_letters: Vec<char> },
    Reveal { final_word: String },
    Leaderboard { leaderboard: Vec<LeaderboardEntry> },
    Empty {},
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Empty {}
    }
}

/// What a player sees of a game: the mask, the gallows and, once the game
/// is over, the answer and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub mask: String,
    pub wrong_guesses: u32,
    pub hangman_art: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guessed_letters: Option<Vec<char>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_status: Option<GameStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}
