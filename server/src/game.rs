//! The puzzle itself: the hidden word, guessed letters, wrong-guess count,
//! terminal detection and scoring.
//!
//! Nothing in here knows about players, sessions or the wire format; see
//! [`crate::session`] for the state machine that owns a [`Game`].

use crate::error::GameError;
use shared::{Difficulty, GameStatus};
use std::collections::BTreeSet;

/// Letters revealed up front in easy mode, checked in this order.
pub const EASY_PRE_REVEAL: [char; 3] = ['e', 't', 'a'];

const POINTS_PER_LETTER: u32 = 20;
const POINTS_PER_SPARE_GUESS: u32 = 10;

/// Whether a letter guess was in the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterOutcome {
    Hit,
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    word: String,
    difficulty: Difficulty,
    guessed: BTreeSet<char>,
    wrong_guesses: u32,
    max_wrong_guesses: u32,
    word_guessed: bool,
}

impl Game {
    /// `word` is lowercased; callers guarantee it is non-empty.
    pub fn new(word: &str, difficulty: Difficulty, max_wrong_guesses: u32) -> Self {
        Self {
            word: word.to_lowercase(),
            difficulty,
            guessed: BTreeSet::new(),
            wrong_guesses: 0,
            max_wrong_guesses,
            word_guessed: false,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    /// Guessed letters in ascending order.
    pub fn guessed_letters(&self) -> Vec<char> {
        self.guessed.iter().copied().collect()
    }

    pub fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    pub fn max_wrong_guesses(&self) -> u32 {
        self.max_wrong_guesses
    }

    pub fn word_len(&self) -> usize {
        self.word.chars().count()
    }

    /// Adds each of `e`, `t`, `a` that occurs in the word. Returns the
    /// letters that were revealed, in that fixed order.
    pub fn pre_reveal(&mut self) -> Vec<char> {
        let mut revealed = Vec::new();
        for letter in EASY_PRE_REVEAL {
            if self.word.contains(letter) && self.guessed.insert(letter) {
                revealed.push(letter);
            }
        }
        revealed
    }

    /// Records a normalized letter. A repeated letter changes nothing.
    pub fn guess_letter(&mut self, letter: char) -> Result<LetterOutcome, GameError> {
        if self.guessed.contains(&letter) {
            return Err(GameError::AlreadyGuessed(letter));
        }

        self.guessed.insert(letter);
        if self.word.contains(letter) {
            Ok(LetterOutcome::Hit)
        } else {
            self.wrong_guesses = (self.wrong_guesses + 1).min(self.max_wrong_guesses);
            Ok(LetterOutcome::Miss)
        }
    }

    /// A normalized full-word guess. Anything but the exact word uses up
    /// every remaining guess.
    pub fn guess_word(&mut self, word: &str) -> bool {
        if word == self.word {
            self.word_guessed = true;
            true
        } else {
            self.wrong_guesses = self.max_wrong_guesses;
            false
        }
    }

    pub fn is_solved(&self) -> bool {
        self.word_guessed || self.word.chars().all(|c| self.guessed.contains(&c))
    }

    pub fn status(&self) -> GameStatus {
        if self.wrong_guesses >= self.max_wrong_guesses {
            GameStatus::Loss
        } else if self.is_solved() {
            GameStatus::Win
        } else {
            GameStatus::InProgress
        }
    }

    /// `(len * 20 + spare guesses * 10) * multiplier`, truncated. Only a
    /// win scores.
    pub fn score(&self, status: GameStatus) -> u32 {
        if status != GameStatus::Win {
            return 0;
        }

        let spare = self.max_wrong_guesses.saturating_sub(self.wrong_guesses);
        let base = self.word_len() as u32 * POINTS_PER_LETTER + spare * POINTS_PER_SPARE_GUESS;
        base * self.difficulty.multiplier_tenths() / 10
    }
}

/// Trims and lowercases a letter guess; it must be one ASCII letter.
pub fn parse_letter(input: &str) -> Result<char, GameError> {
    let normalized = input.trim().to_lowercase();
    let mut chars = normalized.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Ok(letter),
        _ => Err(GameError::InvalidLetter),
    }
}

/// Trims and lowercases a word guess; it must match the puzzle length and
/// hold ASCII letters only.
pub fn parse_word_guess(input: &str, expected_len: usize) -> Result<String, GameError> {
    let normalized = input.trim().to_lowercase();
    let valid = normalized.chars().count() == expected_len
        && normalized.chars().all(|c| c.is_ascii_alphabetic());

    if valid {
        Ok(normalized)
    } else {
        Err(GameError::InvalidWordGuess { expected_len })
    }
}
