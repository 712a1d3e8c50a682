//! Word lists and hangman art, loaded once at start-up and shared read-only
//! by every connection.

use crate::error::ServerError;
use log::info;
use shared::Difficulty;
use std::fs;
use std::path::Path;

const BUNDLED_EASY: &str = include_str!("../../resources/easy_words.txt");
const BUNDLED_MEDIUM: &str = include_str!("../../resources/medium_words.txt");
const BUNDLED_HARD: &str = include_str!("../../resources/hard_words.txt");
const BUNDLED_STAGES: &str = include_str!("../../resources/hangman_stages.txt");

pub const STAGES_FILE: &str = "hangman_stages.txt";

/// File name of the word list for a difficulty.
pub fn word_file(difficulty: Difficulty) -> String {
    format!("{}_words.txt", difficulty)
}

/// Three ordered word lists keyed by difficulty.
#[derive(Debug, Clone, Default)]
pub struct WordPool {
    easy: Vec<String>,
    medium: Vec<String>,
    hard: Vec<String>,
}

impl WordPool {
    /// Builds a pool from raw words. Entries are trimmed and lowercased,
    /// blank ones dropped.
    pub fn new<I, S>(easy: I, medium: I, hard: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            easy: normalize(easy),
            medium: normalize(medium),
            hard: normalize(hard),
        }
    }

    pub fn bundled() -> Self {
        Self {
            easy: parse_word_list(BUNDLED_EASY),
            medium: parse_word_list(BUNDLED_MEDIUM),
            hard: parse_word_list(BUNDLED_HARD),
        }
    }

    /// Loads `easy_words.txt`, `medium_words.txt` and `hard_words.txt` from
    /// `dir`. Every list must hold at least one word, and words may only
    /// contain ASCII letters.
    pub fn load(dir: &Path) -> Result<Self, ServerError> {
        let read = |difficulty: Difficulty| -> Result<Vec<String>, ServerError> {
            let path = dir.join(word_file(difficulty));
            let text = fs::read_to_string(&path)
                .map_err(|e| ServerError::resource(path.display().to_string(), e.to_string()))?;
            Ok(parse_word_list(&text))
        };

        let pool = Self {
            easy: read(Difficulty::Easy)?,
            medium: read(Difficulty::Medium)?,
            hard: read(Difficulty::Hard)?,
        };
        pool.validate()?;
        Ok(pool)
    }

    pub fn words(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Every list is non-empty and every word can be guessed letter by
    /// letter.
    pub fn validate(&self) -> Result<(), ServerError> {
        for difficulty in Difficulty::ALL {
            let words = self.words(difficulty);
            if words.is_empty() {
                return Err(ServerError::resource(word_file(difficulty), "word list is empty"));
            }
            if let Some(word) = words
                .iter()
                .find(|word| !word.chars().all(|c| c.is_ascii_alphabetic()))
            {
                return Err(ServerError::resource(
                    word_file(difficulty),
                    format!("'{}' contains characters other than ASCII letters", word),
                ));
            }
        }
        Ok(())
    }
}

fn normalize<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| word.as_ref().trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}

/// One word per line; blank lines skipped.
pub fn parse_word_list(text: &str) -> Vec<String> {
    normalize(text.lines())
}

/// The gallows drawings, index 0 for no wrong guesses through the final,
/// losing stage.
#[derive(Debug, Clone)]
pub struct HangmanArt {
    stages: Vec<String>,
}

impl HangmanArt {
    /// At least two stages are needed so that one wrong guess is allowed.
    pub fn from_stages(stages: Vec<String>) -> Result<Self, ServerError> {
        if stages.len() < 2 {
            return Err(ServerError::resource(
                STAGES_FILE,
                format!("expected at least 2 stages, found {}", stages.len()),
            ));
        }
        Ok(Self { stages })
    }

    /// Parses the stage file format: stages separated by `---` lines,
    /// `STAGE` heading lines ignored.
    pub fn parse(text: &str) -> Result<Self, ServerError> {
        let mut stages = Vec::new();
        let mut current = String::new();

        for line in text.lines() {
            if line == "---" {
                stages.push(format!("\n{}", current));
                current.clear();
            } else if !line.starts_with("STAGE") {
                current.push_str(line);
                current.push('\n');
            }
        }
        if !current.is_empty() {
            stages.push(format!("\n{}", current));
        }

        Self::from_stages(stages)
    }

    pub fn bundled() -> Result<Self, ServerError> {
        Self::parse(BUNDLED_STAGES)
    }

    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ServerError::resource(path.display().to_string(), e.to_string()))?;
        Self::parse(&text)
    }

    /// Wrong guesses that end the game.
    pub fn max_wrong_guesses(&self) -> u32 {
        (self.stages.len() - 1) as u32
    }

    pub fn stage(&self, wrong_guesses: u32) -> &str {
        let index = wrong_guesses.min(self.max_wrong_guesses()) as usize;
        &self.stages[index]
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Everything the hangman service reads but never writes.
#[derive(Debug, Clone)]
pub struct Resources {
    pub words: WordPool,
    pub art: HangmanArt,
}

impl Resources {
    pub fn new(words: WordPool, art: HangmanArt) -> Self {
        Self { words, art }
    }

    /// Loads from `dir` when given, otherwise uses the copies compiled into
    /// the binary.
    pub fn load(dir: Option<&Path>) -> Result<Self, ServerError> {
        let resources = match dir {
            Some(dir) => Self::new(WordPool::load(dir)?, HangmanArt::load(&dir.join(STAGES_FILE))?),
            None => {
                let words = WordPool::bundled();
                words.validate()?;
                Self::new(words, HangmanArt::bundled()?)
            }
        };

        info!(
            "Loaded {} hangman stages and word lists: {} easy, {} medium, {} hard",
            resources.art.len(),
            resources.words.words(Difficulty::Easy).len(),
            resources.words.words(Difficulty::Medium).len(),
            resources.words.words(Difficulty::Hard).len()
        );
        Ok(resources)
    }
}
