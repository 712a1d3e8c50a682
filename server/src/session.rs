//! Per-connection session state and the hangman state machine.
//!
//! A session moves `NoName -> Idle -> Playing -> Idle -> ...`. Every
//! operation checks the current [`SessionState`] first, so a game can never
//! exist without a player name and no flag combination can contradict
//! another.

use crate::error::GameError;
use crate::game::{parse_letter, parse_word_guess, Game, LetterOutcome};
use crate::resources::Resources;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use shared::{Difficulty, GameStatus, RequestKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NoName,
    Idle {
        player: String,
    },
    Playing {
        player: String,
        game: Game,
    },
}

/// The result of a letter or word guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReport {
    /// Letter was in the word, or the word guess was exact
    pub hit: bool,
    /// The normalized letter, for letter guesses
    pub letter: Option<char>,
    pub status: GameStatus,
    /// Set once the game has ended
    pub score: Option<u32>,
    /// The game as it stands after the guess
    pub game: Game,
}

/// State owned by exactly one connection for its lifetime.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    last_score: Option<u32>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn player(&self) -> Option<&str> {
        match &self.state {
            SessionState::NoName => None,
            SessionState::Idle { player } | SessionState::Playing { player, .. } => Some(player),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, SessionState::Playing { .. })
    }

    /// Score of the most recently ended game.
    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    /// The active game.
    pub fn game(&self) -> Result<&Game, GameError> {
        match &self.state {
            SessionState::Playing { game, .. } => Ok(game),
            _ => Err(GameError::NotPlaying),
        }
    }

    fn game_mut(&mut self) -> Result<&mut Game, GameError> {
        match &mut self.state {
            SessionState::Playing { game, .. } => Ok(game),
            _ => Err(GameError::NotPlaying),
        }
    }

    /// State checks that come before a request's fields are read: `start`
    /// needs a name, guesses need a running game.
    pub fn check_ready(&self, kind: RequestKind) -> Result<(), GameError> {
        match kind {
            RequestKind::Start if self.player().is_none() => Err(GameError::NoName),
            RequestKind::GuessLetter | RequestKind::GuessWord => self.game().map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Sets or replaces the player name. Allowed in every state and never
    /// ends a running game.
    pub fn set_name(&mut self, name: &str) -> Result<(), GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }

        let player = name.to_string();
        self.state = match std::mem::take(&mut self.state) {
            SessionState::NoName | SessionState::Idle { .. } => SessionState::Idle { player },
            SessionState::Playing { game, .. } => SessionState::Playing { player, game },
        };
        Ok(())
    }

    /// Starts a new game with a word drawn uniformly from the pool. In easy
    /// mode the returned letters were revealed before the first guess.
    pub fn start<R>(
        &mut self,
        difficulty: &str,
        resources: &Resources,
        rng: &mut R,
    ) -> Result<Vec<char>, GameError>
    where
        R: Rng + ?Sized,
    {
        let player = match &self.state {
            SessionState::NoName => return Err(GameError::NoName),
            SessionState::Playing { .. } => return Err(GameError::GameInProgress),
            SessionState::Idle { player } => player.clone(),
        };

        let difficulty = Difficulty::parse(difficulty)
            .ok_or_else(|| GameError::InvalidDifficulty(difficulty.trim().to_lowercase()))?;
        let word = resources
            .words
            .words(difficulty)
            .choose(rng)
            .ok_or(GameError::EmptyWordPool(difficulty))?;

        let mut game = Game::new(word, difficulty, resources.art.max_wrong_guesses());
        let revealed = match difficulty {
            Difficulty::Easy => game.pre_reveal(),
            _ => Vec::new(),
        };

        info!("Game started for {}. Difficulty: {}, Word: {}", player, difficulty, game.word());
        self.state = SessionState::Playing { player, game };
        Ok(revealed)
    }

    pub fn guess_letter(&mut self, input: &str) -> Result<GuessReport, GameError> {
        let game = self.game_mut()?;
        let letter = parse_letter(input)?;
        let outcome = game.guess_letter(letter)?;
        self.settle(outcome == LetterOutcome::Hit, Some(letter))
    }

    pub fn guess_word(&mut self, input: &str) -> Result<GuessReport, GameError> {
        let game = self.game_mut()?;
        let guess = parse_word_guess(input, game.word_len())?;
        let hit = game.guess_word(&guess);
        self.settle(hit, None)
    }

    /// Abandons the active game. Returns it so the word can be revealed.
    pub fn give_up(&mut self) -> Result<Game, GameError> {
        let game = self.finish()?;
        self.last_score = Some(0);
        info!("Game abandoned. Word was: {}", game.word());
        Ok(game)
    }

    /// Evaluates the game after a guess and ends it on a win or loss.
    fn settle(&mut self, hit: bool, letter: Option<char>) -> Result<GuessReport, GameError> {
        let status = self.game()?.status();
        if !status.is_terminal() {
            return Ok(GuessReport {
                hit,
                letter,
                status,
                score: None,
                game: self.game()?.clone(),
            });
        }

        let game = self.finish()?;
        let score = game.score(status);
        self.last_score = Some(score);
        info!("Game over. Status: {:?}, Score: {}", status, score);

        Ok(GuessReport {
            hit,
            letter,
            status,
            score: Some(score),
            game,
        })
    }

    /// Moves `Playing` back to `Idle`, handing out the finished game.
    fn finish(&mut self) -> Result<Game, GameError> {
        match std::mem::take(&mut self.state) {
            SessionState::Playing { player, game } => {
                self.state = SessionState::Idle { player };
                Ok(game)
            }
            other => {
                self.state = other;
                Err(GameError::NotPlaying)
            }
        }
    }
}
