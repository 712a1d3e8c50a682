//! Turns typed lines into requests for each menu level.

use shared::{Difficulty, Request};

/// Main menu entries, shown once a name is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Start(Difficulty),
    Leaderboard,
    ChangeName(String),
    Quit,
}

/// What the player asked for while a game is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameInput {
    Letter(char),
    Word(String),
    ShowState,
    ShowLetters,
    GiveUp,
    Quit,
}

impl GameInput {
    pub fn to_request(&self) -> Request {
        match self {
            GameInput::Letter(letter) => Request::GuessLetter {
                letter: letter.to_string(),
            },
            GameInput::Word(word) => Request::GuessWord { word: word.clone() },
            GameInput::ShowState => Request::GetState,
            GameInput::ShowLetters => Request::GetLetters,
            GameInput::GiveUp => Request::GiveUp,
            GameInput::Quit => Request::Quit,
        }
    }
}

impl MenuChoice {
    pub fn to_request(&self) -> Request {
        match self {
            MenuChoice::Start(difficulty) => Request::Start {
                difficulty: difficulty.as_str().to_string(),
            },
            MenuChoice::Leaderboard => Request::Leaderboard,
            MenuChoice::ChangeName(name) => Request::Name { name: name.clone() },
            MenuChoice::Quit => Request::Quit,
        }
    }
}

/// Parses a main menu line: `1`/`2`/`3` start easy/medium/hard, `4` or
/// `leaderboard`, `name <new name>`, `5`/`quit`.
pub fn parse_menu_choice(line: &str) -> Option<MenuChoice> {
    let line = line.trim();
    if let Some(name) = line.strip_prefix("name ") {
        return Some(MenuChoice::ChangeName(name.trim().to_string()));
    }

    match line.to_lowercase().as_str() {
        "1" | "easy" => Some(MenuChoice::Start(Difficulty::Easy)),
        "2" | "medium" => Some(MenuChoice::Start(Difficulty::Medium)),
        "3" | "hard" => Some(MenuChoice::Start(Difficulty::Hard)),
        "4" | "leaderboard" => Some(MenuChoice::Leaderboard),
        "5" | "quit" | "exit" => Some(MenuChoice::Quit),
        _ => None,
    }
}

/// Parses an in-game line. Commands start with `/`; a single character is a
/// letter guess and anything longer is a word guess. The server does the
/// real validation.
pub fn parse_game_input(line: &str) -> Option<GameInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(command) = line.strip_prefix('/') {
        return match command.to_lowercase().as_str() {
            "state" => Some(GameInput::ShowState),
            "letters" => Some(GameInput::ShowLetters),
            "giveup" | "give_up" => Some(GameInput::GiveUp),
            "quit" => Some(GameInput::Quit),
            _ => None,
        };
    }

    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Some(GameInput::Letter(letter)),
        _ => Some(GameInput::Word(line.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_character_is_letter() {
        assert_eq!(parse_game_input(" p "), Some(GameInput::Letter('p')));
        assert_eq!(parse_game_input("7"), Some(GameInput::Letter('7')));
    }

    #[test]
    fn test_longer_input_is_word() {
        assert_eq!(
            parse_game_input("apple"),
            Some(GameInput::Word("apple".into()))
        );
    }

    #[test]
    fn test_game_commands() {
        assert_eq!(parse_game_input("/state"), Some(GameInput::ShowState));
        assert_eq!(parse_game_input("/LETTERS"), Some(GameInput::ShowLetters));
        assert_eq!(parse_game_input("/giveup"), Some(GameInput::GiveUp));
        assert_eq!(parse_game_input("/quit"), Some(GameInput::Quit));
        assert_eq!(parse_game_input("/dance"), None);
        assert_eq!(parse_game_input("   "), None);
    }

    #[test]
    fn test_menu_choices() {
        assert_eq!(parse_menu_choice("1"), Some(MenuChoice::Start(Difficulty::Easy)));
        assert_eq!(parse_menu_choice("Hard"), Some(MenuChoice::Start(Difficulty::Hard)));
        assert_eq!(parse_menu_choice("4"), Some(MenuChoice::Leaderboard));
        assert_eq!(
            parse_menu_choice("name Grace Hopper"),
            Some(MenuChoice::ChangeName("Grace Hopper".into()))
        );
        assert_eq!(parse_menu_choice("quit"), Some(MenuChoice::Quit));
        assert_eq!(parse_menu_choice("9"), None);
    }

    #[test]
    fn test_requests() {
        assert_eq!(
            GameInput::Letter('e').to_request(),
            Request::GuessLetter { letter: "e".into() }
        );
        assert_eq!(
            MenuChoice::Start(Difficulty::Medium).to_request(),
            Request::Start { difficulty: "medium".into() }
        );
    }
}
