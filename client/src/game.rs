//! Client-side view of the session, updated only from server responses.

use log::debug;
use shared::{BoardView, GameStatus, Payload, Request, Response};

/// Which menu the client shows. Mirrors the server's session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    NoName,
    Main,
    InGame,
}

#[derive(Debug, Clone)]
pub struct ClientGameState {
    pub menu: Menu,
    pub player: Option<String>,
    pub board: Option<BoardView>,
    pub last_score: Option<u32>,
}

impl ClientGameState {
    pub fn new() -> Self {
        Self {
            menu: Menu::NoName,
            player: None,
            board: None,
            last_score: None,
        }
    }

    /// Folds a response into the cached state. Failed responses change
    /// nothing.
    pub fn apply(&mut self, request: &Request, response: &Response) {
        if !response.ok {
            return;
        }

        match (request, &response.payload) {
            (Request::Name { name }, _) => {
                self.player = Some(name.trim().to_string());
                if self.menu == Menu::NoName {
                    self.menu = Menu::Main;
                }
            }
            (Request::Start { .. }, Payload::Board(board)) => {
                self.board = Some(board.clone());
                self.menu = Menu::InGame;
            }
            (_, Payload::Board(board)) => {
                if board.game_status.is_some_and(GameStatus::is_terminal) {
                    self.last_score = board.score;
                    self.menu = Menu::Main;
                }
                self.board = Some(board.clone());
            }
            (Request::GiveUp, Payload::Reveal { .. }) => {
                self.last_score = Some(0);
                self.menu = Menu::Main;
            }
            (Request::GetLetters, Payload::Letters { guessed_letters }) => {
                if let Some(board) = self.board.as_mut() {
                    board.guessed_letters = Some(guessed_letters.clone());
                }
            }
            _ => {}
        }

        debug!("Client state now {:?}", self.menu);
    }

    pub fn is_playing(&self) -> bool {
        self.menu == Menu::InGame
    }
}

impl Default for ClientGameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(mask: &str, status: Option<GameStatus>, score: Option<u32>) -> BoardView {
        BoardView {
            mask: mask.to_string(),
            wrong_guesses: 0,
            hangman_art: String::new(),
            guessed_letters: None,
            game_status: status,
            final_word: None,
            score,
        }
    }

    #[test]
    fn test_name_moves_to_main_menu() {
        let mut state = ClientGameState::new();
        let request = Request::Name { name: " Ada ".into() };
        state.apply(&request, &Response::success("name", "Welcome", Payload::default()));

        assert_eq!(state.menu, Menu::Main);
        assert_eq!(state.player.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_errors_are_ignored() {
        let mut state = ClientGameState::new();
        state.apply(&Request::Name { name: "".into() }, &Response::error("Name cannot be empty"));
        assert_eq!(state.menu, Menu::NoName);
    }

    #[test]
    fn test_game_round_trip() {
        let mut state = ClientGameState::new();
        state.menu = Menu::Main;

        let start = Request::Start { difficulty: "easy".into() };
        state.apply(&start, &Response::success("start", "Game started!", Payload::Board(board("A___E", None, None))));
        assert!(state.is_playing());

        let guess = Request::GuessLetter { letter: "p".into() };
        let view = board("APP_E", Some(GameStatus::InProgress), None);
        state.apply(&guess, &Response::success("guess_letter", "Correct", Payload::Board(view)));
        assert!(state.is_playing());
        assert_eq!(state.board.as_ref().map(|b| b.mask.as_str()), Some("APP_E"));

        let view = board("APPLE", Some(GameStatus::Win), Some(190));
        state.apply(&guess, &Response::success("guess_letter", "Correct", Payload::Board(view)));
        assert_eq!(state.menu, Menu::Main);
        assert_eq!(state.last_score, Some(190));
    }

    #[test]
    fn test_give_up_returns_to_menu() {
        let mut state = ClientGameState::new();
        state.menu = Menu::InGame;
        let response = Response::success(
            "give_up",
            "Game ended. You gave up.",
            Payload::Reveal { final_word: "APPLE".into() },
        );
        state.apply(&Request::GiveUp, &response);
        assert_eq!(state.menu, Menu::Main);
        assert_eq!(state.last_score, Some(0));
    }
}
