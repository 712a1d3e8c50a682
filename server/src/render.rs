//! Player-facing views of a game: the masked word and the gallows stage.

use crate::game::Game;
use crate::resources::HangmanArt;
use shared::BoardView;
use std::collections::BTreeSet;

/// Uppercase letters that were guessed, `_` for the rest, in word order.
pub fn mask(word: &str, guessed: &BTreeSet<char>) -> String {
    word.chars()
        .map(|c| {
            if guessed.contains(&c) {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Mask, wrong-guess count and art for `game`. Letters, status and the
/// final reveal are filled in by the caller where the response needs them.
pub fn board(game: &Game, art: &HangmanArt) -> BoardView {
    BoardView {
        mask: mask(game.word(), game.guessed()),
        wrong_guesses: game.wrong_guesses(),
        hangman_art: art.stage(game.wrong_guesses()).to_string(),
        guessed_letters: None,
        game_status: None,
        final_word: None,
        score: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Difficulty;

    fn art() -> HangmanArt {
        HangmanArt::from_stages((0..10).map(|i| format!("stage {}", i)).collect()).unwrap()
    }

    #[test]
    fn test_mask_hides_unguessed() {
        let guessed: BTreeSet<char> = ['a', 'e'].into_iter().collect();
        assert_eq!(mask("apple", &guessed), "A___E");

        let guessed: BTreeSet<char> = ['a', 'e', 'p'].into_iter().collect();
        assert_eq!(mask("apple", &guessed), "APP_E");
    }

    #[test]
    fn test_mask_length_matches_word() {
        assert_eq!(mask("rhythm", &BTreeSet::new()), "______");
    }

    #[test]
    fn test_board_selects_stage_by_wrong_guesses() {
        let mut game = Game::new("apple", Difficulty::Easy, 9);
        game.guess_letter('z').unwrap();
        game.guess_letter('q').unwrap();

        let view = board(&game, &art());
        assert_eq!(view.mask, "_____");
        assert_eq!(view.wrong_guesses, 2);
        assert_eq!(view.hangman_art, "stage 2");
        assert!(view.game_status.is_none());
    }

    #[test]
    fn test_board_after_loss_shows_last_stage() {
        let mut game = Game::new("apple", Difficulty::Easy, 9);
        game.guess_word("zzzzz");
        assert_eq!(board(&game, &art()).hangman_art, "stage 9");
    }
}
