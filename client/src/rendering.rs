//! Text rendering for the terminal client.

use crate::game::Menu;
use shared::{BoardView, LeaderboardEntry, Payload, Response};
use std::fmt::Write;

/// Spaced-out mask, e.g. `A P P _ E`.
pub fn spaced_mask(mask: &str) -> String {
    let letters: Vec<String> = mask.chars().map(String::from).collect();
    letters.join(" ")
}

fn format_letters(letters: &[char]) -> String {
    let letters: Vec<String> = letters.iter().map(|c| c.to_ascii_uppercase().to_string()).collect();
    letters.join(", ")
}

pub fn render_board(board: &BoardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", board.hangman_art);
    let _ = writeln!(out, "Word: {}", spaced_mask(&board.mask));
    let _ = writeln!(out, "Wrong guesses: {}", board.wrong_guesses);

    if let Some(letters) = &board.guessed_letters {
        let _ = writeln!(out, "Guessed letters: {}", format_letters(letters));
    }
    if let Some(word) = &board.final_word {
        let _ = writeln!(out, "The word was: {}", word);
    }
    if let Some(score) = board.score {
        let _ = writeln!(out, "Score: {}", score);
    }
    out
}

pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No games on the leaderboard yet.\n".to_string();
    }

    let mut out = String::from("=== Leaderboard ===\n");
    for (rank, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<16} {:>5}  ({})",
            rank + 1,
            entry.name,
            entry.score,
            entry.difficulty
        );
    }
    out
}

/// Message line followed by whatever the payload carries.
pub fn render_response(response: &Response) -> String {
    if !response.ok {
        return format!("Error: {}\n", response.message());
    }

    let mut out = format!("{}\n", response.message());
    match &response.payload {
        Payload::Board(board) => out.push_str(&render_board(board)),
        Payload::Letters { guessed_letters } => {
            let _ = writeln!(out, "Guessed letters: {}", format_letters(guessed_letters));
        }
        Payload::Reveal { final_word } => {
            let _ = writeln!(out, "The word was: {}", final_word);
        }
        Payload::Leaderboard { leaderboard } => out.push_str(&render_leaderboard(leaderboard)),
        Payload::Empty {} => {}
    }
    out
}

pub fn render_menu(menu: Menu) -> &'static str {
    match menu {
        Menu::NoName => "Enter your name:",
        Menu::Main => {
            "\n1. Start easy game\n2. Start medium game\n3. Start hard game\n4. Leaderboard\n5. Quit\n(type `name <new name>` to rename)"
        }
        Menu::InGame => "Guess a letter or the whole word (/state, /letters, /giveup, /quit):",
    }
}
