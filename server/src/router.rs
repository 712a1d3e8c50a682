//! Request routing for the hangman service.
//!
//! Every envelope is decoded into a typed [`Request`] before any handler
//! runs. The request type is read first, then the session state is checked,
//! then the fields, so a guess without a running game reports that before
//! a missing `letter`. Handlers then operate on the connection's own
//! [`Session`] and the shared [`Leaderboard`].

use crate::error::GameError;
use crate::leaderboard::Leaderboard;
use crate::network::{Reply, Service};
use crate::render;
use crate::resources::Resources;
use crate::session::{GuessReport, Session};
use async_trait::async_trait;
use log::{debug, info};
use shared::{Envelope, Payload, Request, RequestKind, Response};
use std::sync::Arc;

type HandlerResult = Result<Response, GameError>;

pub struct HangmanService {
    resources: Arc<Resources>,
    leaderboard: Arc<Leaderboard>,
}

impl HangmanService {
    pub fn new(resources: Arc<Resources>, leaderboard: Arc<Leaderboard>) -> Self {
        Self {
            resources,
            leaderboard,
        }
    }

    pub fn leaderboard(&self) -> &Arc<Leaderboard> {
        &self.leaderboard
    }

    async fn dispatch(&self, session: &mut Session, request: Request) -> HandlerResult {
        match request {
            Request::Name { name } => self.handle_name(session, &name),
            Request::Start { difficulty } => self.handle_start(session, &difficulty),
            Request::GuessLetter { letter } => {
                let report = session.guess_letter(&letter)?;
                let message = letter_message(&report);
                self.finish_guess(session, "guess_letter", message, report).await
            }
            Request::GuessWord { word } => {
                let report = session.guess_word(&word)?;
                let message = if report.hit {
                    "Full word guessed correctly! You win!"
                } else {
                    "Incorrect word guess. You lose!"
                };
                self.finish_guess(session, "guess_word", message.to_string(), report).await
            }
            Request::GetState => self.handle_get_state(session),
            Request::GetLetters => handle_get_letters(session),
            Request::GiveUp => handle_give_up(session),
            Request::Leaderboard => self.handle_leaderboard().await,
            Request::Quit => Ok(handle_quit(session)),
        }
    }

    fn handle_name(&self, session: &mut Session, name: &str) -> HandlerResult {
        session.set_name(name)?;
        let player = session.player().unwrap_or_default();
        Ok(Response::success(
            "name",
            format!("Welcome {}! Ready to play Hangman?", player),
            Payload::default(),
        ))
    }

    fn handle_start(&self, session: &mut Session, difficulty: &str) -> HandlerResult {
        let revealed = session.start(difficulty, &self.resources, &mut rand::thread_rng())?;

        let message = if revealed.is_empty() {
            "Game started!".to_string()
        } else {
            let letters: Vec<String> = revealed
                .iter()
                .map(|c| c.to_ascii_uppercase().to_string())
                .collect();
            format!("Game started! (Easy mode pre-guessed: {})", letters.join(" "))
        };

        let game = session.game()?;
        Ok(Response::success(
            "start",
            message,
            Payload::Board(render::board(game, &self.resources.art)),
        ))
    }

    /// Builds the full board response for a guess and records finished
    /// games on the leaderboard.
    async fn finish_guess(
        &self,
        session: &Session,
        kind: &str,
        message: String,
        report: GuessReport,
    ) -> HandlerResult {
        let mut board = render::board(&report.game, &self.resources.art);
        board.guessed_letters = Some(report.game.guessed_letters());
        board.game_status = Some(report.status);

        if let Some(score) = report.score {
            board.final_word = Some(report.game.word().to_uppercase());
            board.score = Some(score);

            let player = session.player().unwrap_or_default();
            self.leaderboard
                .record(player, score, report.game.difficulty())
                .await;
            info!("Recorded {:?} for {} with score {}", report.status, player, score);
        }

        Ok(Response::success(kind, message, Payload::Board(board)))
    }

    fn handle_get_state(&self, session: &Session) -> HandlerResult {
        let game = session.game()?;
        let mut board = render::board(game, &self.resources.art);
        board.guessed_letters = Some(game.guessed_letters());
        board.game_status = Some(game.status());
        Ok(Response::success("get_state", "Current game state.", Payload::Board(board)))
    }

    async fn handle_leaderboard(&self) -> HandlerResult {
        let leaderboard = self.leaderboard.snapshot().await;
        Ok(Response::success(
            "leaderboard",
            "Leaderboard retrieved.",
            Payload::Leaderboard { leaderboard },
        ))
    }
}

fn letter_message(report: &GuessReport) -> String {
    let letter = report.letter.map(|c| c.to_ascii_uppercase()).unwrap_or('?');
    if report.hit {
        format!("Correct guess! Letter '{}' found.", letter)
    } else {
        format!("Incorrect guess! Letter '{}' not found.", letter)
    }
}

fn handle_get_letters(session: &Session) -> HandlerResult {
    let game = session.game()?;
    Ok(Response::success(
        "get_letters",
        "Guessed letters retrieved.",
        Payload::Letters {
            guessed_letters: game.guessed_letters(),
        },
    ))
}

fn handle_give_up(session: &mut Session) -> HandlerResult {
    let game = session.give_up()?;
    Ok(Response::success(
        "give_up",
        "Game ended. You gave up.",
        Payload::Reveal {
            final_word: game.word().to_uppercase(),
        },
    ))
}

fn handle_quit(session: &Session) -> Response {
    Response::success(
        "quit",
        format!("Goodbye {}!", session.player().unwrap_or("player")),
        Payload::default(),
    )
}

/// Type, then session state, then fields. Never modifies the session.
fn decode(session: &Session, envelope: &Envelope) -> Result<Request, GameError> {
    let kind = RequestKind::from_envelope(envelope)?;
    session.check_ready(kind)?;
    Ok(Request::decode(kind, envelope)?)
}

#[async_trait]
impl Service for HangmanService {
    type Session = Session;
    type Payload = Payload;

    fn name(&self) -> &'static str {
        "hangman"
    }

    async fn handle(&self, session: &mut Self::Session, envelope: Envelope) -> Reply<Self::Payload> {
        let request = match decode(session, &envelope) {
            Ok(request) => request,
            Err(e) => {
                debug!("Rejected request: {}", e);
                return Reply::respond(Response::error(e.to_string()));
            }
        };

        debug!("{} request: {:?}", request.kind(), request);
        let quit = matches!(request, Request::Quit);

        let response = match self.dispatch(session, request).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Request failed: {}", e);
                Response::error(e.to_string())
            }
        };

        if quit {
            Reply::close(response)
        } else {
            Reply::respond(response)
        }
    }
}
