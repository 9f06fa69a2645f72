#![allow(dead_code)]

use hangman_core::GameEngine;
use hangman_types::{Attempt, Game, GameStatus, GuessOutcome, Word};

/// In-memory stand-in for the persisted state of one game
pub struct TestGame {
    pub game: Game,
    pub word: Word,
    pub history: Vec<Attempt>,
}

impl TestGame {
    pub fn new(word: &str, max_attempts: i32) -> Self {
        Self {
            game: Game {
                id: 1,
                word_id: 1,
                max_attempts,
                status: GameStatus::InProgress,
                started_at: "2024-01-01T00:00:00+00:00".to_string(),
                ended_at: None,
            },
            word: Word::new(1, word),
            history: Vec::new(),
        }
    }

    /// Submit a guess and apply it the way the server does:
    /// only accepted outcomes are recorded.
    pub fn guess(&mut self, input: &str) -> GuessOutcome {
        let outcome = GameEngine::guess_letter(&self.game, &self.word, &self.history, input);
        if let (true, Some(letter)) = (outcome.accepted, outcome.letter) {
            self.history.push(Attempt {
                id: self.history.len() as i32 + 1,
                game_id: self.game.id,
                letter,
                was_hit: outcome.was_hit,
                recorded_at: "2024-01-01T00:00:00+00:00".to_string(),
            });
            if outcome.new_status.is_terminal() {
                self.game.status = outcome.new_status;
                self.game.ended_at = Some("2024-01-01T00:05:00+00:00".to_string());
            }
        }
        outcome
    }

    pub fn guess_all(&mut self, inputs: &[&str]) -> Vec<GuessOutcome> {
        inputs.iter().map(|input| self.guess(input)).collect()
    }
}

pub fn assert_status(outcome: &GuessOutcome, expected: GameStatus) {
    assert_eq!(
        outcome.new_status, expected,
        "Expected status {:?}, got {:?}",
        expected, outcome.new_status
    );
}
