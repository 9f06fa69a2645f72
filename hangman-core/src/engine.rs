use hangman_types::{
    Attempt, Game, GameResult, GameStatus, GameView, GuessOutcome, NewGame, Word,
};
use std::collections::BTreeSet;

use crate::GameError;

pub const DEFAULT_MAX_ATTEMPTS: i32 = 6;
pub const PLACEHOLDER: char = '_';

/// Letters offered to the player as "still available"
pub const ALPHABET: std::ops::RangeInclusive<char> = 'A'..='Z';

/// Hangman state machine.
///
/// Every function is pure: state is recomputed from the attempt history on each
/// call instead of being read from cached counters, so the history is the only
/// source of truth for pattern and failure count.
pub struct GameEngine;

impl GameEngine {
    /// Validate the parameters of a new game.
    /// The repository assigns the id and start timestamp when persisting it.
    pub fn start_game(word: &Word, max_attempts: Option<i32>) -> Result<NewGame, GameError> {
        let max_attempts = max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts <= 0 {
            return Err(GameError::InvalidMaxAttempts(max_attempts));
        }
        if word.is_empty() {
            return Err(GameError::InvalidWord {
                text: word.text.clone(),
            });
        }

        Ok(NewGame {
            word_id: word.id,
            max_attempts,
            status: GameStatus::InProgress,
        })
    }

    /// Normalize raw user input into a guessable letter.
    /// Returns `None` unless the trimmed input is exactly one alphabetic character.
    pub fn normalize_letter(input: &str) -> Option<char> {
        let mut chars = input.trim().chars();
        let letter = chars.next()?;
        if chars.next().is_some() || !letter.is_alphabetic() {
            return None;
        }

        let mut upper = letter.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(upper), None) => Some(upper),
            _ => None,
        }
    }

    pub fn guess_letter(game: &Game, word: &Word, history: &[Attempt], input: &str) -> GuessOutcome {
        let target = word.normalized();
        let mut guessed = Self::guessed_set(history);

        let letter = match Self::normalize_letter(input) {
            Some(letter) if !game.status.is_terminal() && !guessed.contains(&letter) => letter,
            _ => return Self::rejected(game, &target, &guessed),
        };

        let was_hit = target.contains(letter);
        guessed.insert(letter);

        let revealed_pattern = Self::revealed_pattern(&target, &guessed);
        let failure_count = Self::failure_count(&target, &guessed);

        // Win is checked before the failure budget
        let new_status = if Self::is_solved(&target, &guessed) {
            GameStatus::Won
        } else if failure_count >= game.max_attempts {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };

        GuessOutcome {
            accepted: true,
            letter: Some(letter),
            was_hit,
            revealed_pattern,
            failure_count,
            new_status,
        }
    }

    pub fn current_view(game: &Game, word: &Word, history: &[Attempt]) -> GameView {
        let target = word.normalized();
        let guessed = Self::guessed_set(history);

        // Keep the order the letters were played in
        let mut guessed_letters = Vec::with_capacity(history.len());
        for attempt in history {
            if !guessed_letters.contains(&attempt.letter) {
                guessed_letters.push(attempt.letter);
            }
        }

        GameView {
            game_id: game.id,
            revealed_pattern: Self::revealed_pattern(&target, &guessed),
            guessed_letters,
            remaining_letters: ALPHABET.filter(|c| !guessed.contains(c)).collect(),
            failure_count: Self::failure_count(&target, &guessed),
            max_attempts: game.max_attempts,
            status: game.status,
        }
    }

    pub fn final_result(game: &Game, word: &Word, history: &[Attempt]) -> GameResult {
        let target = word.normalized();
        let guessed = Self::guessed_set(history);

        GameResult {
            game_id: game.id,
            status: game.status,
            failure_count: Self::failure_count(&target, &guessed),
            word: target,
            max_attempts: game.max_attempts,
            started_at: game.started_at.clone(),
            ended_at: game.ended_at.clone(),
        }
    }

    pub fn revealed_pattern(target: &str, guessed: &BTreeSet<char>) -> String {
        target
            .chars()
            .map(|c| if guessed.contains(&c) { c } else { PLACEHOLDER })
            .collect()
    }

    /// Number of distinct guessed letters that do not occur in the target
    pub fn failure_count(target: &str, guessed: &BTreeSet<char>) -> i32 {
        guessed.iter().filter(|c| !target.contains(**c)).count() as i32
    }

    pub fn is_solved(target: &str, guessed: &BTreeSet<char>) -> bool {
        target.chars().all(|c| guessed.contains(&c))
    }

    fn guessed_set(history: &[Attempt]) -> BTreeSet<char> {
        history.iter().map(|attempt| attempt.letter).collect()
    }

    fn rejected(game: &Game, target: &str, guessed: &BTreeSet<char>) -> GuessOutcome {
        GuessOutcome {
            accepted: false,
            letter: None,
            was_hit: false,
            revealed_pattern: Self::revealed_pattern(target, guessed),
            failure_count: Self::failure_count(target, guessed),
            new_status: game.status,
        }
    }
}
