use hangman_types::{GameId, GameStatus, WordId};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no words available in the word store")]
    EmptyStore,

    #[error("game {game_id} not found")]
    GameNotFound { game_id: GameId },

    #[error("word {word_id} not found")]
    WordNotFound { word_id: WordId },

    #[error("game {game_id} is already {status} and cannot change")]
    IllegalTransition { game_id: GameId, status: GameStatus },

    #[error("letter '{letter}' was already recorded for game {game_id}")]
    DuplicateAttempt { game_id: GameId, letter: char },

    #[error("max attempts must be positive, got {0}")]
    InvalidMaxAttempts(i32),

    #[error("invalid word '{text}': words must be non-empty and alphabetic")]
    InvalidWord { text: String },

    #[error("storage failure: {0}")]
    Storage(#[source] BoxError),
}

impl GameError {
    pub fn storage(err: impl Into<BoxError>) -> Self {
        GameError::Storage(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GameError::GameNotFound { .. })
    }
}
