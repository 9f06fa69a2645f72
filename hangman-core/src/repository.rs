use async_trait::async_trait;
use hangman_types::{Attempt, Game, GameId, GameStatus, Word, WordId};

use crate::{GameError, word_store};

/// Source of candidate words.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// All available words, failing with `EmptyStore` when there are none
    async fn list_words(&self) -> Result<Vec<Word>, GameError>;

    async fn get_word(&self, id: WordId) -> Result<Option<Word>, GameError>;

    /// Insert `words` only when the store holds no word yet.
    /// Returns the number of inserted words.
    async fn seed_if_empty(&self, words: &[&str]) -> Result<u64, GameError>;

    /// Destroy every word, game and attempt, then insert `words`
    async fn reseed(&self, words: &[&str]) -> Result<u64, GameError>;

    async fn pick_random(&self) -> Result<Word, GameError> {
        let words = self.list_words().await?;
        word_store::pick_random(&words).cloned()
    }
}

/// Persistence of games and their attempts.
///
/// Implementations reject writes against terminal games and duplicate letters
/// even though the engine never asks for them.
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, word_id: WordId, max_attempts: i32) -> Result<GameId, GameError>;

    async fn get_game(&self, game_id: GameId) -> Result<Option<Game>, GameError>;

    async fn record_attempt(
        &self,
        game_id: GameId,
        letter: char,
        was_hit: bool,
    ) -> Result<Attempt, GameError>;

    /// Attempts ordered by the time they were recorded
    async fn list_attempts(&self, game_id: GameId) -> Result<Vec<Attempt>, GameError>;

    async fn set_status(&self, game_id: GameId, status: GameStatus) -> Result<(), GameError>;

    /// Append the attempt and apply `new_status` atomically
    async fn record_guess(
        &self,
        game_id: GameId,
        letter: char,
        was_hit: bool,
        new_status: GameStatus,
    ) -> Result<Attempt, GameError>;
}
