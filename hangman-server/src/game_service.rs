use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use hangman_core::{DEFAULT_WORDS, GameEngine, GameError, GameRepository, WordStore};
use hangman_persistence::DatabaseManager;
use hangman_types::{Attempt, Game, GameId, GameResult, GameView, GuessOutcome, Word};

/// Orchestrates the engine and the injected stores for one request at a time.
///
/// Guesses against the same game are serialized through a per-game lock, so
/// the read-compute-write cycle of a guess never interleaves with another.
pub struct GameService {
    words: Arc<dyn WordStore>,
    games: Arc<dyn GameRepository>,
    game_locks: DashMap<GameId, Arc<Mutex<()>>>,
    max_attempts: i32,
}

impl GameService {
    pub fn new(
        words: Arc<dyn WordStore>,
        games: Arc<dyn GameRepository>,
        max_attempts: i32,
    ) -> Self {
        Self {
            words,
            games,
            game_locks: DashMap::new(),
            max_attempts,
        }
    }

    pub fn from_database(database: &DatabaseManager, max_attempts: i32) -> Self {
        Self::new(
            Arc::new(database.word_store()),
            Arc::new(database.game_repository()),
            max_attempts,
        )
    }

    /// Seed the default words when the store is empty
    pub async fn initialize(&self) -> Result<u64, GameError> {
        self.words.seed_if_empty(DEFAULT_WORDS).await
    }

    pub async fn start_game(&self) -> Result<GameId, GameError> {
        let word = self.words.pick_random().await?;
        let new_game = GameEngine::start_game(&word, Some(self.max_attempts))?;

        let game_id = self
            .games
            .create_game(new_game.word_id, new_game.max_attempts)
            .await?;

        info!("Started game {} ({} letters)", game_id, word.len());
        Ok(game_id)
    }

    pub async fn game_view(&self, game_id: GameId) -> Result<GameView, GameError> {
        let (game, word, history) = self.load(game_id).await?;
        Ok(GameEngine::current_view(&game, &word, &history))
    }

    pub async fn submit_guess(
        &self,
        game_id: GameId,
        input: &str,
    ) -> Result<GuessOutcome, GameError> {
        // Unknown ids never get a lock entry
        if self.games.get_game(game_id).await?.is_none() {
            return Err(GameError::GameNotFound { game_id });
        }

        let lock = self.game_lock(game_id);
        let outcome = {
            let _guard = lock.lock().await;
            self.apply_guess(game_id, input).await
        };

        // Drop the entry once no other request is waiting on it
        drop(lock);
        self.game_locks
            .remove_if(&game_id, |_, lock| Arc::strong_count(lock) == 1);

        outcome
    }

    /// Number of games with a guess currently in flight
    pub fn active_locks(&self) -> usize {
        self.game_locks.len()
    }

    pub async fn game_result(&self, game_id: GameId) -> Result<GameResult, GameError> {
        let (game, word, history) = self.load(game_id).await?;
        Ok(GameEngine::final_result(&game, &word, &history))
    }

    /// Destroy every game and reseed the default words
    pub async fn reset(&self) -> Result<u64, GameError> {
        let inserted = self.words.reseed(DEFAULT_WORDS).await?;
        self.game_locks.clear();
        info!("Store reset with {} words", inserted);
        Ok(inserted)
    }

    async fn apply_guess(&self, game_id: GameId, input: &str) -> Result<GuessOutcome, GameError> {
        let (game, word, history) = self.load(game_id).await?;
        let outcome = GameEngine::guess_letter(&game, &word, &history, input);

        let letter = match (outcome.accepted, outcome.letter) {
            (true, Some(letter)) => letter,
            _ => {
                debug!("Ignored guess {:?} for game {}", input, game_id);
                return Ok(outcome);
            }
        };

        self.games
            .record_guess(game_id, letter, outcome.was_hit, outcome.new_status)
            .await?;

        if outcome.new_status.is_terminal() {
            info!(
                "Game {} finished as {} after {} failures",
                game_id, outcome.new_status, outcome.failure_count
            );
        }

        Ok(outcome)
    }

    async fn load(&self, game_id: GameId) -> Result<(Game, Word, Vec<Attempt>), GameError> {
        let game = self
            .games
            .get_game(game_id)
            .await?
            .ok_or(GameError::GameNotFound { game_id })?;

        let word = self
            .words
            .get_word(game.word_id)
            .await?
            .ok_or(GameError::WordNotFound {
                word_id: game.word_id,
            })?;

        let history = self.games.list_attempts(game_id).await?;
        Ok((game, word, history))
    }

    fn game_lock(&self, game_id: GameId) -> Arc<Mutex<()>> {
        self.game_locks
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
