use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::debug;

use crate::entities::{attempts, games, prelude::*};
use crate::storage_error;
use hangman_core::{GameError, GameRepository};
use hangman_types::{Attempt, Game, GameId, GameStatus, WordId};

pub struct SqlGameRepository {
    db: DatabaseConnection,
}

impl SqlGameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn parse_status(model: &games::Model) -> Result<GameStatus, GameError> {
        model.status.parse().map_err(GameError::storage)
    }

    fn model_to_game(model: games::Model) -> Result<Game, GameError> {
        let status = Self::parse_status(&model)?;

        Ok(Game {
            id: model.id,
            word_id: model.word_id,
            max_attempts: model.max_attempts,
            status,
            started_at: model.started_at.to_rfc3339(),
            ended_at: model.ended_at.map(|ended_at| ended_at.to_rfc3339()),
        })
    }

    fn model_to_attempt(model: attempts::Model) -> Result<Attempt, GameError> {
        let mut chars = model.letter.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(letter), None) => letter,
            _ => {
                return Err(GameError::storage(format!(
                    "attempt {} holds malformed letter '{}'",
                    model.id, model.letter
                )));
            }
        };

        Ok(Attempt {
            id: model.id,
            game_id: model.game_id,
            letter,
            was_hit: model.was_hit,
            recorded_at: model.recorded_at.to_rfc3339(),
        })
    }

    async fn find_game<C: ConnectionTrait>(
        conn: &C,
        game_id: GameId,
    ) -> Result<games::Model, GameError> {
        Games::find_by_id(game_id)
            .one(conn)
            .await
            .map_err(storage_error)?
            .ok_or(GameError::GameNotFound { game_id })
    }

    fn ensure_in_progress(model: &games::Model) -> Result<(), GameError> {
        let status = Self::parse_status(model)?;
        if status.is_terminal() {
            return Err(GameError::IllegalTransition {
                game_id: model.id,
                status,
            });
        }
        Ok(())
    }

    async fn insert_attempt<C: ConnectionTrait>(
        conn: &C,
        game: &games::Model,
        letter: char,
        was_hit: bool,
    ) -> Result<Attempt, GameError> {
        Self::ensure_in_progress(game)?;

        let letter_text = letter.to_string();
        let existing = Attempts::find()
            .filter(attempts::Column::GameId.eq(game.id))
            .filter(attempts::Column::Letter.eq(letter_text.clone()))
            .one(conn)
            .await
            .map_err(storage_error)?;
        if existing.is_some() {
            return Err(GameError::DuplicateAttempt {
                game_id: game.id,
                letter,
            });
        }

        let attempt = attempts::ActiveModel {
            game_id: ActiveValue::Set(game.id),
            letter: ActiveValue::Set(letter_text),
            was_hit: ActiveValue::Set(was_hit),
            recorded_at: ActiveValue::Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let saved = attempt.insert(conn).await.map_err(storage_error)?;
        Self::model_to_attempt(saved)
    }

    async fn apply_status<C: ConnectionTrait>(
        conn: &C,
        game: games::Model,
        status: GameStatus,
    ) -> Result<(), GameError> {
        Self::ensure_in_progress(&game)?;
        if status == GameStatus::InProgress {
            return Ok(());
        }

        let mut active: games::ActiveModel = game.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.ended_at = ActiveValue::Set(Some(chrono::Utc::now().into()));
        active.update(conn).await.map_err(storage_error)?;

        Ok(())
    }
}

#[async_trait]
impl GameRepository for SqlGameRepository {
    async fn create_game(&self, word_id: WordId, max_attempts: i32) -> Result<GameId, GameError> {
        if max_attempts <= 0 {
            return Err(GameError::InvalidMaxAttempts(max_attempts));
        }

        let word = Words::find_by_id(word_id)
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        if word.is_none() {
            return Err(GameError::WordNotFound { word_id });
        }

        let game = games::ActiveModel {
            word_id: ActiveValue::Set(word_id),
            max_attempts: ActiveValue::Set(max_attempts),
            status: ActiveValue::Set(GameStatus::InProgress.as_str().to_string()),
            started_at: ActiveValue::Set(chrono::Utc::now().into()),
            ended_at: ActiveValue::Set(None),
            ..Default::default()
        };

        let saved = Games::insert(game)
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        debug!("Created game {} for word {}", saved.last_insert_id, word_id);
        Ok(saved.last_insert_id)
    }

    async fn get_game(&self, game_id: GameId) -> Result<Option<Game>, GameError> {
        let model = Games::find_by_id(game_id)
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        model.map(Self::model_to_game).transpose()
    }

    async fn record_attempt(
        &self,
        game_id: GameId,
        letter: char,
        was_hit: bool,
    ) -> Result<Attempt, GameError> {
        let txn = self.db.begin().await.map_err(storage_error)?;

        let game = Self::find_game(&txn, game_id).await?;
        let attempt = Self::insert_attempt(&txn, &game, letter, was_hit).await?;

        txn.commit().await.map_err(storage_error)?;
        Ok(attempt)
    }

    async fn list_attempts(&self, game_id: GameId) -> Result<Vec<Attempt>, GameError> {
        let models = Attempts::find()
            .filter(attempts::Column::GameId.eq(game_id))
            .order_by_asc(attempts::Column::RecordedAt)
            .order_by_asc(attempts::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        models.into_iter().map(Self::model_to_attempt).collect()
    }

    async fn set_status(&self, game_id: GameId, status: GameStatus) -> Result<(), GameError> {
        let txn = self.db.begin().await.map_err(storage_error)?;

        let game = Self::find_game(&txn, game_id).await?;
        Self::apply_status(&txn, game, status).await?;

        txn.commit().await.map_err(storage_error)?;
        Ok(())
    }

    async fn record_guess(
        &self,
        game_id: GameId,
        letter: char,
        was_hit: bool,
        new_status: GameStatus,
    ) -> Result<Attempt, GameError> {
        let txn = self.db.begin().await.map_err(storage_error)?;

        let game = Self::find_game(&txn, game_id).await?;
        let attempt = Self::insert_attempt(&txn, &game, letter, was_hit).await?;
        Self::apply_status(&txn, game, new_status).await?;

        txn.commit().await.map_err(storage_error)?;

        debug!(
            "Recorded '{}' for game {} (hit: {}, status: {})",
            letter, game_id, was_hit, new_status
        );
        Ok(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_and_migrate_memory;
    use crate::repositories::SqlWordStore;
    use hangman_core::WordStore;

    async fn setup_test_db() -> (SqlGameRepository, GameId) {
        let db = connect_and_migrate_memory().await.unwrap();
        let words = SqlWordStore::new(db.clone());
        words.seed_if_empty(&["GATO"]).await.unwrap();
        let word = words.pick_random().await.unwrap();

        let repo = SqlGameRepository::new(db);
        let game_id = repo.create_game(word.id, 6).await.unwrap();
        (repo, game_id)
    }

    #[tokio::test]
    async fn test_create_and_get_game() {
        let (repo, game_id) = setup_test_db().await;

        let game = repo.get_game(game_id).await.unwrap().unwrap();
        assert_eq!(game.id, game_id);
        assert_eq!(game.max_attempts, 6);
        assert_eq!(game.status, GameStatus::InProgress);
        assert!(game.ended_at.is_none());
        assert!(chrono::DateTime::parse_from_rfc3339(&game.started_at).is_ok());
    }

    #[tokio::test]
    async fn test_get_unknown_game() {
        let (repo, game_id) = setup_test_db().await;
        assert!(repo.get_game(game_id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_game_validation() {
        let (repo, game_id) = setup_test_db().await;
        let game = repo.get_game(game_id).await.unwrap().unwrap();

        assert!(matches!(
            repo.create_game(game.word_id, 0).await,
            Err(GameError::InvalidMaxAttempts(0))
        ));
        assert!(matches!(
            repo.create_game(game.word_id + 42, 6).await,
            Err(GameError::WordNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_attempts_are_listed_in_recording_order() {
        let (repo, game_id) = setup_test_db().await;

        for (letter, hit) in [('O', true), ('X', false), ('A', true)] {
            repo.record_attempt(game_id, letter, hit).await.unwrap();
        }

        let attempts = repo.list_attempts(game_id).await.unwrap();
        let letters: Vec<char> = attempts.iter().map(|a| a.letter).collect();
        assert_eq!(letters, vec!['O', 'X', 'A']);
        assert!(!attempts[1].was_hit);
        assert!(attempts.iter().all(|a| a.game_id == game_id));
    }

    #[tokio::test]
    async fn test_duplicate_letter_is_rejected() {
        let (repo, game_id) = setup_test_db().await;

        repo.record_attempt(game_id, 'G', true).await.unwrap();
        let duplicate = repo.record_attempt(game_id, 'G', true).await;
        assert!(matches!(
            duplicate,
            Err(GameError::DuplicateAttempt { letter: 'G', .. })
        ));
        assert_eq!(repo.list_attempts(game_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_attempt_on_unknown_game() {
        let (repo, game_id) = setup_test_db().await;
        let result = repo.record_attempt(game_id + 1, 'G', true).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_terminal_status_stamps_end_and_is_final() {
        let (repo, game_id) = setup_test_db().await;

        repo.set_status(game_id, GameStatus::Won).await.unwrap();
        let game = repo.get_game(game_id).await.unwrap().unwrap();
        assert_eq!(game.status, GameStatus::Won);
        assert!(game.ended_at.is_some());

        assert!(matches!(
            repo.set_status(game_id, GameStatus::Lost).await,
            Err(GameError::IllegalTransition {
                status: GameStatus::Won,
                ..
            })
        ));
        assert!(matches!(
            repo.record_attempt(game_id, 'Z', false).await,
            Err(GameError::IllegalTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_in_progress_status_is_a_no_op() {
        let (repo, game_id) = setup_test_db().await;

        repo.set_status(game_id, GameStatus::InProgress).await.unwrap();
        let game = repo.get_game(game_id).await.unwrap().unwrap();
        assert_eq!(game.status, GameStatus::InProgress);
        assert!(game.ended_at.is_none());
    }

    #[tokio::test]
    async fn test_record_guess_applies_attempt_and_status_together() {
        let (repo, game_id) = setup_test_db().await;

        repo.record_guess(game_id, 'X', false, GameStatus::InProgress)
            .await
            .unwrap();
        repo.record_guess(game_id, 'Y', false, GameStatus::Lost)
            .await
            .unwrap();

        let game = repo.get_game(game_id).await.unwrap().unwrap();
        assert_eq!(game.status, GameStatus::Lost);
        assert!(game.ended_at.is_some());
        assert_eq!(repo.list_attempts(game_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_record_guess_leaves_no_partial_write() {
        let (repo, game_id) = setup_test_db().await;

        repo.record_attempt(game_id, 'G', true).await.unwrap();
        let result = repo.record_guess(game_id, 'G', true, GameStatus::Won).await;
        assert!(result.is_err());

        let game = repo.get_game(game_id).await.unwrap().unwrap();
        assert_eq!(game.status, GameStatus::InProgress);
        assert_eq!(repo.list_attempts(game_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_game_removes_its_attempts() {
        let (repo, game_id) = setup_test_db().await;
        let word_id = repo.get_game(game_id).await.unwrap().unwrap().word_id;
        let other_id = repo.create_game(word_id, 6).await.unwrap();

        repo.record_attempt(game_id, 'G', true).await.unwrap();
        repo.record_attempt(game_id, 'X', false).await.unwrap();
        repo.record_attempt(other_id, 'A', true).await.unwrap();

        Games::delete_by_id(game_id).exec(&repo.db).await.unwrap();

        assert!(repo.get_game(game_id).await.unwrap().is_none());
        assert!(repo.list_attempts(game_id).await.unwrap().is_empty());
        assert_eq!(repo.list_attempts(other_id).await.unwrap().len(), 1);
    }
}
