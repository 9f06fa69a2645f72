use async_trait::async_trait;
use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder,
    TransactionTrait,
};
use tracing::info;

use crate::entities::{prelude::*, words};
use crate::storage_error;
use hangman_core::{normalize_word, GameError, WordStore};
use hangman_types::{Word, WordId};

pub struct SqlWordStore {
    db: DatabaseConnection,
}

impl SqlWordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_word(model: words::Model) -> Word {
        Word {
            id: model.id,
            text: model.text,
        }
    }

    pub async fn count(&self) -> Result<u64, GameError> {
        Words::find().count(&self.db).await.map_err(storage_error)
    }

    async fn insert_words<C: ConnectionTrait>(conn: &C, texts: &[&str]) -> Result<u64, GameError> {
        let models = texts
            .iter()
            .map(|text| {
                normalize_word(text).map(|text| words::ActiveModel {
                    text: ActiveValue::Set(text),
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if models.is_empty() {
            return Ok(0);
        }

        let inserted = models.len() as u64;
        Words::insert_many(models)
            .exec(conn)
            .await
            .map_err(storage_error)?;

        Ok(inserted)
    }
}

#[async_trait]
impl WordStore for SqlWordStore {
    async fn list_words(&self) -> Result<Vec<Word>, GameError> {
        let models = Words::find()
            .order_by_asc(words::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        if models.is_empty() {
            return Err(GameError::EmptyStore);
        }

        Ok(models.into_iter().map(Self::model_to_word).collect())
    }

    async fn get_word(&self, id: WordId) -> Result<Option<Word>, GameError> {
        let model = Words::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(model.map(Self::model_to_word))
    }

    async fn seed_if_empty(&self, texts: &[&str]) -> Result<u64, GameError> {
        let txn = self.db.begin().await.map_err(storage_error)?;

        let existing = Words::find().count(&txn).await.map_err(storage_error)?;
        if existing > 0 {
            return Ok(0);
        }

        let inserted = Self::insert_words(&txn, texts).await?;
        txn.commit().await.map_err(storage_error)?;

        info!("Seeded word store with {} words", inserted);
        Ok(inserted)
    }

    async fn reseed(&self, texts: &[&str]) -> Result<u64, GameError> {
        let txn = self.db.begin().await.map_err(storage_error)?;

        // Children first so the reset does not depend on foreign key enforcement
        Attempts::delete_many()
            .exec(&txn)
            .await
            .map_err(storage_error)?;
        Games::delete_many().exec(&txn).await.map_err(storage_error)?;
        Words::delete_many().exec(&txn).await.map_err(storage_error)?;

        let inserted = Self::insert_words(&txn, texts).await?;
        txn.commit().await.map_err(storage_error)?;

        info!("Reset store and reseeded {} words", inserted);
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_and_migrate_memory;
    use crate::repositories::SqlGameRepository;
    use hangman_core::{GameRepository, DEFAULT_WORDS};

    async fn setup_test_db() -> (SqlWordStore, SqlGameRepository) {
        let db = connect_and_migrate_memory().await.unwrap();
        (SqlWordStore::new(db.clone()), SqlGameRepository::new(db))
    }

    #[tokio::test]
    async fn test_empty_store_is_an_error() {
        let (words, _) = setup_test_db().await;

        assert!(matches!(words.list_words().await, Err(GameError::EmptyStore)));
        assert!(matches!(words.pick_random().await, Err(GameError::EmptyStore)));
    }

    #[tokio::test]
    async fn test_seed_if_empty_only_seeds_once() {
        let (words, _) = setup_test_db().await;

        assert_eq!(words.seed_if_empty(DEFAULT_WORDS).await.unwrap(), 5);
        assert_eq!(words.seed_if_empty(&["OTRA"]).await.unwrap(), 0);

        let texts: Vec<String> = words
            .list_words()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.text)
            .collect();
        assert_eq!(texts, vec!["PYTHON", "FLASK", "GATO", "MANZANA", "COMPUTADORA"]);
    }

    #[tokio::test]
    async fn test_seed_normalizes_to_uppercase() {
        let (words, _) = setup_test_db().await;

        words.seed_if_empty(&["gato", " Perro "]).await.unwrap();
        let texts: Vec<String> = words
            .list_words()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.text)
            .collect();
        assert_eq!(texts, vec!["GATO", "PERRO"]);
    }

    #[tokio::test]
    async fn test_seed_rejects_invalid_words_without_partial_insert() {
        let (words, _) = setup_test_db().await;

        let result = words.seed_if_empty(&["GATO", "R2D2"]).await;
        assert!(matches!(result, Err(GameError::InvalidWord { .. })));
        assert_eq!(words.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_word() {
        let (words, _) = setup_test_db().await;
        words.seed_if_empty(&["GATO"]).await.unwrap();

        let listed = words.list_words().await.unwrap();
        let found = words.get_word(listed[0].id).await.unwrap().unwrap();
        assert_eq!(found.text, "GATO");
        assert!(words.get_word(listed[0].id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_pick_random_returns_stored_word() {
        let (words, _) = setup_test_db().await;
        words.seed_if_empty(DEFAULT_WORDS).await.unwrap();

        for _ in 0..20 {
            let word = words.pick_random().await.unwrap();
            assert!(DEFAULT_WORDS.contains(&word.text.as_str()));
        }
    }

    #[tokio::test]
    async fn test_reseed_destroys_games_and_attempts() {
        let (words, games) = setup_test_db().await;
        words.seed_if_empty(&["GATO"]).await.unwrap();

        let word = words.pick_random().await.unwrap();
        let game_id = games.create_game(word.id, 6).await.unwrap();
        games.record_attempt(game_id, 'G', true).await.unwrap();

        assert_eq!(words.reseed(&["PERRO", "LORO"]).await.unwrap(), 2);

        assert!(games.get_game(game_id).await.unwrap().is_none());
        assert!(games.list_attempts(game_id).await.unwrap().is_empty());
        assert_eq!(words.count().await.unwrap(), 2);
        assert!(words.get_word(word.id).await.unwrap().is_none());
    }
}
