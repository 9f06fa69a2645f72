pub mod connection;
pub mod entities;
pub mod repositories;

use hangman_core::GameError;
use sea_orm::{DatabaseConnection, DbErr};

use repositories::{SqlGameRepository, SqlWordStore};

/// Owns the connection pool and hands out repositories sharing it
pub struct DatabaseManager {
    connection: DatabaseConnection,
}

impl DatabaseManager {
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let connection = connection::connect_and_migrate(database_url).await?;
        Ok(Self { connection })
    }

    pub fn word_store(&self) -> SqlWordStore {
        SqlWordStore::new(self.connection.clone())
    }

    pub fn game_repository(&self) -> SqlGameRepository {
        SqlGameRepository::new(self.connection.clone())
    }
}

pub(crate) fn storage_error(err: DbErr) -> GameError {
    GameError::storage(err)
}
