use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://hangman.db?mode=rwc";

/// Connect and bring the schema up to date
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    Migrator::up(&db, None).await?;
    info!("Database schema is up to date ({})", database_url);
    Ok(db)
}

/// Fresh in-memory database with the schema applied
pub async fn connect_and_migrate_memory() -> Result<DatabaseConnection, DbErr> {
    connect_and_migrate("sqlite::memory:").await
}
