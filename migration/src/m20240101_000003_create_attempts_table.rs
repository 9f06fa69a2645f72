use sea_orm_migration::prelude::*;

use crate::m20240101_000002_create_games_table::Games;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attempts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attempts::GameId).integer().not_null())
                    .col(ColumnDef::new(Attempts::Letter).string_len(1).not_null())
                    .col(ColumnDef::new(Attempts::WasHit).boolean().not_null())
                    .col(
                        ColumnDef::new(Attempts::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attempts_game_id")
                            .from(Attempts::Table, Attempts::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One attempt per letter per game
        manager
            .create_index(
                Index::create()
                    .name("idx_attempts_game_letter")
                    .table(Attempts::Table)
                    .col(Attempts::GameId)
                    .col(Attempts::Letter)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attempts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Attempts {
    Table,
    Id,
    GameId,
    Letter,
    WasHit,
    RecordedAt,
}
