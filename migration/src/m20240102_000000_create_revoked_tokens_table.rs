use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240101_000000_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RevokedTokens::Table)
                    .if_not_exists()
                    .col(pk_auto(RevokedTokens::Id))
                    .col(string_len(RevokedTokens::Jti, 64).not_null().unique_key())
                    .col(integer(RevokedTokens::UserId).not_null())
                    .col(timestamp(RevokedTokens::ExpiresAt).not_null())
                    .col(timestamp(RevokedTokens::RevokedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_revoked_tokens_user_id")
                            .from(RevokedTokens::Table, RevokedTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Expired rows are purged by expiry
        manager
            .create_index(
                Index::create()
                    .name("idx_revoked_tokens_expires_at")
                    .table(RevokedTokens::Table)
                    .col(RevokedTokens::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RevokedTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RevokedTokens {
    Table,
    Id,
    Jti,
    UserId,
    ExpiresAt,
    RevokedAt,
}
