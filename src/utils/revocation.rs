use chrono::{NaiveDate, NaiveDateTime, Utc};
use entity::{revoked_tokens, users};
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::utils::jwt::Claims;

/// Expiry recorded for tokens whose `exp` does not fit a timestamp; far enough
/// out that the purge never drops them.
fn far_future() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Records the token's `jti` as revoked. Revoking twice is a no-op.
///
/// Returns `false` when the owning user no longer exists; such tokens are
/// already rejected by `protect`.
pub async fn revoke_token<C>(db: &C, claims: &Claims, user_id: i32) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    if users::Entity::find_by_id(user_id).one(db).await?.is_none() {
        return Ok(false);
    }

    let revoked = revoked_tokens::ActiveModel {
        jti: Set(claims.jti.clone()),
        user_id: Set(user_id),
        expires_at: Set(claims.expires_at().unwrap_or_else(far_future)),
        revoked_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    revoked_tokens::Entity::insert(revoked)
        .on_conflict(
            OnConflict::column(revoked_tokens::Column::Jti)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(true)
}

pub async fn is_token_revoked<C>(db: &C, jti: &str) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let count = revoked_tokens::Entity::find()
        .filter(revoked_tokens::Column::Jti.eq(jti))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Drops revocation records whose token has expired anyway.
pub async fn purge_expired_tokens<C>(db: &C) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let result = revoked_tokens::Entity::delete_many()
        .filter(revoked_tokens::Column::ExpiresAt.lt(Utc::now().naive_utc()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
