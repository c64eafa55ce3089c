//! Subscriber Repository

use super::{RepoError, RepoResult};
use shared::models::Subscriber;
use sqlx::SqlitePool;

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Subscriber>> {
    let subscriber = sqlx::query_as::<_, Subscriber>(
        "SELECT id, email, user_id, created_at FROM subscriber WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(subscriber)
}

/// Insert unless the email is already subscribed
///
/// Returns the stored record and whether this call created it. Concurrent
/// calls for the same email still leave exactly one row.
pub async fn subscribe(
    pool: &SqlitePool,
    email: &str,
    user_id: Option<i64>,
) -> RepoResult<(Subscriber, bool)> {
    let result = sqlx::query(
        "INSERT INTO subscriber (id, email, user_id, created_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT (email) DO NOTHING",
    )
    .bind(shared::util::snowflake_id())
    .bind(email)
    .bind(user_id)
    .bind(shared::util::now_millis())
    .execute(pool)
    .await?;

    let created = result.rows_affected() > 0;
    let subscriber = find_by_email(pool, email)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Subscriber {email} vanished after insert")))?;
    Ok((subscriber, created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    #[tokio::test]
    async fn test_subscribe_is_idempotent() {
        let pool = test_support::pool().await;
        let (first, created) = subscribe(&pool, "ada@example.com", None).await.unwrap();
        assert!(created);
        assert_eq!(first.user, None);

        let (second, created) = subscribe(&pool, "ada@example.com", None).await.unwrap();
        assert!(!created);
        assert_eq!(second, first);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriber")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let pool = test_support::pool().await;
        assert!(find_by_email(&pool, "ada@example.com").await.unwrap().is_none());
        subscribe(&pool, "ada@example.com", None).await.unwrap();
        assert!(find_by_email(&pool, "ada@example.com").await.unwrap().is_some());
    }
}
