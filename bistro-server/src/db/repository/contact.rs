//! Contact Repository

use super::{RepoError, RepoResult};
use shared::models::{Contact, ContactSubject};
use sqlx::SqlitePool;

/// Validated contact message
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
}

pub async fn create(pool: &SqlitePool, data: NewContact) -> RepoResult<Contact> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO contact (id, name, email, subject, message, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(data.subject)
    .bind(&data.message)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create contact".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Contact>> {
    let contact = sqlx::query_as::<_, Contact>(
        "SELECT id, name, email, subject, message, created_at FROM contact WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(contact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    #[tokio::test]
    async fn test_create() {
        let pool = test_support::pool().await;
        let contact = create(
            &pool,
            NewContact {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                subject: ContactSubject::Catering,
                message: "Party of 40 next Friday".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(contact.subject, ContactSubject::Catering);

        let found = find_by_id(&pool, contact.id).await.unwrap().unwrap();
        assert_eq!(found, contact);
    }

    #[tokio::test]
    async fn test_message_length_enforced_by_schema() {
        let pool = test_support::pool().await;
        let err = create(
            &pool,
            NewContact {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                subject: ContactSubject::General,
                message: "x".repeat(501),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Database(_)));
    }
}
