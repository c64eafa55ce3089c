//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{Role, User};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, first_name, last_name, email, phone, role, created_at";

/// Validated registration data with the password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    /// Normalized (trimmed, lowercased)
    pub email: String,
    pub hash_pass: String,
    pub phone: String,
    pub role: Role,
}

/// User row including the password hash, for login only
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    #[sqlx(flatten)]
    pub user: User,
    pub hash_pass: String,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_credentials(
    pool: &SqlitePool,
    email: &str,
) -> RepoResult<Option<UserCredentials>> {
    let row = sqlx::query_as::<_, UserCredentials>(&format!(
        "SELECT {COLUMNS}, hash_pass FROM users WHERE email = ? LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Insert a user; a taken email surfaces as [`RepoError::Duplicate`]
pub async fn create(pool: &SqlitePool, data: NewUser) -> RepoResult<User> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO users (id, first_name, last_name, email, hash_pass, phone, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.hash_pass)
    .bind(&data.phone)
    .bind(data.role)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("Email {} already exists", data.email)),
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            hash_pass: "$argon2id$fake".into(),
            phone: "555-0100".into(),
            role,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_support::pool().await;
        let user = create(&pool, new_user("ada@example.com", Role::Admin))
            .await
            .unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, Role::Admin);

        let found = find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(found, user);

        let creds = find_credentials(&pool, "ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.user.id, user.id);
        assert_eq!(creds.hash_pass, "$argon2id$fake");
        assert!(email_exists(&pool, "ada@example.com").await.unwrap());
        assert!(!email_exists(&pool, "bob@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let pool = test_support::pool().await;
        create(&pool, new_user("ada@example.com", Role::Customer))
            .await
            .unwrap();
        let err = create(&pool, new_user("ada@example.com", Role::Customer))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
