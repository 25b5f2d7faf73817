use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// User record in the credential store. `id` is the internal key and never
/// leaves the process; `user_id` is the externally-visible identifier.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_user_name(db: &PgPool, user_name: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_id, user_name, email, phone_number, password_hash,
                   created_at, updated_at
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(db)
        .await
    }

    /// Advisory duplicate check before insert. The unique indexes remain the
    /// authoritative guard; a concurrent insert can still win the race.
    pub async fn identity_taken(db: &PgPool, user_name: &str, email: &str) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users WHERE user_name = $1 OR email = $2
            )
            "#,
        )
        .bind(user_name)
        .bind(email)
        .fetch_one(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        user_id: &str,
        user_name: &str,
        email: &str,
        phone_number: Option<&str>,
        password_hash: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, user_name, email, phone_number, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, user_name, email, phone_number, password_hash,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(user_name)
        .bind(email)
        .bind(phone_number)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}
