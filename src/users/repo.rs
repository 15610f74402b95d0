use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::error::{Error, Result};
use crate::users::repo_types::{InsertUser, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, remember_hash, created_at";

/// Storage contract for the users table. No business rules live behind
/// this trait; validation and hashing happen in the layer above.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn by_id(&self, id: i64) -> Result<User>;
    async fn by_email(&self, email: &str) -> Result<User>;
    async fn by_remember_hash(&self, remember_hash: &str) -> Result<User>;
    async fn all(&self) -> Result<Vec<User>>;
    async fn create(&self, user: &InsertUser) -> Result<User>;
    async fn update(&self, user: &User) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
    /// Drop and recreate the table. Test/bootstrap environments only.
    async fn destructive_reset(&self) -> Result<()>;
    async fn close(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map "row absent" to the domain `NotFound` so callers never see the
/// backend's native not-found signal.
fn one(user: Option<User>) -> Result<User> {
    user.ok_or(Error::NotFound)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn by_id(&self, id: i64) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        one(user)
    }

    async fn by_email(&self, email: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        one(user)
    }

    async fn by_remember_hash(&self, remember_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE remember_hash = $1"
        ))
        .bind(remember_hash)
        .fetch_optional(&self.pool)
        .await?;
        one(user)
    }

    async fn all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn create(&self, user: &InsertUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, remember_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.remember_hash)
        .fetch_one(&self.pool)
        .await?;
        debug!(user_id = user.id, "user row inserted");
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, password_hash = $4, remember_hash = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.remember_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn destructive_reset(&self) -> Result<()> {
        sqlx::query("DROP TABLE IF EXISTS users")
            .execute(&self.pool)
            .await?;
        sqlx::query(include_str!("../../migrations/0001_create_users.sql"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}
