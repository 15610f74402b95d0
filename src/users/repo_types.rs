use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Persisted user record. Plaintext credentials never appear here; by the
/// time a row exists both hash columns have been populated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub remember_hash: String,
    pub created_at: OffsetDateTime,
}

/// Request-scoped create input. `password` and `remember_token` live only
/// in memory for the duration of the call.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub remember_token: Option<String>,
}

/// Fully transformed row handed to the storage layer for insertion; the
/// id is assigned there.
#[derive(Debug, Clone)]
pub struct InsertUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub remember_hash: String,
}

/// Result of a create: the stored record plus the plaintext remember
/// token the caller needs for its session cookie. The token is not
/// recoverable later; only its keyed hash is stored.
#[derive(Debug, Clone)]
pub struct CreatedUser {
    pub user: User,
    pub remember_token: String,
}
