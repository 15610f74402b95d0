use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::hash::KeyedHasher;
use crate::password::PasswordPolicy;
use crate::token;
use crate::users::repo::UserStore;
use crate::users::repo_types::{CreatedUser, InsertUser, NewUser, User};

/// Validation layer over a `UserStore`. Runs ordered checks and
/// transformations, then delegates; the first failure short-circuits.
/// Plaintext credentials never pass this layer: by the time storage is
/// called, `password` and `remember_token` have been replaced by their
/// hashes.
#[derive(Clone)]
pub struct UserValidator {
    store: Arc<dyn UserStore>,
    hmac: KeyedHasher,
    passwords: PasswordPolicy,
}

impl UserValidator {
    pub fn new(store: Arc<dyn UserStore>, hmac: KeyedHasher, passwords: PasswordPolicy) -> Self {
        Self {
            store,
            hmac,
            passwords,
        }
    }

    pub async fn by_id(&self, id: i64) -> Result<User> {
        if id == 0 {
            return Err(Error::InvalidId);
        }
        self.store.by_id(id).await
    }

    pub async fn by_email(&self, email: &str) -> Result<User> {
        self.store.by_email(email).await
    }

    /// Look a user up by presented plaintext remember token. Only the
    /// keyed hash is ever compared; the token itself never reaches
    /// storage.
    pub async fn by_remember(&self, token: &str) -> Result<User> {
        let remember_hash = self.hmac.hash(token);
        self.store.by_remember_hash(&remember_hash).await
    }

    pub async fn all(&self) -> Result<Vec<User>> {
        self.store.all().await
    }

    /// Hash the password, ensure a remember token exists, hash it, then
    /// insert. An empty plaintext password skips hashing and leaves the
    /// stored hash empty.
    pub async fn create(&self, new: NewUser) -> Result<CreatedUser> {
        let NewUser {
            name,
            email,
            password,
            remember_token,
        } = new;

        let password_hash = if password.is_empty() {
            String::new()
        } else {
            self.passwords.hash(&password)?
        };

        let remember_token = match remember_token {
            Some(token) if !token.is_empty() => token,
            _ => token::remember_token(),
        };
        let remember_hash = self.hmac.hash(&remember_token);

        let user = self
            .store
            .create(&InsertUser {
                name,
                email,
                password_hash,
                remember_hash,
            })
            .await?;
        debug!(user_id = user.id, "user created");
        Ok(CreatedUser {
            user,
            remember_token,
        })
    }

    /// Persist the record. A non-empty `remember_token` recomputes
    /// `remember_hash` first, keeping the stored hash in sync with
    /// whatever plaintext the caller supplied.
    pub async fn update(&self, user: &mut User, remember_token: Option<&str>) -> Result<()> {
        if let Some(token) = remember_token.filter(|t| !t.is_empty()) {
            user.remember_hash = self.hmac.hash(token);
        }
        self.store.update(user).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if id == 0 {
            return Err(Error::InvalidId);
        }
        self.store.delete(id).await
    }

    pub async fn destructive_reset(&self) -> Result<()> {
        self.store.destructive_reset().await
    }

    pub async fn close(&self) -> Result<()> {
        self.store.close().await
    }
}
