use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{AppConfig, PasswordConfig};
use crate::db;
use crate::error::{Error, Result};
use crate::hash::KeyedHasher;
use crate::password::PasswordPolicy;
use crate::users::repo::{PgUserStore, UserStore};
use crate::users::repo_types::{CreatedUser, NewUser, User};
use crate::users::validator::UserValidator;

/// Service facade over the validation layer. Everything is straight
/// delegation except `authenticate`.
#[derive(Clone)]
pub struct UserService {
    users: UserValidator,
    passwords: PasswordPolicy,
}

impl UserService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hmac_secret: &str,
        password: &PasswordConfig,
    ) -> Result<Self> {
        let passwords = PasswordPolicy::new(password)?;
        let users = UserValidator::new(store, KeyedHasher::new(hmac_secret), passwords.clone());
        Ok(Self { users, passwords })
    }

    pub fn from_config(store: Arc<dyn UserStore>, config: &AppConfig) -> Result<Self> {
        Self::new(store, &config.hmac_secret, &config.password)
    }

    /// Open a Postgres pool from config and wire the full layer stack.
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(config).await?;
        let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
        Ok(Self::from_config(store, config)?)
    }

    pub async fn by_id(&self, id: i64) -> Result<User> {
        self.users.by_id(id).await
    }

    pub async fn by_email(&self, email: &str) -> Result<User> {
        self.users.by_email(email).await
    }

    pub async fn by_remember(&self, token: &str) -> Result<User> {
        self.users.by_remember(token).await
    }

    pub async fn all(&self) -> Result<Vec<User>> {
        self.users.all().await
    }

    pub async fn create(&self, new: NewUser) -> Result<CreatedUser> {
        self.users.create(new).await
    }

    pub async fn update(&self, user: &mut User, remember_token: Option<&str>) -> Result<()> {
        self.users.update(user, remember_token).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.users.delete(id).await
    }

    pub async fn destructive_reset(&self) -> Result<()> {
        self.users.destructive_reset().await
    }

    pub async fn close(&self) -> Result<()> {
        self.users.close().await
    }

    /// Verify an email/password pair and return the matching user.
    ///
    /// The empty-password check runs before any lookup so an obviously
    /// invalid request costs no database round-trip. A failed email
    /// lookup surfaces as `UserNotFound`, distinct from the generic
    /// `NotFound`. A mismatch, or a stored hash that does not parse,
    /// surfaces as `InvalidPassword`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        if password.is_empty() {
            return Err(Error::PasswordMissing);
        }

        let user = match self.users.by_email(email).await {
            Ok(user) => user,
            Err(Error::NotFound) => {
                debug!(email, "authentication failed: unknown email");
                return Err(Error::UserNotFound);
            }
            Err(err) => return Err(err),
        };

        match self.passwords.verify(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) | Err(_) => {
                warn!(user_id = user.id, "authentication failed: password mismatch");
                Err(Error::InvalidPassword)
            }
        }
    }
}
