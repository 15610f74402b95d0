//! In-memory `UserStore` double for exercising the validation and
//! service layers without Postgres.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::config::PasswordConfig;
use crate::error::{Error, Result};
use crate::hash::KeyedHasher;
use crate::password::PasswordPolicy;
use crate::users::repo::UserStore;
use crate::users::repo_types::{InsertUser, NewUser, User};
use crate::users::services::UserService;
use crate::users::validator::UserValidator;

#[derive(Default)]
pub(crate) struct MemStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
    calls: AtomicUsize,
}

impl MemStore {
    pub(crate) fn get(&self, id: i64) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Number of storage operations reached, for asserting that a check
    /// short-circuited before the store.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn unique_violation(constraint: &str) -> Error {
        Error::Storage(sqlx::Error::Protocol(format!(
            "duplicate key value violates unique constraint \"{constraint}\""
        )))
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn by_id(&self, id: i64) -> Result<User> {
        self.touch();
        self.get(id).ok_or(Error::NotFound)
    }

    async fn by_email(&self, email: &str) -> Result<User> {
        self.touch();
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn by_remember_hash(&self, remember_hash: &str) -> Result<User> {
        self.touch();
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.remember_hash == remember_hash)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn all(&self) -> Result<Vec<User>> {
        self.touch();
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create(&self, user: &InsertUser) -> Result<User> {
        self.touch();
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(Self::unique_violation("users_email_key"));
        }
        if users.iter().any(|u| u.remember_hash == user.remember_hash) {
            return Err(Self::unique_violation("users_remember_hash_key"));
        }
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            remember_hash: user.remember_hash.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<()> {
        self.touch();
        let mut users = self.users.lock().unwrap();
        if let Some(row) = users.iter_mut().find(|u| u.id == user.id) {
            *row = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.touch();
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }

    async fn destructive_reset(&self) -> Result<()> {
        self.touch();
        self.users.lock().unwrap().clear();
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Cheap argon2 parameters so the suite stays fast.
fn test_password_config() -> PasswordConfig {
    PasswordConfig {
        pepper: None,
        m_cost: 1024,
        t_cost: 1,
        p_cost: 1,
    }
}

pub(crate) fn mem_validator() -> (UserValidator, Arc<MemStore>) {
    let store = Arc::new(MemStore::default());
    let validator = UserValidator::new(
        store.clone(),
        KeyedHasher::new("test-hmac-secret"),
        PasswordPolicy::new(&test_password_config()).expect("test policy should build"),
    );
    (validator, store)
}

pub(crate) fn mem_service() -> (UserService, Arc<MemStore>) {
    let store = Arc::new(MemStore::default());
    let service = UserService::new(store.clone(), "test-hmac-secret", &test_password_config())
        .expect("test service should build");
    (service, store)
}

pub(crate) fn new_user(email: &str, password: &str) -> NewUser {
    NewUser {
        name: "Michael".into(),
        email: email.into(),
        password: password.into(),
        remember_token: None,
    }
}

pub(crate) fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
