//! Layered user account store with credential authentication.
//!
//! The `users` module composes three layers: a Postgres-backed storage
//! layer (`UserStore`), a validation layer that hashes credentials and
//! remember tokens before anything reaches storage (`UserValidator`),
//! and a thin service facade that adds `authenticate` (`UserService`).
//! HTTP routing and rendering are a caller concern, not this crate's.

pub mod config;
pub mod db;
pub mod error;
pub mod hash;
pub mod password;
pub mod token;
pub mod users;

pub use error::{Error, Result};
pub use users::repo_types::{CreatedUser, NewUser, User};
pub use users::services::UserService;
