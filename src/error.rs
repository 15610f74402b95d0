use thiserror::Error;

/// Domain errors for the user store.
///
/// Every layer either maps a lower-level failure into one of these kinds
/// or passes it through unchanged; nothing is swallowed or retried.
#[derive(Debug, Error)]
pub enum Error {
    /// No row matched the lookup predicate.
    #[error("resource not found")]
    NotFound,
    /// The reserved zero identifier was passed to a lookup or delete.
    #[error("invalid id provided")]
    InvalidId,
    /// Authentication was attempted with an empty password.
    #[error("password is missing")]
    PasswordMissing,
    /// Authentication could not find a user for the given email.
    #[error("user not found")]
    UserNotFound,
    /// The supplied password does not match the stored hash.
    #[error("invalid password")]
    InvalidPassword,
    /// Password hashing or hash parsing failed.
    #[error("password hash: {0}")]
    PasswordHash(String),
    /// Any unclassified failure from the persistence backend.
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
