use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::config::PasswordConfig;
use crate::error::{Error, Result};

/// Salted password hashing with fixed cost parameters and an optional
/// pepper mixed in as the argon2 secret.
#[derive(Clone)]
pub struct PasswordPolicy {
    pepper: Option<String>,
    params: Params,
}

impl PasswordPolicy {
    pub fn new(config: &PasswordConfig) -> Result<Self> {
        let params = Params::new(config.m_cost, config.t_cost, config.p_cost, None)
            .map_err(|e| Error::PasswordHash(e.to_string()))?;
        Ok(Self {
            pepper: config.pepper.clone(),
            params,
        })
    }

    fn hasher(&self) -> Result<Argon2<'_>> {
        match &self.pepper {
            Some(pepper) => {
                Argon2::new_with_secret(
                    pepper.as_bytes(),
                    Algorithm::Argon2id,
                    Version::V0x13,
                    self.params.clone(),
                )
                .map_err(|e| {
                    error!(error = %e, "argon2 pepper rejected");
                    Error::PasswordHash(e.to_string())
                })
            }
            None => Ok(Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                self.params.clone(),
            )),
        }
    }

    /// Derive a salted hash with a fresh random salt.
    pub fn hash(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher()?
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                Error::PasswordHash(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }

    /// Verify a plaintext against a stored hash. Errors on a malformed
    /// hash string; a clean mismatch is `Ok(false)`.
    pub fn verify(&self, plain: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            Error::PasswordHash(e.to_string())
        })?;
        Ok(self
            .hasher()?
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}
