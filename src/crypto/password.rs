//! Password hashing using Argon2id
//!
//! Hashes are stored as PHC strings, which carry their own salt and
//! parameters, so verification needs nothing but the stored string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{FinanceError, FinanceResult};

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Iterations
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_cost: 19456, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl HashParams {
    fn hasher(&self) -> FinanceResult<Argon2<'static>> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|e| FinanceError::Config(format!("Invalid Argon2 params: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> FinanceResult<String> {
    hash_password_with(password, &HashParams::default())
}

pub fn hash_password_with(password: &str, params: &HashParams) -> FinanceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = params
        .hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| FinanceError::Storage(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC string
///
/// A mismatch is `Ok(false)`; only an unparseable stored hash is an error.
pub fn verify_password(password: &str, stored: &str) -> FinanceResult<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| FinanceError::Corrupt(format!("Stored password hash is invalid: {}", e)))?;

    // Cost parameters are read from the PHC string itself
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
