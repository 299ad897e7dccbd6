//! Credential hashing
//!
//! User passwords are hashed with Argon2id before they are stored.

pub mod password;

pub use password::{hash_password, hash_password_with, verify_password, HashParams};
