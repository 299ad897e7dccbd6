//! Identity service
//!
//! Registration, password checks and profile maintenance. All users live in
//! one global blob keyed by username.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::json;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::crypto::{hash_password_with, verify_password, HashParams};
use crate::error::{FinanceError, FinanceResult};
use crate::models::User;
use crate::storage::{load_blob, save_blob, BlobKey, BlobKind, SharedStore};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Usernames become part of blob file names
const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_.-]+$";

pub const MIN_PASSWORD_LEN: usize = 8;

/// Partial replacement of a user's profile
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Merged into the existing preferences
    pub preferences: Option<BTreeMap<String, String>>,
}

/// Write-through store of registered users
pub struct IdentityStore {
    store: SharedStore,
    key: BlobKey,
    users: BTreeMap<String, User>,
    email_pattern: Regex,
    username_pattern: Regex,
    hash_params: HashParams,
    audit: Option<AuditLogger>,
}

impl IdentityStore {
    pub fn open(store: SharedStore) -> FinanceResult<Self> {
        let key = BlobKey::global(BlobKind::Users);
        let users: BTreeMap<String, User> = load_blob(store.as_ref(), &key)?;
        tracing::debug!(count = users.len(), "identity store opened");

        Ok(Self {
            store,
            key,
            users,
            email_pattern: compile(EMAIL_PATTERN)?,
            username_pattern: compile(USERNAME_PATTERN)?,
            hash_params: HashParams::default(),
            audit: None,
        })
    }

    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Override the Argon2 cost used for new hashes
    pub fn with_hash_params(mut self, params: HashParams) -> Self {
        self.hash_params = params;
        self
    }

    /// Register a new user
    pub fn register(&mut self, username: &str, password: &str, email: &str) -> FinanceResult<()> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || password.is_empty() || email.is_empty() {
            return Err(FinanceError::Validation(
                "Username, password, and email cannot be empty".into(),
            ));
        }
        if self.users.contains_key(username) {
            return Err(FinanceError::Duplicate {
                entity_type: "User",
                identifier: username.to_string(),
            });
        }
        self.validate_email(email)?;
        validate_password(password)?;
        if !self.username_pattern.is_match(username) {
            return Err(FinanceError::Validation(format!(
                "Invalid username '{}'. Use letters, digits, '_', '.' or '-'",
                username
            )));
        }

        let hash = hash_password_with(password, &self.hash_params)?;
        let user = User::new(username, hash, email);

        let mut next = self.users.clone();
        next.insert(user.username.clone(), user.clone());
        self.commit(next)?;

        self.audit(AuditEntry::create(
            username,
            EntityType::User,
            username,
            &public_view(&user),
        ));
        Ok(())
    }

    /// `true` when the user exists and the password matches
    pub fn authenticate(&self, username: &str, password: &str) -> FinanceResult<bool> {
        match self.users.get(username.trim()) {
            Some(user) => verify_password(password, &user.password_hash),
            None => Ok(false),
        }
    }

    /// Apply a partial profile update; `false` for an unknown user
    pub fn update(&mut self, username: &str, update: UserUpdate) -> FinanceResult<bool> {
        let username = username.trim();
        let Some(before) = self.users.get(username).cloned() else {
            return Ok(false);
        };

        let email = update.email.map(|e| e.trim().to_string());
        if let Some(email) = &email {
            self.validate_email(email)?;
        }
        if let Some(password) = &update.password {
            validate_password(password)?;
        }

        let mut after = before.clone();
        if let Some(email) = email {
            after.email = email;
        }
        if let Some(password) = &update.password {
            after.password_hash = hash_password_with(password, &self.hash_params)?;
        }
        if let Some(preferences) = update.preferences {
            after.preferences.extend(preferences);
        }

        let mut next = self.users.clone();
        next.insert(username.to_string(), after.clone());
        self.commit(next)?;

        self.audit(AuditEntry::update(
            username,
            EntityType::User,
            username,
            &public_view(&before),
            &public_view(&after),
        ));
        Ok(true)
    }

    /// Remove a user; `false` if unknown
    ///
    /// The user's ledgers and budgets are left in place.
    pub fn delete(&mut self, username: &str) -> FinanceResult<bool> {
        let username = username.trim();
        let mut next = self.users.clone();
        let Some(removed) = next.remove(username) else {
            return Ok(false);
        };
        self.commit(next)?;

        self.audit(AuditEntry::delete(
            username,
            EntityType::User,
            username,
            &public_view(&removed),
        ));
        Ok(true)
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username.trim())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn validate_email(&self, email: &str) -> FinanceResult<()> {
        if self.email_pattern.is_match(email) {
            Ok(())
        } else {
            Err(FinanceError::Validation("Invalid email format".into()))
        }
    }

    fn commit(&mut self, next: BTreeMap<String, User>) -> FinanceResult<()> {
        save_blob(self.store.as_ref(), &self.key, &next)?;
        self.users = next;
        Ok(())
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            logger.record(entry);
        }
    }
}

fn validate_password(password: &str) -> FinanceResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FinanceError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn compile(pattern: &str) -> FinanceResult<Regex> {
    Regex::new(pattern).map_err(|e| FinanceError::Config(format!("Bad pattern {}: {}", pattern, e)))
}

/// Audit snapshot without the password hash
fn public_view(user: &User) -> serde_json::Value {
    json!({
        "username": user.username,
        "email": user.email,
        "created_at": user.created_at,
        "preferences": user.preferences,
    })
}
