//! User profile model

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A registered user
///
/// `password_hash` holds an Argon2id PHC string, never the password itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    /// `YYYY-MM-DD HH:MM:SS`, local time
    pub created_at: String,
    #[serde(default = "default_preferences")]
    pub preferences: BTreeMap<String, String>,
}

impl User {
    pub fn new(username: &str, password_hash: String, email: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password_hash,
            email: email.trim().to_string(),
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            preferences: default_preferences(),
        }
    }
}

pub fn default_preferences() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("currency".to_string(), "USD".to_string()),
        ("language".to_string(), "en".to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_default_preferences() {
        let user = User::new(" alice ", "hash".into(), "alice@example.com ");
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.preferences["currency"], "USD");
        assert_eq!(user.preferences["language"], "en");
        assert_eq!(user.created_at.len(), 19);
    }
}
