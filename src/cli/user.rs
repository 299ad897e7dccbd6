//! Account CLI commands: registration, profile, password prompts

use std::collections::BTreeMap;

use clap::Subcommand;
use zeroize::Zeroizing;

use super::CliContext;
use crate::error::{FinanceError, FinanceResult};
use crate::services::UserUpdate;

/// User profile subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Show the profile
    Show,
    /// Update the profile
    Update {
        #[arg(short, long)]
        email: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        change_password: bool,
        /// Set a preference, e.g. --pref currency=EUR (repeatable)
        #[arg(long = "pref", value_parser = parse_preference)]
        preferences: Vec<(String, String)>,
    },
    /// Delete the account; ledgers and budgets stay on disk
    Delete {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Use the given password, or prompt for one without echo
pub fn password_or_prompt(given: Option<String>, prompt: &str) -> FinanceResult<Zeroizing<String>> {
    match given {
        Some(password) => Ok(Zeroizing::new(password)),
        None => prompt_password(prompt),
    }
}

/// Handle `register`; prompts twice when no password was given
pub fn handle_register_command(
    ctx: &CliContext,
    username: &str,
    email: &str,
    password: Option<String>,
) -> FinanceResult<()> {
    let password = match password {
        Some(password) => Zeroizing::new(password),
        None => prompt_new_password()?,
    };

    ctx.identities()?.register(username, &password, email)?;
    println!("User '{}' registered.", username.trim());
    Ok(())
}

/// Handle a profile command for the authenticated `user_id`
pub fn handle_user_command(ctx: &CliContext, user_id: &str, cmd: UserCommands) -> FinanceResult<()> {
    let mut identities = ctx.identities()?;

    match cmd {
        UserCommands::Show => {
            let user = identities
                .get(user_id)
                .ok_or_else(|| FinanceError::user_not_found(user_id))?;

            println!("User:    {}", user.username);
            println!("Email:   {}", user.email);
            println!("Created: {}", user.created_at);
            if !user.preferences.is_empty() {
                println!("\nPreferences:");
                for (key, value) in &user.preferences {
                    println!("  {:<12} {}", key, value);
                }
            }
        }

        UserCommands::Update {
            email,
            change_password,
            preferences,
        } => {
            let password = if change_password {
                Some(prompt_new_password()?)
            } else {
                None
            };
            let update = UserUpdate {
                email,
                password: password.as_ref().map(|p| p.as_str().to_string()),
                preferences: if preferences.is_empty() {
                    None
                } else {
                    Some(preferences.into_iter().collect::<BTreeMap<_, _>>())
                },
            };

            if !identities.update(user_id, update)? {
                return Err(FinanceError::user_not_found(user_id));
            }
            println!("Profile updated.");
        }

        UserCommands::Delete { force } => {
            if !force {
                println!("This removes the account '{}'. Re-run with --force to confirm.", user_id);
                return Ok(());
            }
            if !identities.delete(user_id)? {
                return Err(FinanceError::user_not_found(user_id));
            }
            println!("User '{}' deleted.", user_id);
        }
    }

    Ok(())
}

fn parse_preference(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

fn prompt_new_password() -> FinanceResult<Zeroizing<String>> {
    let first = prompt_password("New password: ")?;
    let second = prompt_password("Confirm password: ")?;
    if *first != *second {
        return Err(FinanceError::Validation("Passwords do not match".into()));
    }
    Ok(first)
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> FinanceResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| FinanceError::Io(format!("Failed to read password: {}", e)))
}
