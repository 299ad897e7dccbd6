//! Audit history command

use super::CliContext;
use crate::error::FinanceResult;

/// Print the user's most recent audit entries, oldest first
pub fn handle_history_command(ctx: &CliContext, user_id: &str, limit: usize) -> FinanceResult<()> {
    let entries = ctx.audit.read_recent_for(user_id, limit)?;

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
