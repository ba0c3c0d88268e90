// Rust guideline compliant 2026-10-14

//! Implementation of the `ldm show` command.
//!
//! Displays a lead, its call attempts, and the statuses it may move to next.

use crate::commands::{resolve_id, CommandContext};
use anyhow::Result;

/// Shows a lead by full or partial ID.
///
/// # Errors
///
/// Returns an error if the repository is missing or the ID does not
/// resolve to exactly one lead.
pub fn execute(id: String, ctx: &CommandContext) -> Result<()> {
    let repo = ctx.repo()?;
    let leads = repo.open_leads()?;
    let full_id = resolve_id(&leads, &id)?;
    let lead = leads.load_by_id(&full_id)?;
    let attempts = repo.open_calls()?.for_lead(&lead.id)?;

    println!("{}", ctx.formatter.format_lead(&lead, &attempts));
    Ok(())
}
