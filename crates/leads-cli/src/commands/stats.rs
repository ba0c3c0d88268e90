// Rust guideline compliant 2026-10-14

//! Implementation of the `ldm stats` command.

use crate::commands::CommandContext;
use anyhow::Result;
use leads_core::LeadStats;

/// Prints lead counts by status and result.
///
/// # Errors
///
/// Returns an error if the repository is missing or unreadable.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let leads = ctx.repo()?.open_leads()?.load_all()?;
    let stats = LeadStats::from_leads(&leads);
    println!("{}", ctx.formatter.format_stats(&stats));
    Ok(())
}
