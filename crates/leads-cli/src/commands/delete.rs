// Rust guideline compliant 2026-10-14

//! Implementation of the `ldm delete` command.

use crate::commands::{resolve_id, CommandContext};
use anyhow::Result;
use serde_json::json;

/// Deletes a lead and its call attempts.
///
/// # Errors
///
/// Returns an error if the lead cannot be resolved or the files cannot be
/// written.
pub fn execute(id: String, ctx: &CommandContext) -> Result<()> {
    let repo = ctx.repo()?;
    let leads = repo.open_leads()?;
    let full_id = resolve_id(&leads, &id)?;
    leads.delete(&full_id)?;

    let calls_deleted = repo.open_calls()?.with_lock(|calls| {
        let mut attempts = calls.load_all()?;
        let before = attempts.len();
        attempts.retain(|attempt| attempt.lead_id != full_id);
        let removed = before - attempts.len();
        if removed > 0 {
            calls.save_all(&attempts)?;
        }
        Ok(removed)
    })?;
    tracing::info!(lead_id = %full_id, calls_deleted, "lead deleted");

    ctx.emit(
        &format!("Deleted lead {}", full_id),
        &json!({ "id": full_id, "calls_deleted": calls_deleted }),
        "",
    )
}
