// Rust guideline compliant 2026-10-14

//! Implementation of the `ldm seed` command.

use crate::commands::CommandContext;
use anyhow::Result;

/// Loads the sample leads, or with `clear` deletes every lead and call.
///
/// # Errors
///
/// Returns an error if the repository is missing, seeding finds existing
/// leads, or the files cannot be written.
pub fn execute(clear: bool, ctx: &CommandContext) -> Result<()> {
    let repo = ctx.repo()?;
    let leads = repo.open_leads()?;

    if clear {
        let summary = leads_app::clear(&leads, &repo.open_calls()?)?;
        return ctx.emit(
            &format!(
                "Deleted {} leads and {} call attempts",
                summary.leads_deleted, summary.calls_deleted
            ),
            &summary,
            "",
        );
    }

    let seeded = leads_app::seed(&leads)?;
    let details = seeded
        .iter()
        .map(|lead| {
            format!(
                "  - {} {} ({})",
                lead.id,
                lead.phone,
                lead.name.as_deref().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    ctx.emit(
        &format!("Created {} sample leads", seeded.len()),
        &seeded,
        &details,
    )
}
