// Rust guideline compliant 2026-10-14

//! Implementation of the `ldm update` command.
//!
//! Edits lead fields and optionally moves the lead to a new status. The
//! status change is checked against the transition table and the whole
//! write is discarded if another writer changed the lead first.

use crate::commands::{resolve_id, CommandContext};
use anyhow::{bail, Result};
use leads_app::{parse_result, parse_role, parse_status, update_lead, LeadUpdate};

/// Raw field values accepted by `ldm update`.
#[derive(Debug, Clone, Default)]
pub struct UpdateArgs {
    pub id: String,
    pub name: Option<String>,
    pub area: Option<String>,
    pub budget: Option<String>,
    pub role: Option<String>,
    pub result: Option<String>,
    pub status: Option<String>,
}

impl UpdateArgs {
    fn to_update(&self) -> Result<LeadUpdate> {
        Ok(LeadUpdate {
            name: self.name.clone(),
            area: self.area.clone(),
            budget: self.budget.clone(),
            role: self.role.as_deref().map(parse_role).transpose()?,
            result: self.result.as_deref().map(parse_result).transpose()?,
            status: self.status.as_deref().map(parse_status).transpose()?,
        })
    }
}

/// Updates a lead.
///
/// # Errors
///
/// Returns an error if:
/// - No field was given
/// - A role, result, or status value is unknown
/// - The lead cannot be resolved
/// - The status change is not allowed
/// - The lead changed status while the update was in flight
pub fn execute(args: UpdateArgs, ctx: &CommandContext) -> Result<()> {
    let update = args.to_update()?;
    if update.is_empty() {
        bail!(leads_app::AppError::InvalidInput(
            "Nothing to update. Pass at least one field.".to_string()
        ));
    }

    let repo = ctx.repo()?;
    let leads = repo.open_leads()?;
    let full_id = resolve_id(&leads, &args.id)?;
    let lead = update_lead(&leads, &full_id, &update)?;

    ctx.emit(
        &format!("Updated lead {}", lead.id),
        &lead,
        &ctx.formatter.format_lead(&lead, &[]),
    )
}
