// Rust guideline compliant 2026-10-14

//! Implementation of the `ldm create` command.
//!
//! Adds a pending lead. Phone numbers are unique by their normalized form.

use crate::commands::CommandContext;
use anyhow::Result;
use leads_app::parse_source;
use leads_core::Lead;

/// Fields accepted by `ldm create`.
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Contact phone number.
    pub phone: String,
    /// Contact name.
    pub name: Option<String>,
    /// Area of interest.
    pub area: Option<String>,
    /// Budget description.
    pub budget: Option<String>,
    /// `new` or `old`; the configured default when absent.
    pub source: Option<String>,
}

/// Creates a new lead.
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The phone number or source is invalid
/// - Another lead already has this phone number
pub fn execute(args: CreateArgs, ctx: &CommandContext) -> Result<()> {
    let repo = ctx.repo()?;
    let config = repo.load_config()?;
    let source = match args.source.as_deref() {
        Some(value) => parse_source(value)?,
        None => config.default_source,
    };

    let mut lead = Lead::new(args.phone, source);
    lead.name = args.name;
    lead.area = args.area;
    lead.budget = args.budget;

    let storage = repo.open_leads()?;
    let lead = storage.insert(&lead)?;
    tracing::info!(lead_id = %lead.id, source = %lead.source, "lead created");

    ctx.emit(
        &format!("Created lead {}", lead.id),
        &lead,
        &ctx.formatter.format_lead(&lead, &[]),
    )
}
