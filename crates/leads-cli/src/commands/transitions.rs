// Rust guideline compliant 2026-10-14

//! Implementation of the `ldm transitions` command.
//!
//! Prints the transition table, or one row of it. Needs no repository.

use crate::commands::CommandContext;
use crate::output::TransitionRow;
use anyhow::Result;
use leads_app::parse_status;
use leads_core::LeadStatus;

/// Prints legal transitions for one status or for all of them.
///
/// # Errors
///
/// Returns an error if `status` is not a known status.
pub fn execute(status: Option<String>, ctx: &CommandContext) -> Result<()> {
    let rows: Vec<TransitionRow> = match status {
        Some(value) => {
            let status = parse_status(&value)?;
            vec![(status, status.valid_transitions())]
        }
        None => LeadStatus::ALL
            .into_iter()
            .map(|status| (status, status.valid_transitions()))
            .collect(),
    };

    println!("{}", ctx.formatter.format_transitions(&rows));
    Ok(())
}
