// Rust guideline compliant 2026-10-14

//! Lead ID resolution.

use crate::error::Result;
use leads_core::{identity, Lead};

/// Resolves a partial lead ID to its canonical full ID.
///
/// # Arguments
///
/// * `partial` - Full ID, hash without the `lead-` prefix, or a unique prefix
/// * `leads` - Leads to match against
///
/// # Errors
///
/// Returns an error if the partial ID is too short, ambiguous, or not found.
pub fn resolve_lead_id(partial: &str, leads: &[Lead]) -> Result<String> {
    Ok(identity::resolve_partial_id(
        partial,
        identity::LEAD_PREFIX,
        leads.iter().map(|lead| lead.id.as_str()),
    )?)
}
