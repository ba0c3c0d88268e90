// Rust guideline compliant 2026-10-14

//! Sample data for trying out the dialer.

use crate::error::{AppError, Result};
use leads_core::{identity, CallAttempt, Lead, LeadSource, Storage};
use serde::Serialize;
use std::collections::HashSet;

/// (phone, name, source, area, budget)
const SAMPLES: [(&str, &str, LeadSource, &str, Option<&str>); 5] = [
    (
        "+92-300-1234567",
        "Ahmed Khan",
        LeadSource::New,
        "DHA Lahore",
        Some("1.2 - 1.5 Crore PKR"),
    ),
    (
        "+92-321-9876543",
        "Fatima Sheikh",
        LeadSource::Old,
        "Gulshan Iqbal, Karachi",
        Some("80 Lac - 1 Crore PKR"),
    ),
    (
        "+92-333-5555444",
        "Ali Hassan",
        LeadSource::New,
        "F-7, Islamabad",
        Some("50,000 - 80,000 PKR/month"),
    ),
    (
        "+92-345-6789012",
        "Sana Malik",
        LeadSource::New,
        "Cantt Area, Rawalpindi",
        None,
    ),
    (
        "+92-312-8888777",
        "Muhammad Usman",
        LeadSource::Old,
        "Johar Town, Lahore",
        None,
    ),
];

/// Counts of records removed by [`clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClearSummary {
    /// Leads deleted.
    pub leads_deleted: usize,
    /// Call attempts deleted.
    pub calls_deleted: usize,
}

/// Builds the sample leads, all pending with no call history.
pub fn sample_leads() -> Vec<Lead> {
    let mut seen = HashSet::new();
    SAMPLES
        .iter()
        .map(|(phone, name, source, area, budget)| {
            let mut lead = Lead::new((*phone).to_string(), *source);
            lead.name = Some((*name).to_string());
            lead.area = Some((*area).to_string());
            lead.budget = budget.map(str::to_string);

            let mut nonce = 0u32;
            while !seen.insert(lead.id.clone()) {
                nonce = nonce.saturating_add(1);
                lead.id = identity::generate_id(
                    identity::LEAD_PREFIX,
                    &[lead.normalized_phone().as_str(), lead.source.as_str()],
                    lead.created_at,
                    nonce,
                );
            }
            lead
        })
        .collect()
}

/// Writes the sample leads into an empty store.
///
/// # Returns
///
/// The leads that were written.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if the store already holds leads, or
/// an error if the file cannot be written.
pub fn seed(storage: &Storage<Lead>) -> Result<Vec<Lead>> {
    let leads = storage.with_lock(|storage| {
        let existing = storage.load_all()?.len();
        if existing > 0 {
            return Ok(Err(existing));
        }
        let leads = sample_leads();
        storage.save_all(&leads)?;
        Ok(Ok(leads))
    })?;

    match leads {
        Ok(leads) => {
            tracing::info!(count = leads.len(), "seeded sample leads");
            Ok(leads)
        }
        Err(existing) => Err(AppError::InvalidInput(format!(
            "Store already has {} leads. Clear it first to reseed.",
            existing
        ))),
    }
}

/// Deletes every lead and call attempt.
///
/// # Errors
///
/// Returns an error if either file cannot be read or written.
pub fn clear(leads: &Storage<Lead>, calls: &Storage<CallAttempt>) -> Result<ClearSummary> {
    let leads_deleted = leads.with_lock(|storage| {
        let count = storage.load_all()?.len();
        storage.save_all(&[])?;
        Ok(count)
    })?;
    let calls_deleted = calls.with_lock(|storage| {
        let count = storage.load_all()?.len();
        storage.save_all(&[])?;
        Ok(count)
    })?;

    tracing::info!(leads_deleted, calls_deleted, "cleared lead store");
    Ok(ClearSummary {
        leads_deleted,
        calls_deleted,
    })
}
