// Rust guideline compliant 2026-10-14

//! Status changes and field edits for leads.
//!
//! Every mutation follows the same cycle: read the lead, validate the
//! proposed status against the transition table, then commit through
//! [`Storage::save_if_status`] so a concurrent writer cannot be overwritten.

use crate::error::{AppError, Result};
use leads_core::{Error as CoreError, Lead, LeadResult, LeadRole, LeadStatus, Storage};

/// Field changes requested for a lead. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct LeadUpdate {
    /// New contact name.
    pub name: Option<String>,
    /// New area of interest.
    pub area: Option<String>,
    /// New budget description.
    pub budget: Option<String>,
    /// New role classification.
    pub role: Option<LeadRole>,
    /// New result classification.
    pub result: Option<LeadResult>,
    /// New status, validated against the transition table.
    pub status: Option<LeadStatus>,
}

impl LeadUpdate {
    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.area.is_none()
            && self.budget.is_none()
            && self.role.is_none()
            && self.result.is_none()
            && self.status.is_none()
    }
}

/// Validates a status change, logging rejections.
///
/// # Errors
///
/// Returns the core transition error if `new_status` is not reachable.
pub fn validate_transition(lead: &Lead, new_status: LeadStatus) -> Result<()> {
    if let Err(err) = lead.status.check_transition(new_status) {
        tracing::warn!(
            lead_id = %lead.id,
            from = %err.from,
            to = %err.to,
            "rejected status transition"
        );
        return Err(AppError::Core(CoreError::InvalidTransition(err)));
    }
    Ok(())
}

/// Writes a lead whose status was read as `expected`.
///
/// Logs the committed change at info level and a lost race at warn level.
/// Returns the lead as stored.
pub(crate) fn commit(storage: &Storage<Lead>, lead: &Lead, expected: LeadStatus) -> Result<Lead> {
    match storage.save_if_status(lead, expected) {
        Ok(stored) => {
            if lead.status != expected {
                tracing::info!(
                    lead_id = %lead.id,
                    from = %expected,
                    to = %lead.status,
                    call_attempts = lead.call_attempts,
                    "lead status changed"
                );
            }
            Ok(stored)
        }
        Err(CoreError::StatusConflict {
            id,
            expected,
            actual,
        }) => {
            tracing::warn!(
                lead_id = %id,
                expected = %expected,
                actual = %actual,
                "lead changed by another writer; update discarded"
            );
            Err(AppError::Core(CoreError::StatusConflict {
                id,
                expected,
                actual,
            }))
        }
        Err(err) => Err(err.into()),
    }
}

/// Moves a lead to a new status.
///
/// A request for the status the lead already has is a no-op and returns
/// the lead unchanged without writing.
///
/// # Arguments
///
/// * `storage` - Lead storage
/// * `id` - Full lead ID
/// * `new_status` - Requested status
///
/// # Returns
///
/// The lead as persisted.
///
/// # Errors
///
/// Returns an error if:
/// - The lead does not exist
/// - The transition is not allowed
/// - Another writer changed the status since it was read
pub fn change_status(storage: &Storage<Lead>, id: &str, new_status: LeadStatus) -> Result<Lead> {
    let mut lead = storage.load_by_id(id)?;
    let expected = lead.status;
    if expected == new_status {
        tracing::debug!(lead_id = %lead.id, status = %expected, "status unchanged");
        return Ok(lead);
    }

    validate_transition(&lead, new_status)?;
    lead.status = new_status;
    lead.touch();
    commit(storage, &lead, expected)
}

/// Applies field edits and an optional status change in one conditional write.
///
/// # Errors
///
/// Returns an error if:
/// - The lead does not exist
/// - The requested status is not reachable from the current one
/// - Another writer changed the status since it was read
pub fn update_lead(storage: &Storage<Lead>, id: &str, update: &LeadUpdate) -> Result<Lead> {
    let mut lead = storage.load_by_id(id)?;
    let expected = lead.status;

    if let Some(status) = update.status {
        if status != expected {
            validate_transition(&lead, status)?;
            lead.status = status;
        }
    }
    if let Some(name) = &update.name {
        lead.name = Some(name.clone());
    }
    if let Some(area) = &update.area {
        lead.area = Some(area.clone());
    }
    if let Some(budget) = &update.budget {
        lead.budget = Some(budget.clone());
    }
    if update.role.is_some() {
        lead.role = update.role;
    }
    if update.result.is_some() {
        lead.result = update.result;
    }

    lead.touch();
    commit(storage, &lead, expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leads_core::LeadSource;
    use tempfile::TempDir;

    fn setup(status: LeadStatus) -> (TempDir, Storage<Lead>, Lead) {
        let temp_dir = TempDir::new().expect("temp dir");
        let storage = Storage::new(temp_dir.path().join("leads.jsonl")).expect("storage");
        let mut lead = Lead::new("+923001234567".to_string(), LeadSource::New);
        lead.status = status;
        let lead = storage.insert(&lead).expect("insert");
        (temp_dir, storage, lead)
    }

    #[test]
    fn test_change_status_persists() {
        let (_dir, storage, lead) = setup(LeadStatus::Pending);
        let updated = change_status(&storage, &lead.id, LeadStatus::Dropped).expect("change");
        assert_eq!(updated.status, LeadStatus::Dropped);
        assert_eq!(updated.revision, lead.revision + 1);
        assert_eq!(storage.load_by_id(&lead.id).expect("load"), updated);
    }

    #[test]
    fn test_change_status_same_status_is_noop() {
        let (_dir, storage, lead) = setup(LeadStatus::Qualified);
        let unchanged = change_status(&storage, &lead.id, LeadStatus::Qualified).expect("no-op");
        assert_eq!(unchanged, lead);
    }

    #[test]
    fn test_change_status_rejects_and_leaves_store_untouched() {
        let (_dir, storage, lead) = setup(LeadStatus::Pending);
        let err = change_status(&storage, &lead.id, LeadStatus::Qualified).expect_err("rejected");
        assert!(matches!(
            err,
            AppError::Core(CoreError::InvalidTransition(ref t))
                if t.allowed == vec![LeadStatus::Calling, LeadStatus::Dropped]
        ));
        assert_eq!(storage.load_by_id(&lead.id).expect("load"), lead);
    }

    #[test]
    fn test_update_lead_fields_and_status() {
        let (_dir, storage, lead) = setup(LeadStatus::Answered);
        let update = LeadUpdate {
            name: Some("Ahmed Khan".to_string()),
            role: Some(LeadRole::Buyer),
            result: Some(LeadResult::Warm),
            status: Some(LeadStatus::Qualified),
            ..LeadUpdate::default()
        };
        let updated = update_lead(&storage, &lead.id, &update).expect("update");
        assert_eq!(updated.status, LeadStatus::Qualified);
        assert_eq!(updated.name.as_deref(), Some("Ahmed Khan"));
        assert_eq!(updated.role, Some(LeadRole::Buyer));
        assert_eq!(updated.result, Some(LeadResult::Warm));
    }

    #[test]
    fn test_update_lead_rejected_status_discards_field_edits() {
        let (_dir, storage, lead) = setup(LeadStatus::Dropped);
        let update = LeadUpdate {
            area: Some("DHA Lahore".to_string()),
            status: Some(LeadStatus::Pending),
            ..LeadUpdate::default()
        };
        assert!(update_lead(&storage, &lead.id, &update).is_err());
        assert!(storage.load_by_id(&lead.id).expect("load").area.is_none());
    }

    #[test]
    fn test_update_lead_missing() {
        let (_dir, storage, _lead) = setup(LeadStatus::Pending);
        let err = update_lead(&storage, "lead-000000", &LeadUpdate::default()).expect_err("missing");
        assert!(matches!(err, AppError::Core(CoreError::NotFound(_))));
    }
}
