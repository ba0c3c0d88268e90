// Rust guideline compliant 2026-10-14

//! Per-status and per-result lead counts.

use crate::{Lead, LeadResult, LeadStatus};
use serde::Serialize;

/// Lead counts shown alongside listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeadStats {
    pub total: usize,
    pub pending: usize,
    pub calling: usize,
    pub answered: usize,
    pub qualified: usize,
    pub dropped: usize,
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
}

impl LeadStats {
    /// Counts leads by status and result.
    pub fn from_leads(leads: &[Lead]) -> Self {
        let mut stats = Self::default();
        for lead in leads {
            stats.total += 1;
            *stats.status_slot(lead.status) += 1;
            match lead.result {
                Some(LeadResult::Hot) => stats.hot += 1,
                Some(LeadResult::Warm) => stats.warm += 1,
                Some(LeadResult::Cold) => stats.cold += 1,
                None => {}
            }
        }
        stats
    }

    /// Returns the count for a single status.
    pub fn count(&self, status: LeadStatus) -> usize {
        match status {
            LeadStatus::Pending => self.pending,
            LeadStatus::Calling => self.calling,
            LeadStatus::Answered => self.answered,
            LeadStatus::Qualified => self.qualified,
            LeadStatus::Dropped => self.dropped,
        }
    }

    fn status_slot(&mut self, status: LeadStatus) -> &mut usize {
        match status {
            LeadStatus::Pending => &mut self.pending,
            LeadStatus::Calling => &mut self.calling,
            LeadStatus::Answered => &mut self.answered,
            LeadStatus::Qualified => &mut self.qualified,
            LeadStatus::Dropped => &mut self.dropped,
        }
    }
}
