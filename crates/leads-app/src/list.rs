// Rust guideline compliant 2026-10-14

//! Listing, filtering, and pagination helpers for leads.

use crate::error::{AppError, Result};
use leads_core::{Lead, LeadResult, LeadRole, LeadSource, LeadStats, LeadStatus};
use rayon::prelude::*;
use serde::Serialize;
use std::str::FromStr;

/// Page size used when none is requested.
pub const DEFAULT_LIMIT: usize = 50;

/// List options for filtering and paginating leads.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Filter by status.
    pub status: Option<LeadStatus>,
    /// Filter by result.
    pub result: Option<LeadResult>,
    /// Filter by role.
    pub role: Option<LeadRole>,
    /// Filter by source.
    pub source: Option<LeadSource>,
    /// 1-based page number.
    pub page: usize,
    /// Maximum leads per page.
    pub limit: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            status: None,
            result: None,
            role: None,
            source: None,
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of leads plus counts over the whole store.
#[derive(Debug, Clone, Serialize)]
pub struct LeadPage {
    /// Leads on this page, newest first.
    pub leads: Vec<Lead>,
    /// Number of leads matching the filters.
    pub total: usize,
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub limit: usize,
    /// Number of pages for `total` at `limit`.
    pub pages: usize,
    /// Counts over every lead in the store, ignoring filters.
    pub stats: LeadStats,
}

fn parse_filter<T: FromStr>(kind: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid {} filter: {}", kind, value)))
}

/// Parses a status string.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if the status is unknown.
pub fn parse_status(value: &str) -> Result<LeadStatus> {
    parse_filter("status", value)
}

/// Parses a result string (`hot`, `warm`, `cold`).
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if the result is unknown.
pub fn parse_result(value: &str) -> Result<LeadResult> {
    parse_filter("result", value)
}

/// Parses a role string (`buyer`, `seller`, `renter`).
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if the role is unknown.
pub fn parse_role(value: &str) -> Result<LeadRole> {
    parse_filter("role", value)
}

/// Parses a source string (`new`, `old`).
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if the source is unknown.
pub fn parse_source(value: &str) -> Result<LeadSource> {
    parse_filter("source", value)
}

/// Filters, sorts, and paginates leads.
///
/// # Arguments
///
/// * `leads` - Every lead in the store
/// * `options` - Filters and page selection
///
/// # Returns
///
/// The requested page. A page past the end is empty, not an error.
///
/// # Errors
///
/// Returns an error if `page` or `limit` is zero.
pub fn list_leads(leads: Vec<Lead>, options: &ListOptions) -> Result<LeadPage> {
    if options.page == 0 {
        return Err(AppError::InvalidInput("Page must be at least 1".to_string()));
    }
    if options.limit == 0 {
        return Err(AppError::InvalidInput("Limit must be at least 1".to_string()));
    }

    let stats = LeadStats::from_leads(&leads);
    let mut matching = apply_filters(leads, options);
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

    let total = matching.len();
    let pages = total.div_ceil(options.limit);
    let skip = (options.page - 1).saturating_mul(options.limit);
    let leads = matching.into_iter().skip(skip).take(options.limit).collect();

    Ok(LeadPage {
        leads,
        total,
        page: options.page,
        limit: options.limit,
        pages,
        stats,
    })
}

fn apply_filters(leads: Vec<Lead>, options: &ListOptions) -> Vec<Lead> {
    const PARALLEL_THRESHOLD: usize = 1_000;

    let predicate = |lead: &Lead| {
        if let Some(status) = options.status {
            if lead.status != status {
                return false;
            }
        }
        if let Some(result) = options.result {
            if lead.result != Some(result) {
                return false;
            }
        }
        if let Some(role) = options.role {
            if lead.role != Some(role) {
                return false;
            }
        }
        if let Some(source) = options.source {
            if lead.source != source {
                return false;
            }
        }
        true
    };

    if leads.len() >= PARALLEL_THRESHOLD {
        leads.into_par_iter().filter(|lead| predicate(lead)).collect()
    } else {
        leads.into_iter().filter(predicate).collect()
    }
}
