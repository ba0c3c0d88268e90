// Rust guideline compliant 2026-10-14

//! Implementation of the `ldm list` command.

use crate::commands::CommandContext;
use anyhow::Result;
use leads_app::{
    list_leads, parse_result, parse_role, parse_source, parse_status, ListOptions,
};

/// Filters and page selection for `ldm list`.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub status: Option<String>,
    pub result: Option<String>,
    pub role: Option<String>,
    pub source: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl ListArgs {
    /// Parses the raw filter strings.
    ///
    /// # Errors
    ///
    /// Returns an error if any filter value is unknown.
    pub fn to_options(&self) -> Result<ListOptions> {
        let defaults = ListOptions::default();
        Ok(ListOptions {
            status: self.status.as_deref().map(parse_status).transpose()?,
            result: self.result.as_deref().map(parse_result).transpose()?,
            role: self.role.as_deref().map(parse_role).transpose()?,
            source: self.source.as_deref().map(parse_source).transpose()?,
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        })
    }
}

/// Lists leads, newest first.
///
/// # Errors
///
/// Returns an error if the repository is missing, a filter is invalid, or
/// the page or limit is zero.
pub fn execute(args: ListArgs, ctx: &CommandContext) -> Result<()> {
    let options = args.to_options()?;
    let repo = ctx.repo()?;
    let leads = repo.open_leads()?.load_all()?;
    let page = list_leads(leads, &options)?;

    println!("{}", ctx.formatter.format_page(&page));
    Ok(())
}
