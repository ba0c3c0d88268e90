// Rust guideline compliant 2026-10-14

//! Command implementations for the `ldm` CLI.

pub mod call;
pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod seed;
pub mod show;
pub mod stats;
pub mod transitions;
pub mod update;

use crate::output::OutputFormatter;
use anyhow::Result;
use leads_app::{resolve_lead_id, RepoContext, SuccessEnvelope};
use leads_core::{Lead, Storage};
use serde::Serialize;
use std::path::PathBuf;

/// Settings shared by every command.
pub struct CommandContext {
    /// Repository root override; the current directory when `None`.
    pub repo: Option<PathBuf>,
    /// Formatter for the selected output format.
    pub formatter: Box<dyn OutputFormatter>,
    /// Whether results are printed as JSON envelopes.
    pub json: bool,
    /// Whether stderr messages may be colored.
    pub use_color: bool,
}

impl CommandContext {
    /// Discovers the lead repository.
    ///
    /// # Errors
    ///
    /// Returns an error if `.leads` does not exist.
    pub fn repo(&self) -> Result<RepoContext> {
        Ok(RepoContext::discover(self.repo.as_deref())?)
    }

    /// Prints a mutation result.
    ///
    /// JSON mode prints a success envelope; otherwise a check-marked message
    /// followed by `details` when non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON envelope cannot be serialized.
    pub fn emit<T: Serialize>(&self, message: &str, result: &T, details: &str) -> Result<()> {
        if self.json {
            let envelope = SuccessEnvelope::new(result).with_message(message);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        } else {
            println!("✓ {}", message);
            if !details.is_empty() {
                println!("{}", details.trim_end());
            }
        }
        Ok(())
    }
}

/// Resolves a full or partial lead ID against the store.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the ID does not resolve
/// to exactly one lead.
pub fn resolve_id(storage: &Storage<Lead>, id: &str) -> Result<String> {
    let leads = storage.load_all()?;
    Ok(resolve_lead_id(id, &leads)?)
}
