// Rust guideline compliant 2026-10-14

//! Implementation of the `ldm init` command.
//!
//! Creates the `.leads` directory with empty lead and call files and a
//! default `config.toml`. Existing files are left alone.

use crate::commands::CommandContext;
use anyhow::Result;
use leads_app::RepoContext;
use serde_json::json;

/// Initializes a lead repository.
///
/// # Errors
///
/// Returns an error if the directory or files cannot be created.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let (repo, report) = RepoContext::init(ctx.repo.as_deref())?;

    let mut details = String::new();
    for path in &report.created {
        details.push_str(&format!("  - Created {}\n", path.display()));
    }
    for path in &report.existing {
        details.push_str(&format!("  - Kept {}\n", path.display()));
    }

    let message = if report.created.is_empty() {
        format!("Lead repository already initialized at {}", repo.leads_dir().display())
    } else {
        format!("Lead repository initialized at {}", repo.leads_dir().display())
    };

    ctx.emit(
        &message,
        &json!({
            "path": repo.leads_dir(),
            "created": report.created,
            "existing": report.existing,
        }),
        &details,
    )
}
