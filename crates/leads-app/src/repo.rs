// Rust guideline compliant 2026-10-14

//! Repository discovery, initialization, and path management.

use crate::error::{AppError, Result};
use leads_core::{CallAttempt, Config, Lead, Storage};
use std::path::{Path, PathBuf};

/// Name of the data directory under the repository root.
pub const LEADS_DIR: &str = ".leads";

/// Files touched by [`RepoContext::init`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Paths created during this run.
    pub created: Vec<PathBuf>,
    /// Paths that already existed and were left untouched.
    pub existing: Vec<PathBuf>,
}

/// Resolved paths for a lead repository.
#[derive(Debug, Clone)]
pub struct RepoContext {
    root: PathBuf,
    leads_dir: PathBuf,
    leads_path: PathBuf,
    calls_path: PathBuf,
    config_path: PathBuf,
}

impl RepoContext {
    fn at(root: PathBuf) -> Self {
        let leads_dir = root.join(LEADS_DIR);
        Self {
            leads_path: leads_dir.join("leads.jsonl"),
            calls_path: leads_dir.join("calls.jsonl"),
            config_path: leads_dir.join("config.toml"),
            leads_dir,
            root,
        }
    }

    /// Discovers a lead repository starting from an optional root.
    ///
    /// # Arguments
    ///
    /// * `repo_root` - Optional repository root; defaults to the current directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The current directory cannot be resolved
    /// - The `.leads` directory is missing
    pub fn discover(repo_root: Option<&Path>) -> Result<Self> {
        let root = match repo_root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let context = Self::at(root);
        if !context.leads_dir.is_dir() {
            return Err(AppError::RepoNotInitialized {
                path: context.leads_dir,
            });
        }
        Ok(context)
    }

    /// Creates the `.leads` directory, empty data files, and a default config.
    ///
    /// Existing files are kept, so running init twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be created.
    pub fn init(repo_root: Option<&Path>) -> Result<(Self, InitReport)> {
        let root = match repo_root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let context = Self::at(root);
        let mut report = InitReport::default();

        if context.leads_dir.is_dir() {
            report.existing.push(context.leads_dir.clone());
        } else {
            std::fs::create_dir_all(&context.leads_dir)?;
            report.created.push(context.leads_dir.clone());
        }

        for path in [&context.leads_path, &context.calls_path] {
            if path.exists() {
                report.existing.push(path.clone());
            } else {
                std::fs::File::create(path)?;
                report.created.push(path.clone());
            }
        }

        if context.config_path.exists() {
            report.existing.push(context.config_path.clone());
        } else {
            Config::default().save(&context.leads_dir)?;
            report.created.push(context.config_path.clone());
        }

        tracing::info!(
            path = %context.leads_dir.display(),
            created = report.created.len(),
            "initialized lead repository"
        );
        Ok((context, report))
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.leads` directory path.
    #[must_use]
    pub fn leads_dir(&self) -> &Path {
        &self.leads_dir
    }

    /// Returns the leads JSONL path.
    #[must_use]
    pub fn leads_path(&self) -> &Path {
        &self.leads_path
    }

    /// Returns the call attempts JSONL path.
    #[must_use]
    pub fn calls_path(&self) -> &Path {
        &self.calls_path
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Opens storage for `leads.jsonl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be initialized.
    pub fn open_leads(&self) -> Result<Storage<Lead>> {
        Ok(Storage::new(self.leads_path.clone())?)
    }

    /// Opens storage for `calls.jsonl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be initialized.
    pub fn open_calls(&self) -> Result<Storage<CallAttempt>> {
        Ok(Storage::new(self.calls_path.clone())?)
    }

    /// Loads repository configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(&self.leads_dir)?)
    }
}
