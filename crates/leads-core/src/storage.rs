// Rust guideline compliant 2026-10-14

//! Storage module for JSONL file operations.
//!
//! Records are stored one JSON object per line. Writes replace the whole
//! file through a temp file and rename, and mutating operations that must
//! observe the current file contents run under an exclusive file lock.

use crate::{CallAttempt, Error, Lead, LeadStatus, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A record that can be persisted in a JSONL file.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Returns the unique identifier of the record.
    fn record_id(&self) -> &str;

    /// Validates the record before it is written or after it is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the record data is invalid.
    fn validate(&self) -> Result<()>;
}

impl Record for Lead {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<()> {
        Lead::validate(self)
    }
}

impl Record for CallAttempt {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<()> {
        CallAttempt::validate(self)
    }
}

/// Storage engine for JSONL records.
pub struct Storage<T> {
    /// Path to the JSONL file.
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Storage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").field("path", &self.path).finish()
    }
}

impl<T: Record> Storage<T> {
    /// Creates a new Storage instance.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSONL file
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        Self::validate_path(&path)?;
        Ok(Self {
            path,
            _record: PhantomData,
        })
    }

    fn validate_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path cannot be empty",
            )));
        }
        Ok(())
    }

    /// Returns a reference to the JSONL file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all records from the JSONL file.
    ///
    /// Blank lines are ignored. Lines that are not valid JSON for `T` are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or read
    /// - A well-formed record fails validation
    pub fn load_all(&self) -> Result<Vec<T>> {
        use std::fs::File;
        use std::io::{BufRead, BufReader};

        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<T>(&line) {
                Ok(record) => {
                    record.validate()?;
                    records.push(record);
                }
                Err(err) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = index + 1,
                        error = %err,
                        "skipping malformed JSONL line"
                    );
                }
            }
        }

        Ok(records)
    }

    /// Loads a single record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this ID.
    pub fn load_by_id(&self, id: &str) -> Result<T> {
        self.load_all()?
            .into_iter()
            .find(|record| record.record_id() == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Saves a single record, replacing an existing one with the same ID.
    ///
    /// Does not take the file lock; wrap in [`Storage::with_lock`] when
    /// other writers may be active.
    ///
    /// # Errors
    ///
    /// Returns an error if the record fails validation or the file cannot
    /// be read or written.
    pub fn save(&self, record: &T) -> Result<()> {
        record.validate()?;

        let mut records = self.load_all()?;
        match records
            .iter()
            .position(|existing| existing.record_id() == record.record_id())
        {
            Some(pos) => records[pos] = record.clone(),
            None => records.push(record.clone()),
        }

        self.save_all(&records)
    }

    /// Replaces the file contents with the provided records.
    ///
    /// # Errors
    ///
    /// Returns an error if any record fails validation or the atomic write
    /// fails.
    pub fn save_all(&self, records: &[T]) -> Result<()> {
        use std::fs::File;
        use std::io::{BufWriter, Write};

        for record in records {
            record.validate()?;
        }

        let temp_path = self.path.with_extension("jsonl.tmp");
        {
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writer.write_all(b"\n")?;
            }
            let file = writer.into_inner().map_err(|err| Error::Io(err.into_error()))?;
            file.sync_all()?;
        }

        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Deletes a record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this ID.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.with_lock(|storage| {
            let mut records = storage.load_all()?;
            let initial_len = records.len();
            records.retain(|record| record.record_id() != id);

            if records.len() == initial_len {
                return Err(Error::NotFound(id.to_string()));
            }

            storage.save_all(&records)
        })
    }

    /// Executes a closure while holding an exclusive lock on the storage file.
    ///
    /// Blocks until the lock is available. The lock lives in a sibling
    /// `.lock` file and is released when the closure returns, even on error.
    /// Must not be nested for the same file.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock cannot be acquired or the closure fails.
    pub fn with_lock<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Self) -> Result<R>,
    {
        use fs2::FileExt;
        use std::fs::OpenOptions;

        let lock_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file.lock_exclusive().map_err(|e| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                format!("Failed to acquire lock: {}", e),
            ))
        })?;

        let result = f(self);
        let _ = lock_file.unlock();
        result
    }
}

impl Storage<Lead> {
    /// Finds a lead by phone number, comparing normalized forms.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn find_by_phone(&self, phone: &str) -> Result<Option<Lead>> {
        let wanted = crate::models::normalize_phone(phone);
        Ok(self
            .load_all()?
            .into_iter()
            .find(|lead| lead.normalized_phone() == wanted))
    }

    /// Appends a new lead.
    ///
    /// Runs under the file lock so two concurrent inserts of the same phone
    /// number cannot both succeed. An ID collision is resolved by
    /// regenerating the ID with an increasing nonce.
    ///
    /// # Returns
    ///
    /// The lead as stored, with its final ID.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lead fails validation
    /// - Another lead has the same normalized phone number
    /// - The file cannot be written
    pub fn insert(&self, lead: &Lead) -> Result<Lead> {
        lead.validate()?;

        self.with_lock(|storage| {
            let mut leads = storage.load_all()?;
            let wanted = lead.normalized_phone();
            if leads.iter().any(|existing| existing.normalized_phone() == wanted) {
                return Err(Error::DuplicatePhone(lead.phone.clone()));
            }

            let mut stored = lead.clone();
            let mut nonce = 0u32;
            while leads.iter().any(|existing| existing.id == stored.id) {
                nonce = nonce.saturating_add(1);
                stored.id = crate::identity::generate_id(
                    crate::identity::LEAD_PREFIX,
                    &[wanted.as_str(), stored.source.as_str()],
                    stored.created_at,
                    nonce,
                );
            }

            leads.push(stored.clone());
            storage.save_all(&leads)?;
            Ok(stored)
        })
    }

    /// Writes a lead only if the persisted copy is the one the caller read.
    ///
    /// This is the conditional half of a read-validate-write cycle: the
    /// caller read the lead with status `expected` at `lead.revision`,
    /// validated the proposed change against it, and now commits. If any
    /// other writer committed in between, nothing is written, even when
    /// that writer left the status where it was.
    ///
    /// # Returns
    ///
    /// The lead as stored, with its revision advanced by one.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lead fails validation
    /// - The lead no longer exists ([`Error::NotFound`])
    /// - The persisted status differs from `expected`, or the persisted
    ///   revision differs from `lead.revision` ([`Error::StatusConflict`])
    /// - The file cannot be written
    pub fn save_if_status(&self, lead: &Lead, expected: LeadStatus) -> Result<Lead> {
        lead.validate()?;

        self.with_lock(|storage| {
            let mut leads = storage.load_all()?;
            let pos = leads
                .iter()
                .position(|existing| existing.id == lead.id)
                .ok_or_else(|| Error::NotFound(lead.id.clone()))?;

            let current = &leads[pos];
            if current.status != expected || current.revision != lead.revision {
                return Err(Error::StatusConflict {
                    id: lead.id.clone(),
                    expected,
                    actual: current.status,
                });
            }

            let mut stored = lead.clone();
            stored.revision = current.revision.saturating_add(1);
            leads[pos] = stored.clone();
            storage.save_all(&leads)?;
            Ok(stored)
        })
    }
}

impl Storage<CallAttempt> {
    /// Returns all attempts for a lead, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn for_lead(&self, lead_id: &str) -> Result<Vec<CallAttempt>> {
        let mut attempts: Vec<CallAttempt> = self
            .load_all()?
            .into_iter()
            .filter(|attempt| attempt.lead_id == lead_id)
            .collect();
        attempts.sort_by_key(|attempt| (attempt.attempt_number, attempt.created_at));
        Ok(attempts)
    }

    /// Returns the most recent attempt for a lead, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn latest_for(&self, lead_id: &str) -> Result<Option<CallAttempt>> {
        Ok(self.for_lead(lead_id)?.pop())
    }

    /// Appends an attempt under the file lock.
    ///
    /// Never replaces an existing record: an ID collision is resolved by
    /// regenerating the ID with an increasing nonce.
    ///
    /// # Returns
    ///
    /// The attempt as stored, with its final ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the attempt fails validation or cannot be written.
    pub fn append(&self, attempt: &CallAttempt) -> Result<CallAttempt> {
        attempt.validate()?;

        self.with_lock(|storage| {
            let mut attempts = storage.load_all()?;
            let mut stored = attempt.clone();
            let mut nonce = 0u32;
            while attempts.iter().any(|existing| existing.id == stored.id) {
                nonce = nonce.saturating_add(1);
                stored.id = crate::identity::generate_id(
                    crate::identity::CALL_PREFIX,
                    &[stored.lead_id.as_str(), &nonce.to_string()],
                    stored.created_at,
                    stored.attempt_number,
                );
            }

            attempts.push(stored.clone());
            storage.save_all(&attempts)?;
            Ok(stored)
        })
    }
}
