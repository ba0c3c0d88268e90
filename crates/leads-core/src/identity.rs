// Rust guideline compliant 2026-10-14

//! Hash-based ID generation, validation, and partial ID resolution.

use crate::{Error, Result};
use sha2::{Digest, Sha256};

/// Prefix for lead identifiers.
pub const LEAD_PREFIX: &str = "lead-";

/// Prefix for call attempt identifiers.
pub const CALL_PREFIX: &str = "call-";

const HASH_LEN: usize = 6;
const MIN_PARTIAL_LEN: usize = 3;

/// Generates a hash-based ID from seed parts, a timestamp, and a nonce.
///
/// # Arguments
///
/// * `prefix` - ID prefix, e.g. [`LEAD_PREFIX`]
/// * `parts` - Content that identifies the record
/// * `timestamp` - Unix timestamp of creation
/// * `nonce` - Collision counter
///
/// # Returns
///
/// An ID of the form `<prefix><6 hex chars>`.
pub fn generate_id(prefix: &str, parts: &[&str], timestamp: i64, nonce: u32) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(timestamp.to_le_bytes());
    hasher.update(nonce.to_le_bytes());

    let hex = format!("{:x}", hasher.finalize());
    format!("{}{}", prefix, &hex[..HASH_LEN])
}

/// Validates that an ID has the expected prefix and a 6-char hex body.
///
/// # Errors
///
/// Returns an error if the prefix or the hash part is malformed.
pub fn validate_id_format(id: &str, prefix: &str) -> Result<()> {
    let hash = id.strip_prefix(prefix).ok_or_else(|| {
        Error::InvalidLead(format!("ID must start with '{}': {}", prefix, id))
    })?;

    if hash.len() != HASH_LEN || !hash.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
        return Err(Error::InvalidLead(format!(
            "ID must end with {} lowercase hex characters: {}",
            HASH_LEN, id
        )));
    }

    Ok(())
}

/// Resolves a full or partial ID against a set of known IDs.
///
/// Accepts the full ID, the hash part without prefix, or a unique prefix
/// of the hash part of at least 3 characters.
///
/// # Errors
///
/// Returns an error if:
/// - The partial ID is shorter than 3 characters
/// - No ID matches
/// - More than one ID matches
pub fn resolve_partial_id<'a, I>(partial: &str, prefix: &str, ids: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let partial = partial.trim().to_lowercase();
    let needle = partial.strip_prefix(prefix).unwrap_or(&partial);

    if needle.len() < MIN_PARTIAL_LEN {
        return Err(Error::InvalidLead(format!(
            "Partial ID must be at least {} characters: {}",
            MIN_PARTIAL_LEN, partial
        )));
    }

    let mut matches: Vec<String> = Vec::new();
    for id in ids {
        let Some(hash) = id.strip_prefix(prefix) else {
            continue;
        };
        if hash == needle {
            return Ok(id.to_string());
        }
        if hash.starts_with(needle) {
            matches.push(id.to_string());
        }
    }

    match matches.len() {
        0 => Err(Error::NotFound(partial)),
        1 => Ok(matches.remove(0)),
        _ => {
            matches.sort();
            Err(Error::AmbiguousId(partial, matches))
        }
    }
}
