// Rust guideline compliant 2026-10-14

//! Core data models for leads and call attempts.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Position of a lead in the calling pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Waiting to be called.
    Pending,
    /// A call is in flight.
    Calling,
    /// The lead picked up.
    Answered,
    /// Classified after a conversation.
    Qualified,
    /// Abandoned, either manually or after too many failed attempts.
    Dropped,
}

impl LeadStatus {
    /// Every status, in pipeline order.
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::Pending,
        LeadStatus::Calling,
        LeadStatus::Answered,
        LeadStatus::Qualified,
        LeadStatus::Dropped,
    ];

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Pending => "pending",
            LeadStatus::Calling => "calling",
            LeadStatus::Answered => "answered",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(LeadStatus::Pending),
            "calling" => Ok(LeadStatus::Calling),
            "answered" => Ok(LeadStatus::Answered),
            "qualified" => Ok(LeadStatus::Qualified),
            "dropped" => Ok(LeadStatus::Dropped),
            _ => Err(Error::InvalidLead(format!("Unknown status: {}", value))),
        }
    }
}

/// Where the lead came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    /// Freshly acquired contact.
    #[default]
    New,
    /// Contact from an older list.
    Old,
}

impl LeadSource {
    /// Returns the wire name of the source.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::New => "new",
            LeadSource::Old => "old",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadSource {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "new" => Ok(LeadSource::New),
            "old" => Ok(LeadSource::Old),
            _ => Err(Error::InvalidLead(format!("Unknown source: {}", value))),
        }
    }
}

/// Role classification assigned after a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadRole {
    Buyer,
    Seller,
    Renter,
}

impl LeadRole {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadRole::Buyer => "buyer",
            LeadRole::Seller => "seller",
            LeadRole::Renter => "renter",
        }
    }
}

impl fmt::Display for LeadRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadRole {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "buyer" => Ok(LeadRole::Buyer),
            "seller" => Ok(LeadRole::Seller),
            "renter" => Ok(LeadRole::Renter),
            _ => Err(Error::InvalidLead(format!("Unknown role: {}", value))),
        }
    }
}

/// Lead temperature recorded alongside qualification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadResult {
    Hot,
    Warm,
    Cold,
}

impl LeadResult {
    /// Returns the wire name of the result.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadResult::Hot => "hot",
            LeadResult::Warm => "warm",
            LeadResult::Cold => "cold",
        }
    }
}

impl fmt::Display for LeadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadResult {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "hot" => Ok(LeadResult::Hot),
            "warm" => Ok(LeadResult::Warm),
            "cold" => Ok(LeadResult::Cold),
            _ => Err(Error::InvalidLead(format!("Unknown result: {}", value))),
        }
    }
}

/// A prospective contact tracked through the call-qualification pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Unique hash-based identifier (format: lead-XXXXXX).
    pub id: String,
    /// Phone number as entered; unique by its normalized form.
    pub phone: String,
    /// Contact name.
    #[serde(default)]
    pub name: Option<String>,
    /// Acquisition source.
    pub source: LeadSource,
    /// Role classification.
    #[serde(default)]
    pub role: Option<LeadRole>,
    /// Area of interest.
    #[serde(default)]
    pub area: Option<String>,
    /// Free-form budget description.
    #[serde(default)]
    pub budget: Option<String>,
    /// Current pipeline status.
    #[serde(default = "default_status")]
    pub status: LeadStatus,
    /// Lead temperature.
    #[serde(default)]
    pub result: Option<LeadResult>,
    /// Number of calls placed so far.
    #[serde(default)]
    pub call_attempts: u32,
    /// Unix timestamp of the most recent call.
    #[serde(default)]
    pub last_call_at: Option<i64>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
    /// Number of conditional writes committed for this lead.
    #[serde(default)]
    pub revision: u64,
}

fn default_status() -> LeadStatus {
    LeadStatus::Pending
}

impl Lead {
    /// Creates a new pending lead with no call history.
    ///
    /// # Arguments
    ///
    /// * `phone` - Contact phone number
    /// * `source` - Acquisition source
    ///
    /// # Returns
    ///
    /// A new Lead with default values for optional fields.
    pub fn new(phone: String, source: LeadSource) -> Self {
        let now = now_secs();
        let phone = phone.trim().to_string();
        let id = crate::identity::generate_id(
            crate::identity::LEAD_PREFIX,
            &[normalize_phone(&phone).as_str(), source.as_str()],
            now,
            0,
        );

        Self {
            id,
            phone,
            name: None,
            source,
            role: None,
            area: None,
            budget: None,
            status: LeadStatus::Pending,
            result: None,
            call_attempts: 0,
            last_call_at: None,
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    /// Returns the phone number in normalized form.
    pub fn normalized_phone(&self) -> String {
        normalize_phone(&self.phone)
    }

    /// Validates the lead data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The phone number is empty, malformed, or too short
    /// - The ID format is invalid
    pub fn validate(&self) -> Result<()> {
        validate_phone(&self.phone)?;
        crate::identity::validate_id_format(&self.id, crate::identity::LEAD_PREFIX)?;
        Ok(())
    }

    /// Refreshes `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = now_secs();
    }
}

/// Reduces a phone number to its digits, keeping a leading `+`.
///
/// `"+92-300-1234567"` and `"+923001234567"` normalize to the same value.
pub fn normalize_phone(phone: &str) -> String {
    let trimmed = phone.trim();
    let mut normalized = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        normalized.push('+');
    }
    normalized.extend(trimmed.chars().filter(|c| c.is_ascii_digit()));
    normalized
}

/// Validates a phone number.
///
/// # Errors
///
/// Returns an error if the number is empty, contains characters other than
/// digits and common separators, or has fewer than 7 digits.
pub fn validate_phone(phone: &str) -> Result<()> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(Error::InvalidLead("Phone cannot be empty".to_string()));
    }

    if let Some(bad) = phone
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.')))
    {
        return Err(Error::InvalidLead(format!(
            "Phone contains invalid character '{}': {}",
            bad, phone
        )));
    }

    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 7 {
        return Err(Error::InvalidLead(format!(
            "Phone must contain at least 7 digits, got {}",
            digits
        )));
    }

    Ok(())
}

/// Outcome status of a single call attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallAttemptStatus {
    Initiated,
    Answered,
    NoAnswer,
    Failed,
}

impl CallAttemptStatus {
    /// Returns the wire name of the attempt status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallAttemptStatus::Initiated => "initiated",
            CallAttemptStatus::Answered => "answered",
            CallAttemptStatus::NoAnswer => "no_answer",
            CallAttemptStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for CallAttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged dial of a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallAttempt {
    /// Unique hash-based identifier (format: call-XXXXXX).
    pub id: String,
    /// Lead that was called.
    pub lead_id: String,
    /// 1-based attempt counter at the time of dialing.
    pub attempt_number: u32,
    /// Outcome of the attempt.
    pub status: CallAttemptStatus,
    /// Optional operator note.
    #[serde(default)]
    pub note: Option<String>,
    /// Telephony provider call identifier.
    #[serde(default)]
    pub call_sid: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl CallAttempt {
    /// Creates an `initiated` attempt for a lead.
    pub fn new(lead_id: String, attempt_number: u32) -> Self {
        let now = now_secs();
        let id = crate::identity::generate_id(
            crate::identity::CALL_PREFIX,
            &[lead_id.as_str()],
            now,
            attempt_number,
        );

        Self {
            id,
            lead_id,
            attempt_number,
            status: CallAttemptStatus::Initiated,
            note: None,
            call_sid: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validates the attempt data.
    ///
    /// # Errors
    ///
    /// Returns an error if either ID is malformed or the attempt number is zero.
    pub fn validate(&self) -> Result<()> {
        crate::identity::validate_id_format(&self.id, crate::identity::CALL_PREFIX)?;
        crate::identity::validate_id_format(&self.lead_id, crate::identity::LEAD_PREFIX)?;
        if self.attempt_number == 0 {
            return Err(Error::InvalidLead(
                "Attempt number must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Records an outcome and refreshes `updated_at`.
    pub fn set_status(&mut self, status: CallAttemptStatus) {
        self.status = status;
        self.updated_at = now_secs();
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lead_defaults() {
        let lead = Lead::new("+92-300-1234567".to_string(), LeadSource::New);
        assert_eq!(lead.status, LeadStatus::Pending);
        assert_eq!(lead.call_attempts, 0);
        assert!(lead.last_call_at.is_none());
        assert!(lead.id.starts_with("lead-"));
        assert!(lead.validate().is_ok());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+92-300-1234567"), "+923001234567");
        assert_eq!(normalize_phone(" (555) 123.4567 "), "5551234567");
    }

    #[test]
    fn test_validate_phone_rejects_letters() {
        assert!(validate_phone("555-CALL-NOW").is_err());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("+1 (555) 010-9999").is_ok());
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in LeadStatus::ALL {
            let parsed: LeadStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!("CALLING".parse::<LeadStatus>().unwrap(), LeadStatus::Calling);
        assert!("ringing".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&LeadStatus::Qualified).unwrap();
        assert_eq!(json, "\"qualified\"");
        let json = serde_json::to_string(&CallAttemptStatus::NoAnswer).unwrap();
        assert_eq!(json, "\"no_answer\"");
    }

    #[test]
    fn test_lead_deserializes_with_defaults() {
        let json = r#"{"id":"lead-a1b2c3","phone":"+923001234567","source":"old","created_at":1,"updated_at":1}"#;
        let lead: Lead = serde_json::from_str(json).unwrap();
        assert_eq!(lead.status, LeadStatus::Pending);
        assert_eq!(lead.source, LeadSource::Old);
        assert_eq!(lead.call_attempts, 0);
        assert!(lead.role.is_none());
    }

    #[test]
    fn test_call_attempt_validate() {
        let lead = Lead::new("+923001234567".to_string(), LeadSource::New);
        let attempt = CallAttempt::new(lead.id.clone(), 1);
        assert!(attempt.validate().is_ok());
        assert_eq!(attempt.status, CallAttemptStatus::Initiated);

        let zero = CallAttempt::new(lead.id, 0);
        assert!(zero.validate().is_err());
    }
}
