// Rust guideline compliant 2026-10-14

//! Call lifecycle: dialing, outcomes, qualification, and vendor callbacks.
//!
//! Each operation reads the lead, validates the proposed status, commits
//! the lead conditionally, and only then records the outcome on the
//! latest call attempt.

use crate::error::{AppError, Result};
use crate::fsm::{commit, validate_transition};
use crate::repo::RepoContext;
use leads_core::{
    CallAttempt, CallAttemptStatus, Config, Lead, LeadResult, LeadRole, LeadStatus, Storage,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Call status reported by the telephony provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallOutcome {
    Queued,
    Initiated,
    Ringing,
    InProgress,
    Answered,
    Completed,
    NoAnswer,
    Busy,
    Canceled,
    Failed,
}

impl CallOutcome {
    /// Returns the provider's name for the outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallOutcome::Queued => "queued",
            CallOutcome::Initiated => "initiated",
            CallOutcome::Ringing => "ringing",
            CallOutcome::InProgress => "in-progress",
            CallOutcome::Answered => "answered",
            CallOutcome::Completed => "completed",
            CallOutcome::NoAnswer => "no-answer",
            CallOutcome::Busy => "busy",
            CallOutcome::Canceled => "canceled",
            CallOutcome::Failed => "failed",
        }
    }

    /// Attempt status recorded for this outcome, or `None` while the call
    /// is still in progress or already settled.
    pub fn attempt_status(&self) -> Option<CallAttemptStatus> {
        match self {
            CallOutcome::Answered => Some(CallAttemptStatus::Answered),
            CallOutcome::NoAnswer | CallOutcome::Busy | CallOutcome::Canceled => {
                Some(CallAttemptStatus::NoAnswer)
            }
            CallOutcome::Failed => Some(CallAttemptStatus::Failed),
            CallOutcome::Queued
            | CallOutcome::Initiated
            | CallOutcome::Ringing
            | CallOutcome::InProgress
            | CallOutcome::Completed => None,
        }
    }

    /// Returns true for outcomes that send the lead through the retry policy.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            CallOutcome::NoAnswer | CallOutcome::Busy | CallOutcome::Canceled | CallOutcome::Failed
        )
    }
}

impl fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallOutcome {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "queued" => Ok(CallOutcome::Queued),
            "initiated" => Ok(CallOutcome::Initiated),
            "ringing" => Ok(CallOutcome::Ringing),
            "in-progress" => Ok(CallOutcome::InProgress),
            "answered" => Ok(CallOutcome::Answered),
            "completed" => Ok(CallOutcome::Completed),
            "no-answer" => Ok(CallOutcome::NoAnswer),
            "busy" => Ok(CallOutcome::Busy),
            "canceled" => Ok(CallOutcome::Canceled),
            "failed" => Ok(CallOutcome::Failed),
            _ => Err(AppError::InvalidInput(format!(
                "Unknown call status: {}",
                value
            ))),
        }
    }
}

/// Decides where a lead goes after a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after which the lead is dropped instead of retried.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 2 }
    }
}

impl RetryPolicy {
    /// Builds the policy from `max_call_attempts`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_call_attempts,
        }
    }

    /// Target status for a lead whose latest call failed.
    pub fn next_status(&self, call_attempts: u32) -> LeadStatus {
        if call_attempts >= self.max_attempts {
            LeadStatus::Dropped
        } else {
            LeadStatus::Pending
        }
    }
}

/// What the operator needs to place the call by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialInstructions {
    /// Lead being called.
    pub lead_id: String,
    /// Number to dial.
    pub phone: String,
    /// Number the operator dials from, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_number: Option<String>,
    /// One-line instruction for the operator.
    pub instruction: String,
    /// Script to read when the lead picks up.
    pub script: String,
}

/// Result of starting a call.
#[derive(Debug, Clone, Serialize)]
pub struct CallStart {
    /// Lead after the move to `calling`.
    pub lead: Lead,
    /// Attempt logged for this call.
    pub attempt: CallAttempt,
    /// Manual dialing instructions.
    pub dial: DialInstructions,
}

/// Status callback posted by the telephony provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCallback {
    /// Raw provider call status, e.g. `no-answer`.
    pub call_status: String,
    /// Number that was called.
    pub to: String,
    /// Provider call identifier.
    pub call_sid: Option<String>,
}

/// Acknowledgment returned to the provider for every parseable callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallbackAck {
    /// Always true; the provider only needs to know the callback arrived.
    pub ok: bool,
    /// Call status as reported.
    pub call_status: String,
    /// Matched lead, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    /// Lead status after handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_status: Option<LeadStatus>,
    /// True if the lead status was written.
    pub changed: bool,
    /// Why nothing was written, when the callback was ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
}

/// Call operations over a lead store and its call log.
#[derive(Debug)]
pub struct CallDesk {
    leads: Storage<Lead>,
    calls: Storage<CallAttempt>,
    policy: RetryPolicy,
    caller_number: Option<String>,
    call_script: String,
}

impl CallDesk {
    /// Creates a desk from storages and configuration.
    pub fn new(leads: Storage<Lead>, calls: Storage<CallAttempt>, config: &Config) -> Self {
        Self {
            leads,
            calls,
            policy: RetryPolicy::from_config(config),
            caller_number: config.caller_number.clone(),
            call_script: config.call_script.clone(),
        }
    }

    /// Opens the desk for a discovered repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the storages cannot be opened or the config is invalid.
    pub fn open(repo: &RepoContext) -> Result<Self> {
        let config = repo.load_config()?;
        Ok(Self::new(repo.open_leads()?, repo.open_calls()?, &config))
    }

    /// Returns the retry policy in effect.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Returns the lead storage.
    pub fn leads(&self) -> &Storage<Lead> {
        &self.leads
    }

    /// Returns the call attempt storage.
    pub fn calls(&self) -> &Storage<CallAttempt> {
        &self.calls
    }

    /// Moves a lead to `calling` and logs an `initiated` attempt.
    ///
    /// # Returns
    ///
    /// The updated lead, the new attempt, and dial instructions.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lead does not exist
    /// - The lead cannot move to `calling` from its current status
    /// - Another writer changed the status first
    pub fn start_call(&self, id: &str) -> Result<CallStart> {
        let mut lead = self.leads.load_by_id(id)?;
        let expected = lead.status;
        validate_transition(&lead, LeadStatus::Calling)?;

        lead.status = LeadStatus::Calling;
        lead.call_attempts = lead.call_attempts.saturating_add(1);
        lead.touch();
        lead.last_call_at = Some(lead.updated_at);
        let lead = commit(&self.leads, &lead, expected)?;

        let attempt = match self
            .calls
            .append(&CallAttempt::new(lead.id.clone(), lead.call_attempts))
        {
            Ok(attempt) => attempt,
            Err(err) => {
                tracing::error!(
                    lead_id = %lead.id,
                    call_attempts = lead.call_attempts,
                    error = %err,
                    "lead is calling but its call attempt was not logged"
                );
                return Err(err.into());
            }
        };
        tracing::debug!(
            lead_id = %lead.id,
            attempt_id = %attempt.id,
            attempt = attempt.attempt_number,
            "call attempt logged"
        );

        let dial = self.dial_instructions(&lead);
        Ok(CallStart {
            lead,
            attempt,
            dial,
        })
    }

    fn dial_instructions(&self, lead: &Lead) -> DialInstructions {
        let instruction = match &self.caller_number {
            Some(caller) => format!("Call {} from your phone ({})", lead.phone, caller),
            None => format!("Call {} from your phone", lead.phone),
        };
        DialInstructions {
            lead_id: lead.id.clone(),
            phone: lead.phone.clone(),
            caller_number: self.caller_number.clone(),
            instruction,
            script: self.call_script.clone(),
        }
    }

    /// Marks the call as answered: `calling → answered`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lead is missing, not in `calling`, or was
    /// changed concurrently.
    pub fn mark_answered(&self, id: &str) -> Result<Lead> {
        self.answer(id, None)
    }

    fn answer(&self, id: &str, call_sid: Option<&str>) -> Result<Lead> {
        let lead = self.transition(id, |_| LeadStatus::Answered)?;
        self.record_outcome(&lead.id, CallAttemptStatus::Answered, call_sid)?;
        Ok(lead)
    }

    /// Marks the call as unanswered and applies the retry policy.
    ///
    /// The lead returns to `pending` while attempts remain and is dropped
    /// once `max_attempts` calls have been placed.
    ///
    /// # Errors
    ///
    /// Returns an error if the lead is missing, the target status is not
    /// reachable, or the lead was changed concurrently.
    pub fn mark_no_answer(&self, id: &str) -> Result<Lead> {
        self.fail_call(id, CallAttemptStatus::NoAnswer, None)
    }

    fn fail_call(
        &self,
        id: &str,
        attempt_status: CallAttemptStatus,
        call_sid: Option<&str>,
    ) -> Result<Lead> {
        let policy = self.policy;
        let lead = self.transition(id, |lead| policy.next_status(lead.call_attempts))?;
        if lead.status == LeadStatus::Dropped {
            tracing::info!(
                lead_id = %lead.id,
                call_attempts = lead.call_attempts,
                max_attempts = policy.max_attempts,
                "lead dropped after exhausting call attempts"
            );
        }
        self.record_outcome(&lead.id, attempt_status, call_sid)?;
        Ok(lead)
    }

    /// Qualifies an answered lead with its role and temperature.
    ///
    /// # Errors
    ///
    /// Returns an error if the lead is missing, not in `answered`, or was
    /// changed concurrently.
    pub fn qualify(&self, id: &str, role: LeadRole, result: LeadResult) -> Result<Lead> {
        let mut lead = self.leads.load_by_id(id)?;
        let expected = lead.status;
        validate_transition(&lead, LeadStatus::Qualified)?;

        lead.status = LeadStatus::Qualified;
        lead.role = Some(role);
        lead.result = Some(result);
        lead.touch();
        commit(&self.leads, &lead, expected)
    }

    /// Handles a provider status callback.
    ///
    /// The lead is found by normalized phone number. Unknown leads,
    /// rejected transitions, and lost races are acknowledged without
    /// writing the lead; the acknowledgment carries the reason.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for an unknown call status, or an
    /// error if storage cannot be read or written.
    pub fn handle_status_callback(&self, callback: &StatusCallback) -> Result<CallbackAck> {
        let outcome: CallOutcome = callback.call_status.parse()?;
        tracing::info!(
            call_status = %outcome,
            to = %callback.to,
            call_sid = callback.call_sid.as_deref().unwrap_or(""),
            "status callback received"
        );

        let mut ack = CallbackAck {
            ok: true,
            call_status: callback.call_status.clone(),
            lead_id: None,
            lead_status: None,
            changed: false,
            rejection: None,
        };

        let Some(lead) = self.leads.find_by_phone(&callback.to)? else {
            tracing::warn!(to = %callback.to, "status callback for unknown number");
            ack.rejection = Some(format!("No lead with phone number {}", callback.to));
            return Ok(ack);
        };
        ack.lead_id = Some(lead.id.clone());
        ack.lead_status = Some(lead.status);

        let call_sid = callback.call_sid.as_deref();
        let result = match outcome {
            CallOutcome::Answered => self.answer(&lead.id, call_sid).map(Some),
            _ if outcome.is_failure() => {
                let attempt_status = outcome
                    .attempt_status()
                    .unwrap_or(CallAttemptStatus::NoAnswer);
                self.fail_call(&lead.id, attempt_status, call_sid).map(Some)
            }
            _ => {
                if let Some(sid) = call_sid {
                    self.attach_call_sid(&lead.id, sid)?;
                }
                Ok(None)
            }
        };

        match result {
            Ok(Some(updated)) => {
                ack.changed = true;
                ack.lead_status = Some(updated.status);
            }
            Ok(None) => {}
            Err(err) if err.is_client_error() => {
                ack.rejection = Some(err.to_string());
            }
            Err(err) => return Err(err),
        }

        Ok(ack)
    }

    /// Reads a lead, computes its target status, validates, and commits.
    fn transition<F>(&self, id: &str, target: F) -> Result<Lead>
    where
        F: FnOnce(&Lead) -> LeadStatus,
    {
        let mut lead = self.leads.load_by_id(id)?;
        let expected = lead.status;
        let next = target(&lead);
        validate_transition(&lead, next)?;

        lead.status = next;
        lead.touch();
        commit(&self.leads, &lead, expected)
    }

    fn record_outcome(
        &self,
        lead_id: &str,
        status: CallAttemptStatus,
        call_sid: Option<&str>,
    ) -> Result<()> {
        self.update_latest_attempt(lead_id, |attempt| {
            attempt.set_status(status);
            if let Some(sid) = call_sid {
                attempt.call_sid = Some(sid.to_string());
            }
        })
    }

    fn attach_call_sid(&self, lead_id: &str, call_sid: &str) -> Result<()> {
        self.update_latest_attempt(lead_id, |attempt| {
            if attempt.call_sid.is_none() {
                attempt.call_sid = Some(call_sid.to_string());
            }
        })
    }

    fn update_latest_attempt<F>(&self, lead_id: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut CallAttempt),
    {
        let updated = self.calls.with_lock(|calls| {
            let Some(mut attempt) = calls.latest_for(lead_id)? else {
                return Ok(false);
            };
            edit(&mut attempt);
            calls.save(&attempt)?;
            Ok(true)
        })?;

        if !updated {
            tracing::warn!(lead_id = %lead_id, "no call attempt to update");
        }
        Ok(())
    }
}
