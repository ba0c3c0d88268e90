// Rust guideline compliant 2026-10-14

//! Implementation of the `ldm call` subcommands.
//!
//! `start` moves a lead to `calling` and prints manual dial instructions;
//! `answered`, `no-answer`, and `qualify` record the outcome; `callback`
//! feeds a provider status callback through the same validation.

use crate::commands::{resolve_id, CommandContext};
use crate::terminal::{get_terminal_width, print_warning, wrap_text};
use anyhow::Result;
use leads_app::{parse_result, parse_role, CallDesk, StatusCallback};

/// Call lifecycle action.
#[derive(Debug, Clone, clap::Subcommand)]
pub enum CallAction {
    /// Start a call: pending → calling, and print dial instructions
    Start {
        /// Lead ID (full or partial)
        id: String,
    },

    /// The lead picked up: calling → answered
    Answered {
        /// Lead ID (full or partial)
        id: String,
    },

    /// The lead did not pick up: back to pending, or dropped when out of attempts
    NoAnswer {
        /// Lead ID (full or partial)
        id: String,
    },

    /// Classify an answered lead: answered → qualified
    Qualify {
        /// Lead ID (full or partial)
        id: String,

        /// buyer, seller, or renter
        #[arg(long)]
        role: String,

        /// hot, warm, or cold
        #[arg(long)]
        result: String,
    },

    /// Apply a telephony provider status callback
    Callback {
        /// Provider call status (e.g. answered, no-answer, busy, failed)
        #[arg(long = "call-status")]
        call_status: String,

        /// Number that was called
        #[arg(long)]
        to: String,

        /// Provider call identifier
        #[arg(long = "call-sid")]
        call_sid: Option<String>,
    },
}

/// Runs a call action.
///
/// # Errors
///
/// Returns an error if the repository is missing, the lead cannot be
/// resolved, the transition is rejected, or the lead changed concurrently.
/// Callbacks only fail for an unknown call status or a storage error.
pub fn execute(action: CallAction, ctx: &CommandContext) -> Result<()> {
    let repo = ctx.repo()?;
    let desk = CallDesk::open(&repo)?;

    match action {
        CallAction::Start { id } => {
            let full_id = resolve_id(desk.leads(), &id)?;
            let start = desk.start_call(&full_id)?;
            let width = get_terminal_width();
            let details = format!(
                "  {}\n  Attempt {} of {}\n  Script: {}",
                start.dial.instruction,
                start.attempt.attempt_number,
                desk.policy().max_attempts,
                wrap_text(&start.dial.script, width, 10)
            );
            ctx.emit("Ready for manual dial", &start, &details)
        }
        CallAction::Answered { id } => {
            let full_id = resolve_id(desk.leads(), &id)?;
            let lead = desk.mark_answered(&full_id)?;
            ctx.emit(
                &format!("Call to {} marked as answered", lead.id),
                &lead,
                "",
            )
        }
        CallAction::NoAnswer { id } => {
            let full_id = resolve_id(desk.leads(), &id)?;
            let lead = desk.mark_no_answer(&full_id)?;
            let message = if lead.status.is_terminal() {
                format!(
                    "Lead {} dropped after {} failed attempts",
                    lead.id, lead.call_attempts
                )
            } else {
                format!("Call marked as no answer, lead {} returned to pending", lead.id)
            };
            ctx.emit(&message, &lead, "")
        }
        CallAction::Qualify { id, role, result } => {
            let role = parse_role(&role)?;
            let result = parse_result(&result)?;
            let full_id = resolve_id(desk.leads(), &id)?;
            let lead = desk.qualify(&full_id, role, result)?;
            ctx.emit(
                &format!("Lead {} qualified as {} ({})", lead.id, role, result),
                &lead,
                "",
            )
        }
        CallAction::Callback {
            call_status,
            to,
            call_sid,
        } => {
            let ack = desk.handle_status_callback(&StatusCallback {
                call_status,
                to,
                call_sid,
            })?;
            if let Some(reason) = ack.rejection.as_deref() {
                if !ctx.json {
                    print_warning(ctx.use_color, reason);
                }
            }
            let message = match (&ack.lead_id, ack.changed) {
                (Some(id), true) => format!(
                    "Callback applied: {} is now {}",
                    id,
                    ack.lead_status.map_or("unknown", |status| status.as_str())
                ),
                _ => "Callback acknowledged".to_string(),
            };
            ctx.emit(&message, &ack, "")
        }
    }
}
