// Rust guideline compliant 2026-10-14

//! Output formatting for the `ldm` CLI.
//!
//! Leads, pages, counts, and the transition table can be rendered as JSON,
//! tables, or plain tab-separated text.

use chrono::{TimeZone, Utc};
use leads_app::LeadPage;
use leads_core::{CallAttempt, Lead, LeadStats, LeadStatus, OutputFormat};
use serde_json::json;
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// One row of the transition table: a status and its legal successors.
pub type TransitionRow = (LeadStatus, &'static [LeadStatus]);

/// Output formatter trait.
///
/// Defines how each kind of command result is rendered.
pub trait OutputFormatter {
    /// Formats a single lead with its call history and legal next statuses.
    fn format_lead(&self, lead: &Lead, attempts: &[CallAttempt]) -> String;

    /// Formats one page of a lead listing.
    fn format_page(&self, page: &LeadPage) -> String;

    /// Formats lead counts.
    fn format_stats(&self, stats: &LeadStats) -> String;

    /// Formats rows of the transition table.
    fn format_transitions(&self, rows: &[TransitionRow]) -> String;

    /// Formats an error message for display.
    fn format_error(&self, error: &str) -> String;
}

/// Renders a Unix timestamp.
///
/// # Arguments
/// * `timestamp` - Seconds since the Unix epoch
/// * `absolute` - Render as a UTC date instead of relative to now
pub fn format_timestamp(timestamp: i64, absolute: bool) -> String {
    if absolute {
        return Utc
            .timestamp_opt(timestamp, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| timestamp.to_string());
    }
    relative_to(timestamp, Utc::now().timestamp())
}

fn relative_to(timestamp: i64, now: i64) -> String {
    let elapsed = now - timestamp;
    if elapsed < 0 {
        return "in the future".to_string();
    }
    match elapsed {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{}m ago", elapsed / 60),
        3_600..=86_399 => format!("{}h ago", elapsed / 3_600),
        _ => format!("{}d ago", elapsed / 86_400),
    }
}

fn join_statuses(statuses: &[LeadStatus]) -> String {
    statuses
        .iter()
        .map(|status| status.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn status_color(status: LeadStatus) -> Color {
    match status {
        LeadStatus::Pending => Color::Yellow,
        LeadStatus::Calling => Color::Cyan,
        LeadStatus::Answered => Color::Blue,
        LeadStatus::Qualified => Color::Green,
        LeadStatus::Dropped => Color::Red,
    }
}

/// JSON output formatter.
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: serde_json::Value) -> String {
        serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize output" }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_lead(&self, lead: &Lead, attempts: &[CallAttempt]) -> String {
        Self::render(json!({
            "lead": lead,
            "valid_transitions": lead.status.valid_transitions(),
            "call_attempts": attempts,
        }))
    }

    fn format_page(&self, page: &LeadPage) -> String {
        Self::render(json!(page))
    }

    fn format_stats(&self, stats: &LeadStats) -> String {
        Self::render(json!(stats))
    }

    fn format_transitions(&self, rows: &[TransitionRow]) -> String {
        let rows: Vec<_> = rows
            .iter()
            .map(|(status, allowed)| {
                json!({
                    "status": status,
                    "valid_transitions": allowed,
                    "terminal": allowed.is_empty(),
                })
            })
            .collect();
        Self::render(json!({ "transitions": rows }))
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "status": "error", "message": error }).to_string()
    }
}

/// Table output formatter.
pub struct TableFormatter {
    use_color: bool,
    absolute_time: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    pub fn new(use_color: bool, absolute_time: bool) -> Self {
        Self {
            use_color,
            absolute_time,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let mut buffer = Buffer::ansi();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(buffer, "{}", text);
        let _ = buffer.reset();
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    fn time(&self, timestamp: i64) -> String {
        format_timestamp(timestamp, self.absolute_time)
    }
}

impl OutputFormatter for TableFormatter {
    fn format_lead(&self, lead: &Lead, attempts: &[CallAttempt]) -> String {
        let mut output = String::new();
        let next = lead.status.valid_transitions();

        output.push_str(&format!("ID:         {}\n", lead.id));
        output.push_str(&format!("Phone:      {}\n", lead.phone));
        output.push_str(&format!("Name:       {}\n", or_dash(lead.name.as_deref())));
        output.push_str(&format!("Source:     {}\n", lead.source));
        output.push_str(&format!(
            "Status:     {}\n",
            self.paint(lead.status.as_str(), status_color(lead.status))
        ));
        output.push_str(&format!("Role:       {}\n", or_dash(lead.role)));
        output.push_str(&format!("Result:     {}\n", or_dash(lead.result)));
        output.push_str(&format!("Area:       {}\n", or_dash(lead.area.as_deref())));
        output.push_str(&format!("Budget:     {}\n", or_dash(lead.budget.as_deref())));
        output.push_str(&format!("Attempts:   {}\n", lead.call_attempts));
        output.push_str(&format!(
            "Last call:  {}\n",
            lead.last_call_at
                .map_or_else(|| "never".to_string(), |ts| self.time(ts))
        ));
        output.push_str(&format!("Created:    {}\n", self.time(lead.created_at)));
        output.push_str(&format!("Updated:    {}\n", self.time(lead.updated_at)));

        if next.is_empty() {
            output.push_str("Next:       none (terminal)\n");
        } else {
            output.push_str(&format!("Next:       {}\n", join_statuses(next)));
        }

        if !attempts.is_empty() {
            output.push_str("\nCall attempts:\n");
            for attempt in attempts {
                output.push_str(&format!(
                    "  #{} {:<10} {:<14} {}\n",
                    attempt.attempt_number,
                    attempt.status,
                    self.time(attempt.created_at),
                    attempt.id
                ));
            }
        }

        output
    }

    fn format_page(&self, page: &LeadPage) -> String {
        if page.leads.is_empty() {
            return format!("No leads found. ({} in store)", page.stats.total);
        }

        let mut builder = Builder::default();
        builder.push_record(vec![
            "ID", "Phone", "Name", "Status", "Source", "Role", "Result", "Calls", "Created",
        ]);
        for lead in &page.leads {
            builder.push_record(vec![
                lead.id.clone(),
                lead.phone.clone(),
                or_dash(lead.name.as_deref()),
                lead.status.to_string(),
                lead.source.to_string(),
                or_dash(lead.role),
                or_dash(lead.result),
                lead.call_attempts.to_string(),
                self.time(lead.created_at),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());

        format!(
            "{}\nPage {}/{} ({} matching)",
            table,
            page.page,
            page.pages.max(1),
            page.total
        )
    }

    fn format_stats(&self, stats: &LeadStats) -> String {
        let mut builder = Builder::default();
        builder.push_record(vec!["Status", "Count"]);
        for status in LeadStatus::ALL {
            builder.push_record(vec![status.to_string(), stats.count(status).to_string()]);
        }
        builder.push_record(vec!["total".to_string(), stats.total.to_string()]);
        let mut statuses = builder.build();
        statuses.with(Style::modern());

        let mut builder = Builder::default();
        builder.push_record(vec!["Result", "Count"]);
        builder.push_record(vec!["hot".to_string(), stats.hot.to_string()]);
        builder.push_record(vec!["warm".to_string(), stats.warm.to_string()]);
        builder.push_record(vec!["cold".to_string(), stats.cold.to_string()]);
        let mut results = builder.build();
        results.with(Style::modern());

        format!("{}\n{}", statuses, results)
    }

    fn format_transitions(&self, rows: &[TransitionRow]) -> String {
        let mut builder = Builder::default();
        builder.push_record(vec!["From", "Allowed", "Terminal"]);
        for (status, allowed) in rows {
            builder.push_record(vec![
                status.to_string(),
                if allowed.is_empty() {
                    "-".to_string()
                } else {
                    join_statuses(allowed)
                },
                if allowed.is_empty() { "yes" } else { "no" }.to_string(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("{} {}", self.paint("Error:", Color::Red), error)
    }
}

/// Plain text output formatter.
///
/// One record per line, tab-separated, no colors.
pub struct PlainFormatter {
    absolute_time: bool,
}

impl PlainFormatter {
    /// Creates a new plain formatter.
    pub fn new(absolute_time: bool) -> Self {
        Self { absolute_time }
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_lead(&self, lead: &Lead, attempts: &[CallAttempt]) -> String {
        let mut output = format!(
            "{}\t{}\t{}\t{}\t{}\n",
            lead.id,
            lead.phone,
            lead.status,
            lead.call_attempts,
            join_statuses(lead.status.valid_transitions())
        );
        for attempt in attempts {
            output.push_str(&format!(
                "{}\t{}\t{}\n",
                attempt.id, attempt.attempt_number, attempt.status
            ));
        }
        output
    }

    fn format_page(&self, page: &LeadPage) -> String {
        page.leads
            .iter()
            .map(|lead| {
                format!(
                    "{}\t{}\t{}\t{}\t{}",
                    lead.id,
                    lead.phone,
                    lead.status,
                    or_dash(lead.name.as_deref()),
                    format_timestamp(lead.created_at, self.absolute_time)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_stats(&self, stats: &LeadStats) -> String {
        let mut lines: Vec<String> = LeadStatus::ALL
            .iter()
            .map(|status| format!("{}\t{}", status, stats.count(*status)))
            .collect();
        lines.push(format!("hot\t{}", stats.hot));
        lines.push(format!("warm\t{}", stats.warm));
        lines.push(format!("cold\t{}", stats.cold));
        lines.push(format!("total\t{}", stats.total));
        lines.join("\n")
    }

    fn format_transitions(&self, rows: &[TransitionRow]) -> String {
        rows.iter()
            .map(|(status, allowed)| format!("{}\t{}", status, join_statuses(allowed)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

/// Creates a formatter for the requested output format.
///
/// # Arguments
/// * `format` - Desired output format
/// * `use_color` - Whether to use colored output (table only)
/// * `absolute_time` - Render timestamps as UTC dates
pub fn create_formatter(
    format: OutputFormat,
    use_color: bool,
    absolute_time: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter::new(use_color, absolute_time)),
        OutputFormat::Plain => Box::new(PlainFormatter::new(absolute_time)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_time_buckets() {
        assert_eq!(relative_to(1_000, 1_030), "just now");
        assert_eq!(relative_to(1_000, 1_000 + 5 * 60), "5m ago");
        assert_eq!(relative_to(0, 3 * 3_600), "3h ago");
        assert_eq!(relative_to(0, 2 * 86_400 + 10), "2d ago");
        assert_eq!(relative_to(100, 0), "in the future");
    }

    #[test]
    fn test_absolute_time() {
        assert_eq!(format_timestamp(0, true), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_table_paint_without_color_is_plain() {
        let formatter = TableFormatter::new(false, true);
        assert_eq!(formatter.paint("pending", Color::Yellow), "pending");
        assert!(formatter.format_error("boom").starts_with("Error: boom"));
    }
}
