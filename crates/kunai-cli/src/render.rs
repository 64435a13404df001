//! Output formatting for verdicts.

use kunai_core::config::OutputFormat;

use crate::commands::Verdict;

/// ## Summary
/// Renders a verdict as human-readable text or as JSON.
///
/// ## Errors
/// Returns an error if JSON serialization fails.
pub fn render(verdict: &Verdict, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(verdict),
        OutputFormat::Text => Ok(render_text(verdict)),
    }
}

fn render_text(verdict: &Verdict) -> String {
    match verdict {
        Verdict::OrganizerDiff { equal: true } => "equal (ignoring alarms)".to_string(),
        Verdict::OrganizerDiff { equal: false } => "different".to_string(),
        Verdict::AttendeeMerge {
            attendee,
            outcome,
            report,
        } => {
            let mut text = format!("{attendee}: {outcome}");
            for difference in report.iter() {
                text.push_str("\n  ");
                text.push_str(&difference.to_string());
            }
            text
        }
    }
}
