//! Subcommand implementations.

use std::path::Path;

use kunai_rfc::rfc::ical::ICalendar;
use kunai_scheduling::scheduling::{DiffReport, ICalDiff, MergeOutcome, load_scheduling_object};
use serde::Serialize;

use crate::error::{CliError, CliResult};

/// Result of one subcommand, ready to render.
#[derive(Debug, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Verdict {
    OrganizerDiff {
        equal: bool,
    },
    AttendeeMerge {
        attendee: String,
        outcome: MergeOutcome,
        report: DiffReport,
    },
}

impl Verdict {
    /// Whether the documents were equal or the merge acceptable.
    #[must_use]
    pub fn passed(&self) -> bool {
        match self {
            Self::OrganizerDiff { equal } => *equal,
            Self::AttendeeMerge { outcome, .. } => outcome.acceptable,
        }
    }
}

/// ## Summary
/// Reads and parses a scheduling object from disk.
///
/// ## Errors
/// Returns an error if the file cannot be read or is not a valid
/// scheduling object.
pub fn read_document(path: &Path) -> CliResult<ICalendar> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_scheduling_object(&text).map_err(|source| CliError::Document {
        path: path.to_path_buf(),
        source,
    })
}

/// ## Errors
/// Returns an error if either document cannot be loaded.
pub fn organizer_diff(old: &Path, new: &Path) -> CliResult<Verdict> {
    let (old, new) = (read_document(old)?, read_document(new)?);
    let equal = ICalDiff::new(&old, &new).organizer_diff();
    Ok(Verdict::OrganizerDiff { equal })
}

/// ## Errors
/// Returns an error if either document cannot be loaded.
pub fn attendee_merge(organizer: &Path, attendee_copy: &Path, attendee: &str) -> CliResult<Verdict> {
    let (organizer, attendee_copy) = (read_document(organizer)?, read_document(attendee_copy)?);
    let (outcome, report) =
        ICalDiff::new(&organizer, &attendee_copy).attendee_merge_with_report(attendee);
    Ok(Verdict::AttendeeMerge {
        attendee: attendee.to_string(),
        outcome,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn missing_file_is_a_read_error() {
        let err = read_document(Path::new("/nonexistent/kunai/event.ics")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test_log::test]
    fn verdict_passes_on_acceptable_merge() {
        let verdict = Verdict::AttendeeMerge {
            attendee: "mailto:alex@example.com".to_string(),
            outcome: MergeOutcome::accepted(false),
            report: DiffReport::default(),
        };
        assert!(verdict.passed());
        assert!(!Verdict::OrganizerDiff { equal: false }.passed());
    }
}
