//! Per-run upload accounting and summary rendering.

use serde::Serialize;

/// At most this many failures are itemized in the summary.
pub const SUMMARY_FAILURE_CAP: usize = 10;

/// Failure reasons are cut to this many characters in the summary.
pub const SUMMARY_REASON_LIMIT: usize = 80;

const RULE_WIDTH: usize = 50;

/// What happened to one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploaded,
    Skipped,
    Failed,
}

/// One candidate's recorded outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadOutcome {
    pub name: String,
    pub status: UploadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl UploadOutcome {
    pub fn uploaded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: UploadStatus::Uploaded,
            reason: None,
        }
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: UploadStatus::Skipped,
            reason: None,
        }
    }

    pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: UploadStatus::Failed,
            reason: Some(reason.into()),
        }
    }
}

/// Outcome of one upload run, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadReport {
    pub outcomes: Vec<UploadOutcome>,
}

impl UploadReport {
    pub fn record(&mut self, outcome: UploadOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn uploaded(&self) -> usize {
        self.count(UploadStatus::Uploaded)
    }

    pub fn skipped(&self) -> usize {
        self.count(UploadStatus::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(UploadStatus::Failed)
    }

    /// Failures in processing order.
    pub fn failures(&self) -> impl Iterator<Item = &UploadOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == UploadStatus::Failed)
    }

    /// A run counts as successful when nothing failed (skips are fine).
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, status: UploadStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == status)
            .count()
    }

    /// Render the closing summary block.
    ///
    /// `verb` is the tally label for successful items: "Uploaded" for
    /// local runs, "Started" for bucket ingests (those complete as
    /// background tasks).
    pub fn render_summary(&self, verb: &str) -> String {
        let mut out = String::new();
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
        out.push_str("Upload Summary:\n");
        out.push_str(&format!("  {}: {}\n", verb, self.uploaded()));
        out.push_str(&format!(
            "  Skipped (already exist): {}\n",
            self.skipped()
        ));
        out.push_str(&format!("  Failed: {}", self.failed()));

        let failures: Vec<&UploadOutcome> = self.failures().collect();
        if !failures.is_empty() {
            out.push_str("\n\nFailed uploads:");
            for outcome in failures.iter().take(SUMMARY_FAILURE_CAP) {
                let reason = outcome.reason.as_deref().unwrap_or("");
                out.push_str(&format!(
                    "\n  - {}: {}",
                    outcome.name,
                    truncate_chars(reason, SUMMARY_REASON_LIMIT)
                ));
            }
            if failures.len() > SUMMARY_FAILURE_CAP {
                out.push_str(&format!(
                    "\n  ... and {} more",
                    failures.len() - SUMMARY_FAILURE_CAP
                ));
            }
        }

        out
    }
}

/// Truncate to at most `max` characters, never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
