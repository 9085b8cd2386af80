//! Persisted log of completed rescan requests

use super::rescan::{CompletedScan, OutcomeKind};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Entries kept on disk
pub const MAX_HISTORY_ENTRIES: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanHistoryEntry {
    pub timestamp: DateTime<Local>,
    /// `organization` or the target domain
    pub scope: String,
    pub outcome: OutcomeKind,
    /// Text that was shown to the user
    pub message: String,
    pub duration_secs: f64,
}

impl ScanHistoryEntry {
    pub fn from_completed(done: &CompletedScan) -> Self {
        Self {
            timestamp: Local::now(),
            scope: done.request.scope_label(),
            outcome: done.outcome.kind(),
            message: done.outcome.notification().message,
            duration_secs: done.duration_secs,
        }
    }

    pub fn status_icon(&self) -> &str {
        match self.outcome {
            OutcomeKind::Started => "✓",
            OutcomeKind::RateLimited => "⏳",
            OutcomeKind::Failed => "✗",
        }
    }

    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn formatted_duration(&self) -> String {
        if self.duration_secs < 1.0 {
            format!("{:.0}ms", self.duration_secs * 1000.0)
        } else {
            format!("{:.1}s", self.duration_secs)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScanHistoryFile {
    entries: Vec<ScanHistoryEntry>,
}

/// Scan history stored as `scan_history.json` in the state directory
pub struct ScanHistory {
    path: PathBuf,
    entries: Vec<ScanHistoryEntry>,
}

impl ScanHistory {
    pub fn path_in(state_dir: &Path) -> PathBuf {
        state_dir.join("scan_history.json")
    }

    /// Load history, starting empty when the file is missing or unreadable
    pub fn load(state_dir: &Path) -> Self {
        let path = Self::path_in(state_dir);
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str::<ScanHistoryFile>(&contents).ok())
            .map(|file| file.entries)
            .unwrap_or_default();
        Self { path, entries }
    }

    pub fn entries(&self) -> &[ScanHistoryEntry] {
        &self.entries
    }

    /// Add an entry at the front and write the file
    pub fn record(&mut self, entry: ScanHistoryEntry) -> anyhow::Result<()> {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        self.save()
    }

    fn save(&self) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = ScanHistoryFile {
            entries: self.entries.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rescan::{RescanRequest, ScanOutcome};

    fn completed(outcome: ScanOutcome) -> CompletedScan {
        CompletedScan {
            request: RescanRequest::domain("example.com"),
            outcome,
            duration_secs: 0.25,
        }
    }

    #[test]
    fn test_record_persists_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = ScanHistory::load(dir.path());
        assert!(history.entries().is_empty());

        history
            .record(ScanHistoryEntry::from_completed(&completed(ScanOutcome::Started(
                "scan started".into(),
            ))))
            .unwrap();
        history
            .record(ScanHistoryEntry::from_completed(&completed(
                ScanOutcome::RateLimited("slow down".into()),
            )))
            .unwrap();

        let reloaded = ScanHistory::load(dir.path());
        assert_eq!(reloaded.entries().len(), 2);
        assert_eq!(reloaded.entries()[0].outcome, OutcomeKind::RateLimited);
        assert_eq!(reloaded.entries()[0].message, "slow down");
        assert_eq!(reloaded.entries()[1].scope, "example.com");
    }

    #[test]
    fn test_history_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = ScanHistory::load(dir.path());
        for _ in 0..(MAX_HISTORY_ENTRIES + 5) {
            history
                .record(ScanHistoryEntry::from_completed(&completed(ScanOutcome::Started(
                    "ok".into(),
                ))))
                .unwrap();
        }
        assert_eq!(history.entries().len(), MAX_HISTORY_ENTRIES);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(ScanHistory::path_in(dir.path()), "not json").unwrap();
        assert!(ScanHistory::load(dir.path()).entries().is_empty());
    }

    #[test]
    fn test_duration_formatting() {
        let mut entry = ScanHistoryEntry::from_completed(&completed(ScanOutcome::Started(
            "ok".into(),
        )));
        assert_eq!(entry.formatted_duration(), "250ms");
        entry.duration_secs = 2.0;
        assert_eq!(entry.formatted_duration(), "2.0s");
    }
}
