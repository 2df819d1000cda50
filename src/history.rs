use crate::stats;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const RECENT_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchOutcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRecord {
    pub timestamp: DateTime<Utc>,
    pub kind: String,
    pub outcome: FetchOutcome,
}

/// Aggregate fetch outcomes across all runs.
///
/// Tracks `(successes, attempts)` per joke kind plus a capped log of recent
/// fetches, persisted as one JSON file under the history directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FetchStats {
    /// (successes, attempts) per joke kind.
    pub per_kind: HashMap<String, (u32, u32)>,
    pub recent: Vec<FetchRecord>,
    pub total_attempts: u32,
}

impl FetchStats {
    fn path(dir: &Path) -> std::path::PathBuf {
        dir.join("stats.json")
    }

    /// Missing or unreadable state starts fresh.
    pub fn load_or_default(dir: &Path) -> Self {
        std::fs::read_to_string(Self::path(dir))
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn record(&mut self, kind: &str, outcome: FetchOutcome) {
        self.total_attempts += 1;

        let entry = self.per_kind.entry(kind.to_string()).or_insert((0, 0));
        entry.1 += 1;
        if outcome == FetchOutcome::Success {
            entry.0 += 1;
        }

        self.recent.push(FetchRecord {
            timestamp: Utc::now(),
            kind: kind.to_string(),
            outcome,
        });
        if self.recent.len() > RECENT_CAP {
            let excess = self.recent.len() - RECENT_CAP;
            self.recent.drain(..excess);
        }
    }

    /// `None` until the first attempt for `kind` is recorded.
    pub fn success_rate(&self, kind: &str) -> Option<f64> {
        let (successes, attempts) = self.per_kind.get(kind).copied().unwrap_or((0, 0));
        stats::ratio(successes, attempts)
    }

    /// Kinds with at least one recorded attempt, alphabetical.
    pub fn known_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.per_kind.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        std::fs::write(Self::path(dir), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn success_rate_is_absent_before_any_attempt() {
        let stats = FetchStats::default();
        assert_eq!(stats.success_rate("programming"), None);
    }

    #[test]
    fn record_tracks_successes_and_attempts() {
        let mut stats = FetchStats::default();
        stats.record("programming", FetchOutcome::Success);
        stats.record("programming", FetchOutcome::Failure);
        stats.record("programming", FetchOutcome::Success);
        stats.record("general", FetchOutcome::Failure);

        assert_eq!(stats.per_kind["programming"], (2, 3));
        assert_eq!(stats.per_kind["general"], (0, 1));
        assert_eq!(stats.total_attempts, 4);
        assert_eq!(stats.success_rate("programming"), Some(2.0 / 3.0));
        assert_eq!(stats.success_rate("general"), Some(0.0));
    }

    #[test]
    fn recent_log_is_capped() {
        let mut stats = FetchStats::default();
        for _ in 0..(RECENT_CAP + 10) {
            stats.record("general", FetchOutcome::Success);
        }
        assert_eq!(stats.recent.len(), RECENT_CAP);
        assert_eq!(stats.total_attempts, (RECENT_CAP + 10) as u32);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut stats = FetchStats::default();
        stats.record("programming", FetchOutcome::Success);
        stats.save(dir.path()).unwrap();

        let reloaded = FetchStats::load_or_default(dir.path());
        assert_eq!(reloaded.per_kind["programming"], (1, 1));
        assert_eq!(reloaded.recent.len(), 1);
    }

    #[test]
    fn corrupt_state_starts_fresh() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("stats.json"), "not json {").unwrap();

        let stats = FetchStats::load_or_default(dir.path());
        assert_eq!(stats.total_attempts, 0);
    }

    #[test]
    fn known_kinds_are_sorted() {
        let mut stats = FetchStats::default();
        stats.record("programming", FetchOutcome::Success);
        stats.record("general", FetchOutcome::Success);
        assert_eq!(stats.known_kinds(), vec!["general", "programming"]);
    }
}
