use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::DrillId;

/// Durable training progress.
///
/// `completed` only grows except on [`Progress::clear`]. Every id appearing
/// in `attempts` or `last_completion` was marked completed at some point;
/// [`Progress::record_completion`] is the only writer, which keeps that
/// invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub completed: BTreeSet<DrillId>,
    #[serde(default)]
    pub attempts: BTreeMap<DrillId, u32>,
    #[serde(default)]
    pub last_completion: BTreeMap<DrillId, DateTime<Utc>>,
}

impl Progress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_completed(&self, id: &DrillId) -> bool {
        self.completed.contains(id)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn attempts_for(&self, id: &DrillId) -> u32 {
        self.attempts.get(id).copied().unwrap_or(0)
    }

    /// Mark a drill completed at `now`.
    ///
    /// Idempotent on the completed set; the attempt counter increments on
    /// every call so repeat practice still counts, and the completion
    /// timestamp is refreshed.
    pub fn record_completion(&mut self, id: DrillId, now: DateTime<Utc>) {
        *self.attempts.entry(id.clone()).or_insert(0) += 1;
        self.last_completion.insert(id.clone(), now);
        self.completed.insert(id);
    }

    /// Drop all progress: completed set, attempts, and timestamps together.
    pub fn clear(&mut self) {
        self.completed.clear();
        self.attempts.clear();
        self.last_completion.clear();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
