use serde::Serialize;

use crate::model::{Drill, DrillId};

/// Maximum number of entries kept in the presentation history.
pub const HISTORY_CAP: usize = 10;

/// Bounded, most-recent-first log of presented drills.
///
/// Display-only: selection never consults it. Rebuilt empty on every
/// process start.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<Drill>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a presented drill: existing entry with the same id moves to
    /// the front instead of duplicating, and the log truncates to
    /// [`HISTORY_CAP`].
    pub fn record(&mut self, drill: Drill) {
        self.entries.retain(|d| d.id() != drill.id());
        self.entries.insert(0, drill);
        self.entries.truncate(HISTORY_CAP);
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[Drill] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &DrillId) -> bool {
        self.entries.iter().any(|d| d.id() == id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_drill(name: &str) -> Drill {
        Drill {
            name: DrillId::new(name),
            description: format!("practice {name}"),
            example: format!("{name} -v"),
            category: "files".to_string(),
            difficulty: "easy".to_string(),
            flags: "-v".to_string(),
            output_example: "ok".to_string(),
            analysis: "run it once".to_string(),
        }
    }

    #[test]
    fn records_most_recent_first() {
        let mut history = History::new();
        history.record(build_drill("ls"));
        history.record(build_drill("grep"));

        let names: Vec<&str> = history.entries().iter().map(|d| d.id().as_str()).collect();
        assert_eq!(names, ["grep", "ls"]);
    }

    #[test]
    fn re_recording_moves_to_front_without_duplicating() {
        let mut history = History::new();
        history.record(build_drill("ls"));
        history.record(build_drill("grep"));
        history.record(build_drill("ls"));

        let names: Vec<&str> = history.entries().iter().map(|d| d.id().as_str()).collect();
        assert_eq!(names, ["ls", "grep"]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn truncates_to_cap() {
        let mut history = History::new();
        for i in 0..15 {
            history.record(build_drill(&format!("cmd{i}")));
        }

        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.entries()[0].id().as_str(), "cmd14");
        assert!(!history.contains(&DrillId::new("cmd0")));
        assert!(history.contains(&DrillId::new("cmd5")));
    }

    #[test]
    fn distinct_count_is_min_of_recorded_and_cap() {
        let mut history = History::new();
        for i in 0..4 {
            history.record(build_drill(&format!("cmd{i}")));
            // recording the same id again must not inflate the count
            history.record(build_drill(&format!("cmd{i}")));
        }
        assert_eq!(history.len(), 4);
    }
}
