use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::Progress;

//
// ─── IDS ───────────────────────────────────────────────────────────────────────
//

/// Unique identifier for a drill: the command name from the catalog.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrillId(String);

impl DrillId {
    /// Creates a new `DrillId`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the underlying command name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DrillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DrillId({})", self.0)
    }
}

impl fmt::Display for DrillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DrillId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for DrillId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

//
// ─── DRILL ─────────────────────────────────────────────────────────────────────
//

/// A single catalog entry: one trainable command with its teaching material.
///
/// Immutable once loaded; the catalog is the only producer of drills.
/// Field names follow the catalog document layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drill {
    #[serde(rename = "command")]
    pub name: DrillId,
    pub description: String,
    pub example: String,
    pub category: String,
    pub difficulty: String,
    pub flags: String,
    pub output_example: String,
    pub analysis: String,
}

impl Drill {
    #[must_use]
    pub fn id(&self) -> &DrillId {
        &self.name
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The immutable, ordered set of drills loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    drills: Vec<Drill>,
}

impl Catalog {
    #[must_use]
    pub fn new(drills: Vec<Drill>) -> Self {
        Self { drills }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &DrillId) -> bool {
        self.drills.iter().any(|d| d.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: &DrillId) -> Option<&Drill> {
        self.drills.iter().find(|d| d.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drill> {
        self.drills.iter()
    }

    /// Drills not yet completed: catalog minus the completed set.
    #[must_use]
    pub fn remaining<'a>(&'a self, progress: &Progress) -> Vec<&'a Drill> {
        self.drills
            .iter()
            .filter(|d| !progress.is_completed(d.id()))
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
