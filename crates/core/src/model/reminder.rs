use crate::model::{Drill, DrillId};

/// What the trainer is currently presenting.
///
/// `AllComplete` is the exhausted state: no catalog drill remains
/// uncompleted. Not persisted; the scheduler recomputes it at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentReminder {
    Drill(Drill),
    AllComplete,
}

impl CurrentReminder {
    #[must_use]
    pub fn is_all_complete(&self) -> bool {
        matches!(self, Self::AllComplete)
    }

    /// The presented drill, if any.
    #[must_use]
    pub fn drill(&self) -> Option<&Drill> {
        match self {
            Self::Drill(drill) => Some(drill),
            Self::AllComplete => None,
        }
    }

    /// Render the reminder as a displayable card.
    ///
    /// The exhausted state renders as a synthetic congratulation card so
    /// consumers always have drill-shaped content to show.
    #[must_use]
    pub fn card(&self) -> Drill {
        match self {
            Self::Drill(drill) => drill.clone(),
            Self::AllComplete => completion_card(),
        }
    }
}

/// The "all done" card shown once every drill has been completed.
#[must_use]
pub fn completion_card() -> Drill {
    Drill {
        name: DrillId::new("CONGRATULATIONS!"),
        description: "You have completed every drill in the course.".to_string(),
        example: "Reset your progress to practice again, or add new drills.".to_string(),
        category: "Completion".to_string(),
        difficulty: "easy".to_string(),
        flags: "🎓".to_string(),
        output_example: "All drills mastered.".to_string(),
        analysis: "Keep practicing to stay sharp.".to_string(),
    }
}
