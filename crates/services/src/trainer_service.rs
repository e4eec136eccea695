use std::sync::Arc;
use std::time::Duration;

use rand::seq::IndexedRandom;
use tokio::sync::Mutex;
use tracing::{info, warn};

use storage::repository::{ProgressRepository, SettingsRepository};
use trainer_core::model::{
    Catalog, CurrentReminder, Drill, DrillId, History, Progress, Settings, SettingsPatch,
};
use trainer_core::time::Clock;

use crate::alert::AlertSink;
use crate::error::TrainerError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// All mutable scheduling state. Lives behind the service's single lock so
/// the periodic task and request handlers never race on it.
struct TrainerState {
    current: Option<CurrentReminder>,
    progress: Progress,
    settings: Settings,
    history: History,
    manual_skip: bool,
}

/// Read-only view of the mutable state, for display surfaces.
#[derive(Debug, Clone)]
pub struct TrainerSnapshot {
    pub current: CurrentReminder,
    pub settings: Settings,
    pub progress: Progress,
    pub history: Vec<Drill>,
}

//
// ─── SCHEDULER ─────────────────────────────────────────────────────────────────
//

/// The drill scheduler.
///
/// Owns the current reminder, progress, settings, and history; selects the
/// next drill uniformly at random among the not-yet-completed pool. Both
/// automatic ticks and manual actions funnel through the same selection
/// primitive.
pub struct TrainerService {
    clock: Clock,
    catalog: Catalog,
    settings_repo: Arc<dyn SettingsRepository>,
    progress_repo: Arc<dyn ProgressRepository>,
    alert: Arc<dyn AlertSink>,
    state: Mutex<TrainerState>,
}

impl std::fmt::Debug for TrainerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainerService")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl TrainerService {
    /// Build the scheduler from a loaded catalog and the durable stores.
    ///
    /// Settings and progress load failures are downgraded to defaults and
    /// empty progress respectively. An invalid persisted settings override
    /// is discarded wholesale.
    ///
    /// # Errors
    ///
    /// Returns `TrainerError::EmptyCatalog` if the catalog holds no drills;
    /// an empty catalog must keep the scheduler from starting.
    pub async fn start(
        catalog: Catalog,
        settings_repo: Arc<dyn SettingsRepository>,
        progress_repo: Arc<dyn ProgressRepository>,
        alert: Arc<dyn AlertSink>,
        clock: Clock,
    ) -> Result<Arc<Self>, TrainerError> {
        if catalog.is_empty() {
            return Err(TrainerError::EmptyCatalog);
        }

        let settings = match settings_repo.load().await {
            Ok(patch) => Settings::from_override(patch),
            Err(err) => {
                warn!(error = %err, "failed to load settings, using defaults");
                Settings::default()
            }
        };

        let progress = match progress_repo.load().await {
            Ok(Some(progress)) => progress,
            Ok(None) => Progress::new(),
            Err(err) => {
                warn!(error = %err, "failed to load progress, starting empty");
                Progress::new()
            }
        };

        info!(
            drills = catalog.len(),
            completed = progress.completed_count(),
            interval = settings.reminder_interval,
            "trainer ready"
        );

        Ok(Arc::new(Self {
            clock,
            catalog,
            settings_repo,
            progress_repo,
            alert,
            state: Mutex::new(TrainerState {
                current: None,
                progress,
                settings,
                history: History::new(),
                manual_skip: false,
            }),
        }))
    }

    /// The single selection primitive.
    ///
    /// Picks uniformly at random among the drills not yet completed. An
    /// empty pool flips the scheduler into the exhausted state; the
    /// sentinel never enters history and never rings the alert.
    fn select_next_locked(&self, state: &mut TrainerState, play_alert: bool) -> CurrentReminder {
        let remaining = self.catalog.remaining(&state.progress);
        let Some(drill) = remaining.choose(&mut rand::rng()).copied() else {
            info!("no drills remaining");
            state.current = Some(CurrentReminder::AllComplete);
            return CurrentReminder::AllComplete;
        };

        state.history.record(drill.clone());
        let reminder = CurrentReminder::Drill(drill.clone());
        state.current = Some(reminder.clone());

        if play_alert && state.settings.sound_enabled {
            self.alert.notify();
        }

        reminder
    }

    /// Advance to a random remaining drill.
    ///
    /// Manual actions and the periodic loop both end up here; exposed so
    /// collaborators can force an advance outside either path.
    pub async fn select_next(&self, play_alert: bool) -> CurrentReminder {
        let mut state = self.state.lock().await;
        self.select_next_locked(&mut state, play_alert)
    }

    /// The card currently presented.
    ///
    /// Selects one silently if nothing has been presented yet this run;
    /// the current reminder is recomputed, never loaded from storage.
    pub async fn current(&self) -> CurrentReminder {
        let mut state = self.state.lock().await;
        match &state.current {
            Some(reminder) => reminder.clone(),
            None => self.select_next_locked(&mut state, false),
        }
    }

    /// Mark a drill completed, persist the snapshot, and advance silently.
    ///
    /// Re-marking an already-completed drill still counts an attempt.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDrill` for an id outside the catalog, or the
    /// storage error when the snapshot cannot be persisted (the advance is
    /// skipped in that case).
    pub async fn mark_completed(&self, id: &DrillId) -> Result<CurrentReminder, TrainerError> {
        if !self.catalog.contains(id) {
            return Err(TrainerError::UnknownDrill(id.to_string()));
        }

        let mut state = self.state.lock().await;
        state.progress.record_completion(id.clone(), self.clock.now());
        self.progress_repo.save(&state.progress).await?;
        Ok(self.select_next_locked(&mut state, false))
    }

    /// Manual skip: advance silently and suppress the next automatic tick.
    pub async fn skip(&self) -> CurrentReminder {
        let mut state = self.state.lock().await;
        state.manual_skip = true;
        self.select_next_locked(&mut state, false)
    }

    /// Apply a settings patch, persist the full record, return the result.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid patch (settings are left
    /// untouched) or the storage error when persisting fails.
    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<Settings, TrainerError> {
        let mut state = self.state.lock().await;
        state.settings.apply(patch)?;
        self.settings_repo.save(&state.settings).await?;
        Ok(state.settings.clone())
    }

    /// Clear all progress, persist the empty snapshot, and advance
    /// silently. The full catalog becomes selectable again.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the cleared snapshot cannot be
    /// persisted.
    pub async fn reset_progress(&self) -> Result<CurrentReminder, TrainerError> {
        let mut state = self.state.lock().await;
        state.progress.clear();
        self.progress_repo.save(&state.progress).await?;
        Ok(self.select_next_locked(&mut state, false))
    }

    /// Ring the alert hook directly, regardless of settings.
    pub fn play_alert(&self) {
        self.alert.notify();
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current settings.
    pub async fn settings(&self) -> Settings {
        self.state.lock().await.settings.clone()
    }

    /// Read-only snapshot for display; selects an initial drill first if
    /// nothing has been presented yet.
    pub async fn snapshot(&self) -> TrainerSnapshot {
        let mut state = self.state.lock().await;
        if state.current.is_none() {
            self.select_next_locked(&mut state, false);
        }
        TrainerSnapshot {
            current: state
                .current
                .clone()
                .unwrap_or(CurrentReminder::AllComplete),
            settings: state.settings.clone(),
            progress: state.progress.clone(),
            history: state.history.entries().to_vec(),
        }
    }

    /// One periodic iteration.
    ///
    /// Advances (with the alert, when sound is enabled) unless a manual
    /// skip already advanced during this interval or auto-advance is off;
    /// then clears the manual-skip flag and reports how long to sleep
    /// before the next tick. The interval is re-read every iteration so a
    /// settings change takes effect on the next tick.
    pub async fn tick(&self) -> Duration {
        let mut state = self.state.lock().await;
        if !self.catalog.is_empty() && !state.manual_skip && state.settings.auto_advance {
            self.select_next_locked(&mut state, true);
        }
        state.manual_skip = false;
        Duration::from_secs(state.settings.reminder_interval)
    }

    /// Periodic advancement loop. Runs for the life of the process; the
    /// only way to stop it is to drop the runtime.
    pub async fn run_periodic(self: Arc<Self>) {
        loop {
            let interval = self.tick().await;
            tokio::time::sleep(interval).await;
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
