use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default advance interval in seconds (five minutes).
pub const DEFAULT_REMINDER_INTERVAL: u64 = 300;

/// Runtime configuration for the trainer.
///
/// Created once at startup by merging a persisted override over defaults,
/// mutated only through validated patches, persisted after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub reminder_interval: u64,
    pub sound_enabled: bool,
    pub auto_advance: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminder_interval: DEFAULT_REMINDER_INTERVAL,
            sound_enabled: true,
            auto_advance: true,
        }
    }
}

/// Partial settings: any subset of recognized keys.
///
/// Doubles as the persisted-override shape and the update-request shape.
/// Unrecognized keys are dropped at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_interval: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_advance: Option<bool>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("reminder interval must be at least 1 second")]
    InvalidInterval,
}

impl SettingsPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reminder_interval.is_none()
            && self.sound_enabled.is_none()
            && self.auto_advance.is_none()
    }

    /// Check the patch against settings invariants.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidInterval` if the interval is present
    /// but zero.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.reminder_interval == Some(0) {
            return Err(SettingsError::InvalidInterval);
        }
        Ok(())
    }
}

impl From<&Settings> for SettingsPatch {
    fn from(settings: &Settings) -> Self {
        Self {
            reminder_interval: Some(settings.reminder_interval),
            sound_enabled: Some(settings.sound_enabled),
            auto_advance: Some(settings.auto_advance),
        }
    }
}

impl Settings {
    /// Merge a validated patch over these settings, recognized keys win.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the patch fails validation; the settings
    /// are left untouched in that case.
    pub fn apply(&mut self, patch: SettingsPatch) -> Result<(), SettingsError> {
        patch.validate()?;
        if let Some(interval) = patch.reminder_interval {
            self.reminder_interval = interval;
        }
        if let Some(sound) = patch.sound_enabled {
            self.sound_enabled = sound;
        }
        if let Some(advance) = patch.auto_advance {
            self.auto_advance = advance;
        }
        Ok(())
    }

    /// Defaults with a persisted override merged on top.
    ///
    /// An invalid override is discarded wholesale: the caller gets pure
    /// defaults rather than a partially applied record.
    #[must_use]
    pub fn from_override(patch: Option<SettingsPatch>) -> Self {
        let mut settings = Self::default();
        if let Some(patch) = patch {
            if settings.apply(patch).is_err() {
                return Self::default();
            }
        }
        settings
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_values() {
        let settings = Settings::default();
        assert_eq!(settings.reminder_interval, 300);
        assert!(settings.sound_enabled);
        assert!(settings.auto_advance);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut settings = Settings::default();
        let before = settings.clone();
        settings.apply(SettingsPatch::new()).unwrap();
        assert_eq!(settings, before);
    }

    #[test]
    fn patch_changes_only_named_keys() {
        let mut settings = Settings::default();
        settings
            .apply(SettingsPatch {
                sound_enabled: Some(false),
                ..SettingsPatch::default()
            })
            .unwrap();

        assert!(!settings.sound_enabled);
        assert_eq!(settings.reminder_interval, 300);
        assert!(settings.auto_advance);
    }

    #[test]
    fn zero_interval_is_rejected_and_leaves_settings_untouched() {
        let mut settings = Settings::default();
        let err = settings
            .apply(SettingsPatch {
                reminder_interval: Some(0),
                sound_enabled: Some(false),
                ..SettingsPatch::default()
            })
            .unwrap_err();

        assert_eq!(err, SettingsError::InvalidInterval);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn unknown_keys_are_dropped_silently() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"sound_enabled": false, "theme": "dark"}"#).unwrap();
        assert_eq!(patch.sound_enabled, Some(false));
        assert!(patch.reminder_interval.is_none());
        assert!(patch.auto_advance.is_none());
    }

    #[test]
    fn from_override_merges_subset_over_defaults() {
        let settings = Settings::from_override(Some(SettingsPatch {
            reminder_interval: Some(60),
            ..SettingsPatch::default()
        }));
        assert_eq!(settings.reminder_interval, 60);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn from_override_discards_invalid_override() {
        let settings = Settings::from_override(Some(SettingsPatch {
            reminder_interval: Some(0),
            sound_enabled: Some(false),
            ..SettingsPatch::default()
        }));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn missing_override_yields_pure_defaults() {
        assert_eq!(Settings::from_override(None), Settings::default());
    }

    #[test]
    fn wrong_typed_override_fails_to_parse() {
        // The persisted file `{"sound_enabled": "yes"}` is malformed as a
        // whole; loaders fall back to defaults instead of coercing.
        let parsed = serde_json::from_str::<SettingsPatch>(r#"{"sound_enabled": "yes"}"#);
        assert!(parsed.is_err());
    }
}
