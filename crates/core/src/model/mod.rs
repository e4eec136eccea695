mod history;
mod item;
mod progress;
mod reminder;
mod settings;

pub use history::{HISTORY_CAP, History};
pub use item::{Catalog, Drill, DrillId};
pub use progress::Progress;
pub use reminder::CurrentReminder;
pub use settings::{DEFAULT_REMINDER_INTERVAL, Settings, SettingsError, SettingsPatch};
