#![forbid(unsafe_code)]

pub mod model;
pub mod time;

pub use model::{
    Catalog, CurrentReminder, Drill, DrillId, History, Progress, Settings, SettingsError,
    SettingsPatch,
};
pub use time::Clock;
