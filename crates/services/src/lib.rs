#![forbid(unsafe_code)]

pub mod alert;
pub mod catalog_service;
pub mod error;
pub mod trainer_service;

pub use trainer_core::Clock;

pub use alert::{AlertSink, SilentAlert, TerminalBell};
pub use catalog_service::CatalogService;
pub use error::TrainerError;
pub use trainer_service::{TrainerService, TrainerSnapshot};
