pub mod aggregate;
pub mod change_set;
pub mod convert;
pub mod fetch;
pub mod orchestrator;

pub use orchestrator::{SyncReport, SyncRunner};
