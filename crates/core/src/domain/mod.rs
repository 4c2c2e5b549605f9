// Domain Layer - Pure data model and value types

pub mod alert;
pub mod error;
pub mod lifecycle;
pub mod load;
pub mod snapshot;

// Re-exports
pub use alert::{Alert, AlertSeverity};
pub use error::DomainError;
pub use lifecycle::{LifecycleEvent, MonitorState};
pub use load::{LoadLevel, Thresholds};
pub use snapshot::{StatsSnapshot, WorkerStatus};
