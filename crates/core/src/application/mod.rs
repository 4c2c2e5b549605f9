// Application Layer - Use Cases and Business Logic

pub mod aggregator;
pub mod classifier;
pub mod dispatcher;
pub mod monitor;
pub mod policy;

// Re-exports
pub use aggregator::{aggregate, ClusterCounts, UtilizationFigures};
pub use classifier::{Classification, LevelChange, LoadClassifier};
pub use dispatcher::{DispatchOutcome, NotificationDispatcher};
pub use monitor::{MonitorConfig, MonitorHandle, MonitorLoop, MonitorReport};
pub use policy::{CooldownPolicy, HysteresisPolicy, NotificationPolicy};
