mod event_log;
mod resource_store;
mod settlement;
mod work_queue;

pub use event_log::{EventLog, LogCategory, LogEntry};
pub use resource_store::{ResourceStore, Shortfall, TickDeltas};
pub use settlement::{AssignError, Settlement};
pub use work_queue::{WorkOrder, WorkQueue};
