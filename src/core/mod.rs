//! Core application primitives: scheduler, tick runtime, HTTP surface

pub mod http;
pub mod runtime;
pub mod scheduler;

pub use http::{create_router, AppState};
pub use runtime::{AlertDispatcher, AlertSink, LogAlertSink};
pub use scheduler::{InMemoryScheduler, ScheduledJob, Scheduler, TickHandler};
