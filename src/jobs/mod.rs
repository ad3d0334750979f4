//! Job model: kinds, parameters, execution and the command shell

pub mod context;
pub mod handlers;
pub mod shell;
pub mod types;

pub use context::JobContext;
pub use shell::JobShell;
pub use types::{JobDescriptor, JobKind, JobParams, Timeframe};
