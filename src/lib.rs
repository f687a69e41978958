pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Process, ProcessId, RunOutput, Segment, Trace, TraceLabel};
pub use error::{RecordDefect, SimError};
pub use scheduler::{Policy, PolicyKind};
pub use sim::{Job, Metrics, Sim, SimReport};
