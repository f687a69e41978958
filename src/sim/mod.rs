pub mod driver;
pub mod job;
pub mod metrics;
pub mod workload;

pub use driver::{Sim, SimReport};
pub use job::{Job, JobId, ParseJobError};
pub use metrics::Metrics;
