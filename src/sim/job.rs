use std::str::FromStr;

use thiserror::Error;

use crate::{
    core::{Process, ProcessId},
    error::{RecordDefect, SimError},
};

pub type JobId = u64;

/// A workload entry as supplied from outside the simulator. Timing fields are
/// signed so malformed input can be reported instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub priority: i64,
    pub burst_time: i64,
    pub arrival_time: i64,
}

impl Job {
    pub fn new(
        id: JobId,
        name: impl Into<String>,
        priority: i64,
        burst_time: i64,
        arrival_time: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            priority,
            burst_time,
            arrival_time,
        }
    }
}

impl TryFrom<&Job> for Process {
    type Error = SimError;

    fn try_from(job: &Job) -> Result<Self, Self::Error> {
        let id = ProcessId(job.id);
        let malformed = |reason| SimError::MalformedRecord { id, reason };

        let burst =
            u64::try_from(job.burst_time).map_err(|_| malformed(RecordDefect::NegativeBurst))?;
        let arrival =
            u64::try_from(job.arrival_time).map_err(|_| malformed(RecordDefect::NegativeArrival))?;
        let priority =
            u64::try_from(job.priority).map_err(|_| malformed(RecordDefect::NegativePriority))?;

        Ok(Process::new(id, job.name.clone(), priority, burst, arrival))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseJobError {
    #[error("expected `id:name:priority:burst:arrival`, got `{0}`")]
    Shape(String),
    #[error("invalid {field} `{value}`")]
    Number { field: &'static str, value: String },
}

impl FromStr for Job {
    type Err = ParseJobError;

    /// Parses `id:name:priority:burst:arrival`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let &[id, name, priority, burst, arrival] = parts.as_slice() else {
            return Err(ParseJobError::Shape(s.to_owned()));
        };

        fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseJobError> {
            value.trim().parse().map_err(|_| ParseJobError::Number {
                field,
                value: value.to_owned(),
            })
        }

        Ok(Self {
            id: number("id", id)?,
            name: name.to_owned(),
            priority: number("priority", priority)?,
            burst_time: number("burst", burst)?,
            arrival_time: number("arrival", arrival)?,
        })
    }
}
