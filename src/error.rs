use thiserror::Error;

use crate::core::ProcessId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDefect {
    NegativeBurst,
    NegativeArrival,
    NegativePriority,
    ZeroBurst,
    AlreadyRun,
    TimeOverflow,
}

impl std::fmt::Display for RecordDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NegativeBurst => "negative burst time",
            Self::NegativeArrival => "negative arrival time",
            Self::NegativePriority => "negative priority",
            Self::ZeroBurst => "zero burst time",
            Self::AlreadyRun => "accounting already written by an earlier run",
            Self::TimeOverflow => "workload runs past the end of simulated time",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("round robin quantum must be positive, got {quantum}")]
    InvalidQuantum { quantum: i64 },

    #[error("workload has no process with a positive burst time")]
    EmptyWorkload,

    #[error("malformed record {id}: {reason}")]
    MalformedRecord { id: ProcessId, reason: RecordDefect },

    #[error("no process {id} in the workload")]
    UnknownProcess { id: ProcessId },

    #[error("process id {id} appears more than once")]
    DuplicateId { id: ProcessId },
}

pub type Result<T> = std::result::Result<T, SimError>;
