pub mod fifo;
pub mod priq;
pub mod round_robin;
pub mod srtf;

use std::{fmt, num::NonZeroU64};

use log::debug;
use rustc_hash::FxHashSet;

use crate::{
    core::{Process, RunOutput, Ticks},
    error::{RecordDefect, Result, SimError},
};
pub use fifo::FifoScheduler;
pub use priq::PriqScheduler;
pub use round_robin::RoundRobinScheduler;
pub use srtf::SrtfScheduler;

/// A scheduling policy over a single simulated CPU.
///
/// `run` never touches the caller's records: it simulates on fresh copies and
/// returns them with terminal accounting, in input order.
pub trait Policy {
    fn name(&self) -> &'static str;

    fn run(&self, processes: &[Process]) -> Result<RunOutput>;
}

/// Rejects input no policy can simulate to completion.
pub fn validate(processes: &[Process]) -> Result<()> {
    if processes.iter().all(|p| p.burst_time == 0) {
        return Err(SimError::EmptyWorkload);
    }

    let malformed = |p: &Process, reason| SimError::MalformedRecord { id: p.id, reason };

    let mut seen = FxHashSet::default();
    let mut total_burst: Ticks = 0;
    for p in processes {
        if p.burst_time == 0 {
            return Err(malformed(p, RecordDefect::ZeroBurst));
        }
        if !seen.insert(p.id) {
            return Err(SimError::DuplicateId { id: p.id });
        }
        total_burst = total_burst
            .checked_add(p.burst_time)
            .ok_or_else(|| malformed(p, RecordDefect::TimeOverflow))?;
    }

    // The run can last no longer than the latest arrival plus all the work.
    if let Some(last) = processes.iter().max_by_key(|p| p.arrival_time) {
        if last.arrival_time.checked_add(total_burst).is_none() {
            return Err(malformed(last, RecordDefect::TimeOverflow));
        }
    }

    Ok(())
}

pub(crate) fn log_run(policy: &str, out: &RunOutput) {
    debug!(
        "{policy}: {} processes, {} segments, finished at t={}",
        out.processes.len(),
        out.trace.len(),
        out.trace.end_time()
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Fcfs,
    Srtf,
    Priority,
    RoundRobin { quantum: NonZeroU64 },
}

impl PolicyKind {
    pub fn round_robin(quantum: i64) -> Result<Self> {
        RoundRobinScheduler::try_new(quantum).map(|rr| Self::RoundRobin {
            quantum: rr.quantum(),
        })
    }

    /// All four policies, round robin using `quantum`.
    pub fn all(quantum: i64) -> Result<[Self; 4]> {
        Ok([
            Self::Fcfs,
            Self::Srtf,
            Self::Priority,
            Self::round_robin(quantum)?,
        ])
    }

    pub fn run(&self, processes: &[Process]) -> Result<RunOutput> {
        match *self {
            Self::Fcfs => FifoScheduler.run(processes),
            Self::Srtf => SrtfScheduler.run(processes),
            Self::Priority => PriqScheduler.run(processes),
            Self::RoundRobin { quantum } => RoundRobinScheduler::new(quantum).run(processes),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => f.write_str(FifoScheduler.name()),
            Self::Srtf => f.write_str(SrtfScheduler.name()),
            Self::Priority => f.write_str(PriqScheduler.name()),
            Self::RoundRobin { quantum } => write!(f, "Round Robin (q={quantum})"),
        }
    }
}
