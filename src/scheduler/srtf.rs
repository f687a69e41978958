use super::{Policy, log_run, validate};
use crate::{
    core::{Process, RankPolicy, RunOutput, TickCore},
    error::Result,
};

/// Preemptive shortest-job-first: the ready process with the least remaining
/// work runs each tick. Equal remaining work goes to the earliest in input
/// order, even if that preempts the process that ran the previous tick.
pub struct SrtfScheduler;

impl RankPolicy for SrtfScheduler {
    fn rank(&self, process: &Process) -> u64 {
        process.remaining_time
    }
}

impl Policy for SrtfScheduler {
    fn name(&self) -> &'static str {
        "SJF (Preemptive)"
    }

    fn run(&self, processes: &[Process]) -> Result<RunOutput> {
        validate(processes)?;
        let out = TickCore::new(self, processes).run();
        log_run(self.name(), &out);
        Ok(out)
    }
}
