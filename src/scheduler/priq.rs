use super::{Policy, log_run, validate};
use crate::{
    core::{Process, RankPolicy, RunOutput, TickCore},
    error::Result,
};

/// Preemptive priority; a lower value is more urgent. Re-evaluated every tick,
/// so a more urgent arrival preempts at the next tick boundary.
pub struct PriqScheduler;

impl RankPolicy for PriqScheduler {
    fn rank(&self, process: &Process) -> u64 {
        process.priority
    }
}

impl Policy for PriqScheduler {
    fn name(&self) -> &'static str {
        "Priority (Preemptive)"
    }

    fn run(&self, processes: &[Process]) -> Result<RunOutput> {
        validate(processes)?;
        let out = TickCore::new(self, processes).run();
        log_run(self.name(), &out);
        Ok(out)
    }
}
