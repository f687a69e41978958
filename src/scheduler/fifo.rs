use super::{Policy, log_run, validate};
use crate::{
    core::{Observer, Process, RunOutput, SchedEvent},
    error::{RecordDefect, Result, SimError},
};

/// First-come-first-served. Runs each process to completion in arrival
/// order, ties kept in input order.
pub struct FifoScheduler;

impl FifoScheduler {
    /// FCFS never revisits a process, so it can consume the caller's records.
    /// They must not carry accounting from an earlier run.
    pub fn run_owned(&self, mut processes: Vec<Process>) -> Result<RunOutput> {
        if let Some(p) = processes.iter().find(|p| !p.is_fresh()) {
            return Err(SimError::MalformedRecord {
                id: p.id,
                reason: RecordDefect::AlreadyRun,
            });
        }
        validate(&processes)?;

        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&i| processes[i].arrival_time);

        let mut observer = Observer::new();
        let mut now = 0;
        for index in order {
            let process = &mut processes[index];
            if now < process.arrival_time {
                observer.observe(SchedEvent::Idle {
                    from: now,
                    to: process.arrival_time,
                });
                now = process.arrival_time;
            }

            let burst = process.burst_time;
            process.mark_started(now);
            process.execute(burst);
            observer.observe(SchedEvent::Dispatch {
                process: process.id,
                from: now,
                to: now + burst,
            });
            now += burst;

            process.mark_completed(now);
            observer.observe(SchedEvent::Completed {
                process: process.id,
                at: now,
            });
        }

        let trace = observer.finish(&processes);
        let out = RunOutput { processes, trace };
        log_run(self.name(), &out);
        Ok(out)
    }
}

impl Policy for FifoScheduler {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn run(&self, processes: &[Process]) -> Result<RunOutput> {
        self.run_owned(processes.iter().map(Process::fresh_copy).collect())
    }
}
