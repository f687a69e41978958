use log::{info, warn};
use rustc_hash::FxHashSet;

use super::{job::Job, metrics::Metrics};
use crate::{
    core::{Process, ProcessId, RunOutput},
    error::{RecordDefect, Result, SimError},
    scheduler::PolicyKind,
};

#[derive(Debug, Clone)]
pub struct SimReport {
    pub policy: PolicyKind,
    pub output: RunOutput,
    pub metrics: Metrics,
}

/// A validated workload that can be run under any policy, any number of times.
///
/// Runs never modify the held records, so burst times can be edited between
/// runs to compare what-if scenarios.
#[derive(Debug, Clone)]
pub struct Sim {
    processes: Vec<Process>,
}

impl Sim {
    /// Zero-burst jobs are dropped before simulation; anything else malformed
    /// fails the whole workload.
    pub fn new(jobs: impl IntoIterator<Item = Job>) -> Result<Self> {
        let mut processes = Vec::new();
        let mut seen = FxHashSet::default();

        for job in jobs {
            let process = Process::try_from(&job)?;
            if !seen.insert(process.id) {
                return Err(SimError::DuplicateId { id: process.id });
            }
            if process.burst_time == 0 {
                warn!("dropping {} ({}): zero burst time", process.id, process.name);
                continue;
            }
            processes.push(process);
        }

        if processes.is_empty() {
            return Err(SimError::EmptyWorkload);
        }

        info!("workload ready: {} processes", processes.len());
        Ok(Self { processes })
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn set_burst(&mut self, id: ProcessId, burst_time: i64) -> Result<()> {
        let burst = match u64::try_from(burst_time) {
            Ok(0) => {
                return Err(SimError::MalformedRecord {
                    id,
                    reason: RecordDefect::ZeroBurst,
                });
            }
            Ok(burst) => burst,
            Err(_) => {
                return Err(SimError::MalformedRecord {
                    id,
                    reason: RecordDefect::NegativeBurst,
                });
            }
        };

        let process = self
            .processes
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(SimError::UnknownProcess { id })?;
        process.burst_time = burst;
        process.remaining_time = burst;
        Ok(())
    }

    pub fn run(&self, policy: PolicyKind) -> Result<SimReport> {
        let output = policy.run(&self.processes)?;
        let metrics = Metrics::from_run(&output)?;
        info!(
            "{policy}: utilization {:.2}%, avg waiting {:.2}",
            metrics.utilization_percent(),
            metrics.avg_waiting
        );
        Ok(SimReport {
            policy,
            output,
            metrics,
        })
    }

    /// Runs all four policies over the same workload.
    pub fn run_all(&self, quantum: i64) -> Result<Vec<SimReport>> {
        PolicyKind::all(quantum)?
            .into_iter()
            .map(|policy| self.run(policy))
            .collect()
    }
}
