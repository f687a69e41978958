use std::fmt;

use average::Estimate;

use crate::{
    core::{RunOutput, Ticks},
    error::{Result, SimError},
};

/// Aggregate performance of one completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub process_count: usize,
    pub total_time: Ticks,
    pub idle_time: Ticks,
    /// Busy fraction of `total_time`, in `[0, 1]`.
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
}

impl Metrics {
    pub fn from_run(out: &RunOutput) -> Result<Self> {
        if out.processes.is_empty() {
            return Err(SimError::EmptyWorkload);
        }

        let total_time = out.trace.end_time();
        let idle_time = out.trace.idle_time();
        let (cpu_utilization, throughput) = if total_time == 0 {
            (0.0, 0.0)
        } else {
            (
                (total_time - idle_time) as f64 / total_time as f64,
                out.processes.len() as f64 / total_time as f64,
            )
        };

        let procs = &out.processes;
        Ok(Self {
            process_count: procs.len(),
            total_time,
            idle_time,
            cpu_utilization,
            throughput,
            avg_turnaround: avg(procs.iter().filter_map(|p| p.turnaround_time)),
            avg_waiting: avg(procs.iter().filter_map(|p| p.waiting_time)),
            avg_response: avg(procs.iter().filter_map(|p| p.response_time())),
        })
    }

    pub fn utilization_percent(&self) -> f64 {
        self.cpu_utilization * 100.0
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CPU utilization: {:.2}%", self.utilization_percent())?;
        writeln!(f, "Throughput:      {:.3} proc/tick", self.throughput)?;
        writeln!(f, "Avg turnaround:  {:.2} ticks", self.avg_turnaround)?;
        writeln!(f, "Avg waiting:     {:.2} ticks", self.avg_waiting)?;
        write!(f, "Avg response:    {:.2} ticks", self.avg_response)
    }
}

fn avg(iter: impl Iterator<Item = Ticks>) -> f64 {
    iter.map(|t| t as f64).collect::<average::Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{Process, ProcessId},
        scheduler::{FifoScheduler, Policy},
    };

    #[test]
    fn fcfs_with_idle_gap() {
        let input = [
            Process::new(ProcessId(1), "a", 0, 4, 0),
            Process::new(ProcessId(2), "b", 0, 2, 6),
        ];
        let out = FifoScheduler.run(&input).unwrap();
        let m = Metrics::from_run(&out).unwrap();

        assert_eq!(m.process_count, 2);
        assert_eq!(m.total_time, 8);
        assert_eq!(m.idle_time, 2);
        assert!((m.cpu_utilization - 0.75).abs() < 1e-9);
        assert!((m.utilization_percent() - 75.0).abs() < 1e-9);
        assert!((m.throughput - 0.25).abs() < 1e-9);
        assert!((m.avg_turnaround - 3.0).abs() < 1e-9);
        assert!((m.avg_waiting - 0.0).abs() < 1e-9);
        assert!((m.avg_response - 0.0).abs() < 1e-9);
    }

    #[test]
    fn fully_busy_run_is_fully_utilized() {
        let input = [
            Process::new(ProcessId(1), "a", 0, 5, 0),
            Process::new(ProcessId(2), "b", 0, 3, 0),
        ];
        let m = Metrics::from_run(&FifoScheduler.run(&input).unwrap()).unwrap();
        assert_eq!(m.cpu_utilization, 1.0);
        assert!((m.avg_waiting - 2.5).abs() < 1e-9);
        assert!((m.avg_turnaround - 6.5).abs() < 1e-9);
    }

    #[test]
    fn empty_run_is_rejected() {
        let out = RunOutput {
            processes: Vec::new(),
            trace: Default::default(),
        };
        assert_eq!(Metrics::from_run(&out), Err(SimError::EmptyWorkload));
    }
}
