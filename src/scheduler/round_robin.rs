use std::{collections::VecDeque, num::NonZeroU64};

use rustc_hash::FxHashSet;

use super::{Policy, log_run, validate};
use crate::{
    core::{Observer, Process, RunOutput, SchedEvent, Ticks},
    error::{Result, SimError},
};

/// Round robin over a FIFO ready queue with a fixed quantum.
///
/// Processes that arrive while another runs are queued in arrival order, and
/// always ahead of the process whose quantum just expired.
pub struct RoundRobinScheduler {
    quantum: NonZeroU64,
}

impl RoundRobinScheduler {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self { quantum }
    }

    pub fn try_new(quantum: i64) -> Result<Self> {
        u64::try_from(quantum)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self::new)
            .ok_or(SimError::InvalidQuantum { quantum })
    }

    pub fn quantum(&self) -> NonZeroU64 {
        self.quantum
    }
}

impl Policy for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "Round Robin"
    }

    fn run(&self, processes: &[Process]) -> Result<RunOutput> {
        validate(processes)?;
        let out = RoundRobinRun::new(self.quantum.get(), processes).run();
        log_run(self.name(), &out);
        Ok(out)
    }
}

struct RoundRobinRun {
    quantum: Ticks,
    processes: Vec<Process>,
    // Indices into `processes`, sorted by arrival (stable on input order)
    by_arrival: Vec<usize>,
    queue: VecDeque<usize>,
    queued: FxHashSet<usize>,
    observer: Observer,
    now: Ticks,
    completed: usize,
}

impl RoundRobinRun {
    fn new(quantum: Ticks, input: &[Process]) -> Self {
        let processes: Vec<Process> = input.iter().map(Process::fresh_copy).collect();
        let mut by_arrival: Vec<usize> = (0..processes.len()).collect();
        by_arrival.sort_by_key(|&i| processes[i].arrival_time);

        let mut run = Self {
            quantum,
            processes,
            by_arrival,
            queue: VecDeque::new(),
            queued: FxHashSet::default(),
            observer: Observer::new(),
            now: 0,
            completed: 0,
        };

        for i in 0..run.by_arrival.len() {
            let index = run.by_arrival[i];
            if run.processes[index].arrival_time == 0 {
                run.push_back(index);
            }
        }

        run
    }

    fn run(mut self) -> RunOutput {
        while self.completed < self.processes.len() || !self.queue.is_empty() {
            if self.queue.is_empty() && !self.idle_until_next_arrival() {
                break;
            }

            let Some(index) = self.pop_front() else {
                break;
            };
            self.run_slice(index);
        }

        let trace = self.observer.finish(&self.processes);
        RunOutput {
            processes: self.processes,
            trace,
        }
    }

    fn push_back(&mut self, index: usize) {
        let inserted = self.queued.insert(index);
        debug_assert!(inserted, "{} queued twice", self.processes[index].id);
        self.queue.push_back(index);
    }

    fn pop_front(&mut self) -> Option<usize> {
        let index = self.queue.pop_front()?;
        self.queued.remove(&index);
        Some(index)
    }

    // Jumps to the earliest pending arrival and queues it.
    fn idle_until_next_arrival(&mut self) -> bool {
        let next = self
            .processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.remaining_time > 0)
            .min_by_key(|&(i, p)| (p.arrival_time, i))
            .map(|(i, _)| i);

        let Some(next) = next else {
            debug_assert!(false, "ready queue empty with no pending arrivals");
            return false;
        };

        let arrival = self.processes[next].arrival_time;
        if arrival > self.now {
            self.observer.observe(SchedEvent::Idle {
                from: self.now,
                to: arrival,
            });
            self.now = arrival;
        }
        self.push_back(next);
        true
    }

    fn run_slice(&mut self, index: usize) {
        let from = self.now;
        let process = &mut self.processes[index];
        process.mark_started(from);
        let slice = self.quantum.min(process.remaining_time);
        let finished = process.execute(slice);
        let id = process.id;

        self.now += slice;
        self.observer.observe(SchedEvent::Dispatch {
            process: id,
            from,
            to: self.now,
        });

        self.admit_arrivals(index);

        if finished {
            self.processes[index].mark_completed(self.now);
            self.completed += 1;
            self.observer.observe(SchedEvent::Completed {
                process: id,
                at: self.now,
            });
        } else {
            self.push_back(index);
        }
    }

    // Queue everything ready by now, except the process that just ran.
    fn admit_arrivals(&mut self, just_ran: usize) {
        for i in 0..self.by_arrival.len() {
            let index = self.by_arrival[i];
            if index != just_ran
                && self.processes[index].is_ready_at(self.now)
                && !self.queued.contains(&index)
            {
                self.push_back(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessId;

    fn p(id: u64, burst: u64, arrival: u64) -> Process {
        Process::new(ProcessId(id), format!("p{id}"), 0, burst, arrival)
    }

    fn rr(quantum: i64) -> RoundRobinScheduler {
        RoundRobinScheduler::try_new(quantum).unwrap()
    }

    #[test]
    fn equal_jobs_rotate_each_quantum() {
        let out = rr(2).run(&[p(1, 5, 0), p(2, 5, 0)]).unwrap();

        assert_eq!(
            out.trace.to_string(),
            "[0..2) P1 [2..4) P2 [4..6) P1 [6..8) P2 [8..9) P1 [9..10) P2"
        );
        assert_eq!(out.processes[0].completion_time, Some(9));
        assert_eq!(out.processes[1].completion_time, Some(10));
    }

    #[test]
    fn arrivals_during_a_quantum_queue_ahead_of_the_preempted_process() {
        let out = rr(3).run(&[p(1, 4, 0), p(3, 1, 2), p(2, 2, 1)]).unwrap();

        assert_eq!(
            out.trace.to_string(),
            "[0..3) P1 [3..5) P2 [5..6) P3 [6..7) P1"
        );
        assert_eq!(out.processes[0].waiting_time, Some(3));
    }

    #[test]
    fn empty_queue_idles_until_next_arrival() {
        let out = rr(4).run(&[p(1, 2, 0), p(2, 1, 5)]).unwrap();
        assert_eq!(out.trace.to_string(), "[0..2) P1 [2..5) IDLE [5..6) P2");
    }

    #[test]
    fn simultaneous_late_arrivals_join_after_first_slice() {
        let out = rr(1).run(&[p(1, 2, 3), p(2, 2, 3)]).unwrap();
        assert_eq!(
            out.trace.to_string(),
            "[0..3) IDLE [3..4) P1 [4..5) P2 [5..6) P1 [6..7) P2"
        );
    }

    #[test]
    fn lone_process_keeps_running_across_quanta() {
        let out = rr(2).run(&[p(1, 5, 0)]).unwrap();
        assert_eq!(out.trace.to_string(), "[0..5) P1");
    }

    #[test]
    fn rejects_non_positive_quantum() {
        assert!(matches!(
            RoundRobinScheduler::try_new(0),
            Err(SimError::InvalidQuantum { quantum: 0 })
        ));
    }
}
