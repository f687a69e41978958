use std::cmp::Ordering;

use keyed_priority_queue::KeyedPriorityQueue;

use super::{
    event::SchedEvent,
    observer::Observer,
    state::{Process, Ticks},
    trace::Trace,
};

/// Processes advanced to terminal accounting, plus the trace that got them there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub processes: Vec<Process>,
    pub trace: Trace,
}

/// Selection key for the tick driver. Among ready processes the one with the
/// smallest rank runs for the next tick; ties go to the earliest in input order.
pub trait RankPolicy {
    fn rank(&self, process: &Process) -> u64;
}

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
struct Rank {
    key: u64,
    input_order: usize,
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.key, other.input_order).cmp(&(self.key, self.input_order))
    }
}

/// Unit-tick preemptive simulation shared by the ranked policies.
///
/// Works on its own copy of `input`. Every tick re-selects among the ready
/// processes, so a newly arrived process with a better rank preempts at the
/// next tick boundary. Idle gaps are skipped in one jump.
pub struct TickCore<'a, R: RankPolicy> {
    ranker: &'a R,
    processes: Vec<Process>,
    // Indices into `processes`, sorted by arrival (stable on input order)
    arrivals: Vec<usize>,
    arrival_cursor: usize,
    ready: KeyedPriorityQueue<usize, Rank>,
    observer: Observer,
    now: Ticks,
    completed: usize,
}

impl<'a, R: RankPolicy> TickCore<'a, R> {
    pub fn new(ranker: &'a R, input: &[Process]) -> Self {
        let processes: Vec<Process> = input.iter().map(Process::fresh_copy).collect();
        let mut arrivals: Vec<usize> = (0..processes.len()).collect();
        arrivals.sort_by_key(|&i| processes[i].arrival_time);

        Self {
            ranker,
            processes,
            arrivals,
            arrival_cursor: 0,
            ready: KeyedPriorityQueue::new(),
            observer: Observer::new(),
            now: 0,
            completed: 0,
        }
    }

    pub fn run(mut self) -> RunOutput {
        while self.completed < self.processes.len() {
            self.handle_arrivals();

            match self.ready.pop() {
                Some((index, _)) => self.tick(index),
                None => {
                    if !self.idle_until_next_arrival() {
                        break;
                    }
                }
            }
        }

        let trace = self.observer.finish(&self.processes);
        RunOutput {
            processes: self.processes,
            trace,
        }
    }

    fn handle_arrivals(&mut self) {
        let now = self.now;
        // Contiguous, since arrivals are sorted
        while let Some(&index) = self.arrivals.get(self.arrival_cursor) {
            if self.processes[index].arrival_time > now {
                break;
            }
            self.enqueue(index);
            self.arrival_cursor += 1;
        }
    }

    fn enqueue(&mut self, index: usize) {
        let rank = Rank {
            key: self.ranker.rank(&self.processes[index]),
            input_order: index,
        };
        self.ready.push(index, rank);
    }

    // Returns false if nothing is left to arrive
    fn idle_until_next_arrival(&mut self) -> bool {
        let Some(&next) = self.arrivals.get(self.arrival_cursor) else {
            debug_assert!(false, "ready queue empty with no pending arrivals");
            return false;
        };

        let from = self.now;
        let to = self.processes[next].arrival_time;
        debug_assert!(to > from, "pending arrival at {to} is not in the future");
        self.observer.observe(SchedEvent::Idle { from, to });
        self.now = to;
        true
    }

    fn tick(&mut self, index: usize) {
        let from = self.now;
        let process = &mut self.processes[index];
        process.mark_started(from);
        let finished = process.execute(1);
        let id = process.id;

        self.now += 1;
        self.observer.observe(SchedEvent::Dispatch {
            process: id,
            from,
            to: self.now,
        });

        if finished {
            self.processes[index].mark_completed(self.now);
            self.completed += 1;
            self.observer.observe(SchedEvent::Completed {
                process: id,
                at: self.now,
            });
        } else {
            self.enqueue(index);
        }
    }
}
