use log::trace;

use super::{
    event::SchedEvent,
    state::{Process, Ticks},
    trace::{Trace, TraceLabel},
};

/// Collects the events of one run into a [`Trace`] and checks that they
/// describe a single CPU moving forward in time.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    now: Ticks,
    trace: Trace,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, event: SchedEvent) {
        self.step += 1;
        trace!("step={} {:?}", self.step, event);

        match event {
            SchedEvent::Idle { from, to } => {
                debug_assert_eq!(from, self.now, "idle gap must start at the current time");
                self.trace.idle(from, to);
                self.now = to;
            }
            SchedEvent::Dispatch { process, from, to } => {
                debug_assert_eq!(
                    from, self.now,
                    "{process} dispatched at {from} but the clock reads {}",
                    self.now
                );
                self.trace.append(TraceLabel::Process(process), from, to);
                self.now = to;
            }
            SchedEvent::Completed { process, at } => {
                debug_assert_eq!(
                    at, self.now,
                    "{process} completed at {at} but the clock reads {}",
                    self.now
                );
            }
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    /// Ends the run, checking terminal accounting against the trace.
    pub fn finish(self, processes: &[Process]) -> Trace {
        for p in processes {
            debug_assert!(p.is_complete(), "{} left incomplete", p.id);
            debug_assert!(
                p.completion_time <= Some(self.now),
                "{} completed after the end of the trace",
                p.id
            );
        }

        let segments = self.trace.segments();
        for pair in segments.windows(2) {
            debug_assert_ne!(pair[0].label, pair[1].label, "adjacent segments share a label");
            debug_assert_eq!(pair[0].end, pair[1].start, "trace is not contiguous");
        }

        self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessId;

    #[test]
    fn events_build_a_coalesced_trace() {
        let mut observer = Observer::new();
        observer.observe(SchedEvent::Idle { from: 0, to: 2 });
        observer.observe(SchedEvent::Dispatch {
            process: ProcessId(7),
            from: 2,
            to: 3,
        });
        observer.observe(SchedEvent::Dispatch {
            process: ProcessId(7),
            from: 3,
            to: 4,
        });
        observer.observe(SchedEvent::Completed {
            process: ProcessId(7),
            at: 4,
        });

        assert_eq!(observer.steps(), 4);
        assert_eq!(observer.now(), 4);

        let mut p = Process::new(ProcessId(7), "cron", 0, 2, 2);
        p.mark_started(2);
        p.execute(2);
        p.mark_completed(4);

        let trace = observer.finish(&[p]);
        assert_eq!(trace.to_string(), "[0..2) IDLE [2..4) P7");
    }
}
