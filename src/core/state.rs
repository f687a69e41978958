use std::fmt;

pub type Ticks = u64;
pub type Priority = u64;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy, Clone)]
pub struct ProcessId(pub u64);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Per-process scheduling state.
///
/// Timing attributes are fixed at construction. The accounting fields start
/// unset and are written exactly once by a policy: `start_time` on first
/// dispatch, the rest when `remaining_time` reaches zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub id: ProcessId,
    // Display only; no policy reads it.
    pub name: String,
    pub priority: Priority,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
}

impl Process {
    pub fn new(
        id: ProcessId,
        name: impl Into<String>,
        priority: Priority,
        burst_time: Ticks,
        arrival_time: Ticks,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            priority,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
        }
    }

    /// Copy of the timing attributes with accounting reset, for a new run.
    pub fn fresh_copy(&self) -> Self {
        Self::new(
            self.id,
            self.name.clone(),
            self.priority,
            self.burst_time,
            self.arrival_time,
        )
    }

    /// No accounting has been written yet.
    pub fn is_fresh(&self) -> bool {
        self.remaining_time == self.burst_time
            && self.start_time.is_none()
            && self.completion_time.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0 && self.completion_time.is_some()
    }

    pub fn is_ready_at(&self, now: Ticks) -> bool {
        self.arrival_time <= now && self.remaining_time > 0
    }

    pub fn response_time(&self) -> Option<Ticks> {
        self.start_time.map(|start| start - self.arrival_time)
    }

    /// Records the first dispatch; later dispatches leave it untouched.
    pub fn mark_started(&mut self, now: Ticks) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Consumes `ticks` of CPU time. Returns true once nothing remains.
    pub fn execute(&mut self, ticks: Ticks) -> bool {
        debug_assert!(
            ticks <= self.remaining_time,
            "{} executed for {ticks} ticks with only {} remaining",
            self.id,
            self.remaining_time
        );
        self.remaining_time -= ticks;
        self.remaining_time == 0
    }

    pub fn mark_completed(&mut self, completion_time: Ticks) {
        debug_assert_eq!(
            self.remaining_time, 0,
            "{} completed with work remaining",
            self.id
        );
        debug_assert!(
            self.completion_time.is_none(),
            "{} completed twice",
            self.id
        );
        debug_assert!(
            self.arrival_time
                .checked_add(self.burst_time)
                .is_some_and(|earliest| completion_time >= earliest),
            "{} completed before it could have run to the end",
            self.id
        );

        let turnaround = completion_time - self.arrival_time;
        self.completion_time = Some(completion_time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
    }
}
