use crate::core::{ProcessId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedEvent {
    // CPU had nothing ready over [from, to)
    Idle { from: Ticks, to: Ticks },
    Dispatch {
        process: ProcessId,
        from: Ticks,
        to: Ticks,
    },
    Completed { process: ProcessId, at: Ticks },
}
