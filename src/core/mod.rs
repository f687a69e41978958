pub mod driver;
pub mod event;
pub mod observer;
pub mod state;
pub mod trace;

pub use driver::{RankPolicy, RunOutput, TickCore};
pub use event::SchedEvent;
pub use observer::Observer;
pub use state::{Priority, Process, ProcessId, Ticks};
pub use trace::{Segment, Trace, TraceLabel};
