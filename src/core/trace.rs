use std::fmt;

use super::state::{ProcessId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceLabel {
    Idle,
    Process(ProcessId),
}

impl fmt::Display for TraceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("IDLE"),
            Self::Process(id) => write!(f, "{id}"),
        }
    }
}

/// One contiguous interval `[start, end)` during which `label` held the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub label: TraceLabel,
    pub start: Ticks,
    pub end: Ticks,
}

impl Segment {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.label == TraceLabel::Idle
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}) {}", self.start, self.end, self.label)
    }
}

/// Gantt trace of a run.
///
/// Appending a segment that continues the trailing one with the same label
/// extends it instead, so adjacent segments never share a label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    segments: Vec<Segment>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `[start, end)` for `label`. Empty or backwards intervals
    /// occupy no CPU time and leave the trace unchanged.
    pub fn append(&mut self, label: TraceLabel, start: Ticks, end: Ticks) {
        if end <= start {
            return;
        }

        if let Some(last) = self.segments.last_mut() {
            debug_assert!(
                start >= last.end,
                "segment {label} at {start} overlaps trailing segment ending at {}",
                last.end
            );
            if last.label == label && last.end == start {
                last.end = end;
                return;
            }
        }

        self.segments.push(Segment { label, start, end });
    }

    pub fn idle(&mut self, start: Ticks, end: Ticks) {
        self.append(TraceLabel::Idle, start, end);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn end_time(&self) -> Ticks {
        self.segments.iter().map(|s| s.end).max().unwrap_or(0)
    }

    pub fn idle_time(&self) -> Ticks {
        self.segments
            .iter()
            .filter(|s| s.is_idle())
            .map(Segment::duration)
            .sum()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
