use std::thread;

use cpu_sched_sim::{
    Metrics, Policy, PolicyKind, Process, ProcessId, Segment, SimError, TraceLabel,
    scheduler::{FifoScheduler, PriqScheduler, RoundRobinScheduler, SrtfScheduler},
};

fn proc(id: u64, burst: u64, arrival: u64) -> Process {
    Process::new(ProcessId(id), format!("p{id}"), 0, burst, arrival)
}

fn seg(label: Option<u64>, start: u64, end: u64) -> Segment {
    Segment {
        label: label.map_or(TraceLabel::Idle, |id| TraceLabel::Process(ProcessId(id))),
        start,
        end,
    }
}

#[test]
fn fcfs_same_arrival_follows_input_order() {
    let out = FifoScheduler.run(&[proc(1, 5, 0), proc(2, 3, 0)]).unwrap();

    assert_eq!(out.trace.segments(), &[seg(Some(1), 0, 5), seg(Some(2), 5, 8)]);
    assert_eq!(out.processes[0].waiting_time, Some(0));
    assert_eq!(out.processes[1].waiting_time, Some(5));
}

#[test]
fn srtf_shorter_arrival_preempts() {
    let out = SrtfScheduler.run(&[proc(1, 8, 0), proc(2, 4, 1)]).unwrap();

    assert_eq!(
        &out.trace.segments()[..3],
        &[seg(Some(1), 0, 1), seg(Some(2), 1, 5), seg(Some(1), 5, 12)]
    );
}

#[test]
fn round_robin_rotates_with_short_final_slices() {
    let rr = RoundRobinScheduler::try_new(2).unwrap();
    let out = rr.run(&[proc(1, 5, 0), proc(2, 5, 0)]).unwrap();

    assert_eq!(
        out.trace.segments(),
        &[
            seg(Some(1), 0, 2),
            seg(Some(2), 2, 4),
            seg(Some(1), 4, 6),
            seg(Some(2), 6, 8),
            seg(Some(1), 8, 9),
            seg(Some(2), 9, 10),
        ]
    );
}

#[test]
fn lone_late_arrival_idles_from_zero_under_every_policy() {
    for kind in PolicyKind::all(3).unwrap() {
        let out = kind.run(&[proc(4, 5, 10)]).unwrap();

        assert_eq!(
            out.trace.segments(),
            &[seg(None, 0, 10), seg(Some(4), 10, 15)],
            "{kind}"
        );
        assert_eq!(out.processes[0].waiting_time, Some(0), "{kind}");
        assert_eq!(out.processes[0].start_time, Some(10), "{kind}");

        let metrics = Metrics::from_run(&out).unwrap();
        assert!((metrics.cpu_utilization - 1.0 / 3.0).abs() < 1e-9);
    }
}

#[test]
fn priority_preempts_on_urgent_arrival() {
    let input = [
        Process::new(ProcessId(1), "batch", 4, 4, 0),
        Process::new(ProcessId(2), "irq", 0, 1, 2),
    ];
    let out = PriqScheduler.run(&input).unwrap();

    assert_eq!(
        out.trace.segments(),
        &[seg(Some(1), 0, 2), seg(Some(2), 2, 3), seg(Some(1), 3, 5)]
    );
}

#[test]
fn caller_records_are_untouched() {
    let input = vec![proc(1, 3, 0), proc(2, 2, 1), proc(3, 4, 2)];
    let snapshot = input.clone();

    for kind in PolicyKind::all(1).unwrap() {
        kind.run(&input).unwrap();
        assert_eq!(input, snapshot);
    }
}

#[test]
fn repeated_runs_are_deterministic() {
    let input = vec![proc(1, 6, 0), proc(2, 2, 1), proc(3, 6, 1), proc(4, 1, 9)];
    for kind in PolicyKind::all(2).unwrap() {
        assert_eq!(kind.run(&input).unwrap(), kind.run(&input).unwrap());
    }
}

#[test]
fn concurrent_runs_share_input_safely() {
    let input: Vec<Process> = (1..=12).map(|i| proc(i, i % 5 + 1, i / 2)).collect();
    let expected: Vec<_> = PolicyKind::all(3)
        .unwrap()
        .iter()
        .map(|kind| kind.run(&input).unwrap())
        .collect();

    thread::scope(|s| {
        let handles: Vec<_> = PolicyKind::all(3)
            .unwrap()
            .into_iter()
            .map(|kind| {
                let input = &input;
                s.spawn(move || kind.run(input).unwrap())
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn bad_input_fails_fast() {
    assert_eq!(FifoScheduler.run(&[]), Err(SimError::EmptyWorkload));
    assert_eq!(
        PolicyKind::round_robin(-1),
        Err(SimError::InvalidQuantum { quantum: -1 })
    );
}
