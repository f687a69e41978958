use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use cpu_sched_sim::{
    Job, PolicyKind, ProcessId, Sim, SimError, SimReport,
    sim::workload::{bernoulli_jobs, snapshot_jobs},
};
use log::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Fcfs,
    Srtf,
    Priority,
    Rr,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WorkloadArg {
    /// Every job arrives at t=0, like a process-table snapshot
    Snapshot,
    /// Jobs trickle in over time
    Bernoulli,
}

/// Simulate CPU scheduling policies and report the Gantt trace and metrics.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, value_enum, default_value_t = PolicyArg::All)]
    policy: PolicyArg,

    /// Round robin time quantum
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    quantum: i64,

    /// Manual workload entry `id:name:priority:burst:arrival` (repeatable)
    #[arg(long = "job", allow_hyphen_values = true)]
    jobs: Vec<Job>,

    /// Synthetic workload used when no --job is given
    #[arg(long, value_enum, default_value_t = WorkloadArg::Snapshot)]
    workload: WorkloadArg,

    /// Number of synthetic snapshot jobs
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Number of ticks to draw Bernoulli arrivals over
    #[arg(long, default_value_t = 40)]
    ticks: u64,

    /// Chance of a Bernoulli arrival on each tick
    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    /// Chance that a Bernoulli arrival is a short job
    #[arg(long, default_value_t = 0.3)]
    p_short: f64,

    /// Burst of a short Bernoulli job
    #[arg(long, default_value_t = 2)]
    short_ticks: i64,

    /// Burst of a long Bernoulli job
    #[arg(long, default_value_t = 6)]
    long_ticks: i64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// What-if burst edit `id=burst` applied before running (repeatable)
    #[arg(long = "burst", value_parser = parse_burst_edit, allow_hyphen_values = true)]
    bursts: Vec<(u64, i64)>,
}

fn parse_burst_edit(s: &str) -> Result<(u64, i64), String> {
    let (id, burst) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `id=burst`, got `{s}`"))?;
    let id = id.trim().parse().map_err(|_| format!("invalid id `{id}`"))?;
    let burst = burst
        .trim()
        .parse()
        .map_err(|_| format!("invalid burst `{burst}`"))?;
    Ok((id, burst))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SimError> {
    let jobs = if !args.jobs.is_empty() {
        args.jobs
    } else {
        match args.workload {
            WorkloadArg::Snapshot => snapshot_jobs(args.count, args.seed),
            WorkloadArg::Bernoulli => bernoulli_jobs(
                args.ticks,
                args.p_arrival,
                args.p_short,
                args.short_ticks,
                args.long_ticks,
                args.seed,
            ),
        }
    };

    let mut sim = Sim::new(jobs)?;
    for (id, burst) in args.bursts {
        sim.set_burst(ProcessId(id), burst)?;
    }

    let reports = match args.policy {
        PolicyArg::All => sim.run_all(args.quantum)?,
        PolicyArg::Fcfs => vec![sim.run(PolicyKind::Fcfs)?],
        PolicyArg::Srtf => vec![sim.run(PolicyKind::Srtf)?],
        PolicyArg::Priority => vec![sim.run(PolicyKind::Priority)?],
        PolicyArg::Rr => vec![sim.run(PolicyKind::round_robin(args.quantum)?)?],
    };

    for report in &reports {
        print_report(report);
    }
    Ok(())
}

fn print_report(report: &SimReport) {
    println!("== {} ==", report.policy);
    println!("Gantt: {}", report.output.trace);
    println!();
    println!(
        "{:<8} {:<23} {:>10} {:>10} {:>10}",
        "PID", "Name", "Completion", "Turnaround", "Waiting"
    );
    for p in &report.output.processes {
        println!(
            "{:<8} {:<23} {:>10} {:>10} {:>10}",
            p.id,
            display_name(&p.name),
            p.completion_time.unwrap_or_default(),
            p.turnaround_time.unwrap_or_default(),
            p.waiting_time.unwrap_or_default(),
        );
    }
    println!();
    println!("{}", report.metrics);
    println!();
}

fn display_name(name: &str) -> String {
    const MAX: usize = 20;
    if name.chars().count() > MAX {
        format!("{}...", name.chars().take(MAX).collect::<String>())
    } else {
        name.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bernoulli_shape_comes_from_flags() {
        let args = Args::parse_from([
            "cpu_sched_sim",
            "--workload",
            "bernoulli",
            "--p-arrival",
            "1.0",
            "--p-short",
            "0.0",
            "--long-ticks",
            "9",
            "--ticks",
            "5",
        ]);
        assert_eq!(args.p_arrival, 1.0);
        assert_eq!(args.p_short, 0.0);
        assert_eq!(args.short_ticks, 2);
        assert_eq!(args.long_ticks, 9);

        let jobs = bernoulli_jobs(
            args.ticks,
            args.p_arrival,
            args.p_short,
            args.short_ticks,
            args.long_ticks,
            args.seed,
        );
        assert_eq!(jobs.len(), 5);
        assert!(jobs.iter().all(|j| j.burst_time == 9));
    }

    #[test]
    fn burst_edit_parses_id_and_value() {
        assert_eq!(parse_burst_edit("3=-4"), Ok((3, -4)));
        assert!(parse_burst_edit("3").is_err());
    }
}
