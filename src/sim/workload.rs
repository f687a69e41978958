//! Seeded synthetic workloads.

use rand::prelude::*;

use super::job::Job;

/// Snapshot workloads are capped at this many jobs.
pub const MAX_SNAPSHOT_JOBS: usize = 30;

/// Stand-in for a process-table snapshot: every job arrives at t=0 with a
/// nice-like priority and a burst in `0..=100` skewed upward by a random
/// CPU load. Bursts can come out as zero.
pub fn snapshot_jobs(count: usize, seed: u64) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count.min(MAX_SNAPSHOT_JOBS))
        .map(|i| {
            let id = i as u64 + 1;
            let priority = rng.random_range(0..=19);
            let cpu_load: i64 = rng.random_range(0..=100);
            let base_burst: i64 = rng.random_range(5..=50);
            let jitter: i64 = rng.random_range(-10..=10);
            let burst = (base_burst + cpu_load / 2 + jitter).clamp(0, 100);

            Job::new(id, format!("proc-{id}"), priority, burst, 0)
        })
        .collect()
}

/// Bernoulli arrivals: each tick in `0..ticks` spawns a job with probability
/// `p_arrival`, short with probability `p_short`.
pub fn bernoulli_jobs(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: i64,
    long_ticks: i64,
    seed: u64,
) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let run_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };
            let priority = rng.random_range(0..=9);

            let id = jobs.len() as u64 + 1;
            jobs.push(Job::new(
                id,
                format!("job-{id}"),
                priority,
                run_time,
                t as i64,
            ));
        }
    }

    jobs
}
