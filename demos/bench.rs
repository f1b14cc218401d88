//! A small multi-threaded benchmark harness: one generator produces tile
//! combinations, a pool of workers each owning their own [`Solver`] consumes
//! them through a single bounded hand-off slot.
//!
//! This mirrors the reference C benchmark's producer/consumer design (one
//! mutex, two condition variables, a sentinel "no more work" value) rather
//! than the library's own solving contract — a solver is always used by
//! exactly one thread at a time; distributing work across threads is
//! entirely the caller's concern, which is exactly what this binary
//! demonstrates.

use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use parking_lot::{Condvar, Mutex};

use numbers_round::{rng::JavaRandom, SolveOptions, Solver, Tile};

#[derive(Parser, Debug)]
#[command(author, version, about = "Benchmark the solver across random tile combinations", long_about = None)]
struct Args {
    /// How many random (tiles, target) combinations to solve in total.
    #[arg(long, default_value_t = 2_000)]
    samples: u32,

    /// Number of worker threads; defaults to the number of logical CPUs.
    #[arg(long)]
    workers: Option<usize>,

    /// PRNG seed used to draw the tile/target combinations, for
    /// reproducible runs.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 1 << 16)]
    operation_capacity: u32,

    #[arg(long, default_value_t = 2_000_000)]
    result_index_capacity: u32,
}

struct Job {
    tiles: Vec<Tile>,
    target: u32,
}

/// The single slot shared between the generator and every worker. `Done`
/// is the sentinel the generator posts once after the last real job, and
/// every worker re-posts it for the next worker before exiting so the
/// sentinel propagates without the generator needing to know how many
/// workers are listening.
enum Slot {
    Empty,
    Work(Job),
    Done,
}

struct Shared {
    slot: Mutex<Slot>,
    filled: Condvar,
    emptied: Condvar,
}

#[derive(Default, Copy, Clone)]
struct Stats {
    solved: u64,
    exact: u64,
    aborted: u64,
    total_diff: u64,
}

fn main() {
    let args = Args::parse();
    let worker_count = args.workers.unwrap_or_else(num_cpus::get).max(1);

    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot::Empty),
        filled: Condvar::new(),
        emptied: Condvar::new(),
    });

    let workers: Vec<_> = (0..worker_count)
        .map(|_| {
            let shared = Arc::clone(&shared);
            let operation_capacity = args.operation_capacity.min(u16::MAX as u32) as u16;
            let result_index_capacity = args.result_index_capacity.min(u16::MAX as u32) as u16;
            std::thread::spawn(move || worker_loop(shared, operation_capacity, result_index_capacity))
        })
        .collect();

    let started = Instant::now();
    generate_jobs(&shared, args.samples, args.seed);

    let mut stats = Stats::default();
    for worker in workers {
        let worker_stats = worker.join().expect("worker thread panicked");
        stats.solved += worker_stats.solved;
        stats.exact += worker_stats.exact;
        stats.aborted += worker_stats.aborted;
        stats.total_diff += worker_stats.total_diff;
    }
    let elapsed = started.elapsed();

    report(&stats, elapsed, worker_count);
}

/// Draws `samples` random (tiles, target) combinations and feeds them into
/// the shared slot one at a time, waiting for a worker to empty it before
/// posting the next. Posts the `Done` sentinel once after the last sample.
fn generate_jobs(shared: &Shared, samples: u32, seed: u64) {
    let mut rng = JavaRandom::new(seed);
    let pool: Vec<u32> = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 25, 50, 75, 100];

    for _ in 0..samples {
        let tile_count = 4 + (rng.next_bounded(5) as usize); // 4..=8 tiles
        let mut indices: Vec<u32> = (0..pool.len() as u32).collect();
        numbers_round::rng::shuffle(&mut indices, &mut rng);
        let tiles: Vec<Tile> = indices.iter().take(tile_count).map(|&i| Tile(pool[i as usize])).collect();
        let target = 100 + rng.next_bounded(900);

        let mut slot = shared.slot.lock();
        while !matches!(*slot, Slot::Empty) {
            shared.emptied.wait(&mut slot);
        }
        *slot = Slot::Work(Job { tiles, target });
        shared.filled.notify_one();
    }

    let mut slot = shared.slot.lock();
    while !matches!(*slot, Slot::Empty) {
        shared.emptied.wait(&mut slot);
    }
    *slot = Slot::Done;
    shared.filled.notify_all();
}

fn worker_loop(shared: Arc<Shared>, operation_capacity: u16, result_index_capacity: u16) -> Stats {
    let mut solver = Solver::new(operation_capacity, result_index_capacity).expect("non-zero capacities");
    let mut stats = Stats::default();

    loop {
        let job = {
            let mut slot = shared.slot.lock();
            while matches!(*slot, Slot::Empty) {
                shared.filled.wait(&mut slot);
            }
            match std::mem::replace(&mut *slot, Slot::Empty) {
                Slot::Work(job) => {
                    shared.emptied.notify_one();
                    job
                }
                Slot::Done => {
                    // Leave the sentinel in place for the next worker, and
                    // wake it in case it's already waiting on `filled`.
                    *slot = Slot::Done;
                    shared.filled.notify_one();
                    break;
                }
                Slot::Empty => unreachable!("the wait loop above only exits once the slot is non-empty"),
            }
        };

        let report = solver.solve(job.target, &job.tiles, &SolveOptions::default());
        if let Ok(report) = report {
            stats.solved += 1;
            stats.total_diff += report.best_diff as u64;
            if report.best_diff == 0 {
                stats.exact += 1;
            }
            if report.outcome == numbers_round::Outcome::Aborted {
                stats.aborted += 1;
            }
        }
    }

    stats
}

fn report(stats: &Stats, elapsed: Duration, worker_count: usize) {
    println!("workers:        {}", worker_count);
    println!("solved:         {}", stats.solved);
    println!("exact matches:  {}", stats.exact);
    println!("aborted:        {}", stats.aborted);
    if stats.solved > 0 {
        println!("avg distance:   {:.3}", stats.total_diff as f64 / stats.solved as f64);
    }
    println!("elapsed:        {:.3}s", elapsed.as_secs_f64());
}
