// Hive Batch Simulation Runner v0.2.0 — Cohort-Level Learner Validation
// Seedable PRNG, one independent session per simulated learner, JSON report
//
// Usage:
//   cargo run --release --bin sim                      # 30 learners, 40 steps each
//   cargo run --release --bin sim -- --learners 5      # Quick mode
//   cargo run --release --bin sim -- --steps 100       # Longer sessions
//   cargo run --release --bin sim -- --cells 19        # Smaller honeycomb (2 rings)
//   cargo run --release --bin sim -- --seed 42         # Custom base seed

mod report;

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use hive_engine::{round2, HiveSimulation};
use report::*;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    learners: usize,
    steps: u64,
    cells: u32,
    seed: u64,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        learners: 30,
        steps: 40,
        cells: 61,
        seed: 0,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--learners" => {
                i += 1;
                if i < args.len() {
                    cli.learners = args[i].parse().unwrap_or(30);
                }
            }
            "--steps" => {
                i += 1;
                if i < args.len() {
                    cli.steps = args[i].parse().unwrap_or(40);
                }
            }
            "--cells" => {
                i += 1;
                if i < args.len() {
                    cli.cells = args[i].parse().unwrap_or(61);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();

    println!("\n  Hive Batch Simulation Runner v0.2.0");
    println!(
        "  PRNG: ChaCha8Rng | Learners: {} | Steps/learner: {} | Cells: {} | Base seed: {}",
        cli.learners, cli.steps, cli.cells, cli.seed
    );
    println!();
    println!(
        "  {:<20} {:>8} {:>8} {:>8} {:>8} {:>10} {:>8}",
        "Learner", "Done", "Drops", "Retries", "Skips", "AvgStay", "AvgAch"
    );
    println!("  {}", "-".repeat(76));

    let suite_start = Instant::now();
    let mut results = Vec::with_capacity(cli.learners);

    for i in 0..cli.learners {
        let seed = cli.seed + i as u64;
        let mut sim = HiveSimulation::with_seed(cli.cells, seed);
        sim.run_batch(cli.steps);

        let stats = sim.session_stats();
        let played = stats.steps - stats.skipped;
        let completion_rate = round2(stats.completions as f64 / cli.cells as f64);
        let dropout_rate = if played > 0 {
            round2(stats.dropouts as f64 / played as f64)
        } else {
            0.0
        };

        println!(
            "  {:<20} {:>8} {:>8} {:>8} {:>8} {:>9.1}s {:>8.2}",
            sim.profile().name,
            stats.completions,
            stats.dropouts,
            stats.retries,
            stats.skipped,
            stats.avg_stay_secs,
            stats.avg_achievement,
        );

        results.push(LearnerResult {
            learner_id: sim.profile().learner_id.clone(),
            name: sim.profile().name.clone(),
            seed,
            stats,
            completion_rate,
            dropout_rate,
        });
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Cohort Summary ─────────────────────────────────────────────────

    let completion: Vec<f64> = results.iter().map(|r| r.completion_rate).collect();
    let dropout: Vec<f64> = results.iter().map(|r| r.dropout_rate).collect();
    let achievement: Vec<f64> = results.iter().map(|r| r.stats.avg_achievement).collect();
    let stay: Vec<f64> = results.iter().map(|r| r.stats.avg_stay_secs).collect();

    let summary = CohortSummary {
        learners: cli.learners,
        steps_per_learner: cli.steps,
        completion_rate: Stats::from_samples(&completion),
        dropout_rate: Stats::from_samples(&dropout),
        avg_achievement: Stats::from_samples(&achievement),
        avg_stay_secs: Stats::from_samples(&stay),
    };

    println!("  {}", "-".repeat(76));
    println!(
        "  Cohort: completion {:.1}%±{:.1}  dropout {:.1}%±{:.1}  achievement {:.2}  ({:.1}s)\n",
        summary.completion_rate.mean * 100.0,
        (summary.completion_rate.ci_upper - summary.completion_rate.ci_lower) / 2.0 * 100.0,
        summary.dropout_rate.mean * 100.0,
        (summary.dropout_rate.ci_upper - summary.dropout_rate.ci_lower) / 2.0 * 100.0,
        summary.avg_achievement.mean,
        suite_elapsed.as_secs_f64(),
    );

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis();
    let timestamp = format!("{}", ts);

    let report = SimReport {
        timestamp: timestamp.clone(),
        version: "0.2.0",
        prng: "ChaCha8Rng",
        num_cells: cli.cells,
        base_seed: cli.seed,
        summary,
        learners: results,
    };

    let dir = std::path::Path::new("sim-results");
    if !dir.exists() {
        std::fs::create_dir_all(dir).expect("Failed to create sim-results/");
    }
    let path = dir.join(format!("sim-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize");
    std::fs::write(&path, &json).expect("Failed to write report file");
    println!("  Results saved to: {}\n", path.display());
}
