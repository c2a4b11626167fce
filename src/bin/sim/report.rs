// Batch Simulation Report Types
// Structured output for cohort-level analysis of simulated learners

use serde::Serialize;

use hive_engine::SessionStats;

// ─── Statistics (per-metric cohort aggregation) ─────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Single-Learner Result ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LearnerResult {
    pub learner_id: String,
    pub name: String,
    pub seed: u64,
    pub stats: SessionStats,
    pub completion_rate: f64,
    pub dropout_rate: f64,
}

// ─── Cohort Report ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CohortSummary {
    pub learners: usize,
    pub steps_per_learner: u64,
    pub completion_rate: Stats,
    pub dropout_rate: Stats,
    pub avg_achievement: Stats,
    pub avg_stay_secs: Stats,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub num_cells: u32,
    pub base_seed: u64,
    pub summary: CohortSummary,
    pub learners: Vec<LearnerResult>,
}
