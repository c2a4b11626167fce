// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Honeycomb Learning Simulation Suite ("The Hive") - Learner Profile Generator

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::types::*;

// ─── Name pools ──────────────────────────────────────────────────────────────

const FIRST_NAMES: [&str; 14] = [
    "Minjun", "Seoyeon", "Doyun", "Hayun", "Jiho", "Seojun", "Yerin",
    "Jimin", "Hyunwoo", "Sua", "Yuna", "Junho", "Siwoo", "Jia",
];

const LAST_NAMES: [&str; 10] = [
    "Kim", "Lee", "Park", "Choi", "Jung", "Kang", "Cho", "Yoon", "Jang", "Lim",
];

// ─── Generation ──────────────────────────────────────────────────────────────

fn sample_level3(rng: &mut ChaCha8Rng) -> Level3 {
    match rng.gen_range(0..3) {
        0 => Level3::Low,
        1 => Level3::Medium,
        _ => Level3::High,
    }
}

/// Sample a trait vector summing to exactly 100. Raw weights are drawn as
/// `U(0,1)^0.7` (mildly flattened toward balance), scaled to 100 and
/// truncated; the rounding remainder goes to the first component.
fn sample_traits(rng: &mut ChaCha8Rng) -> TraitVector {
    let raw: [f64; 4] = [
        rng.gen::<f64>().powf(0.7),
        rng.gen::<f64>().powf(0.7),
        rng.gen::<f64>().powf(0.7),
        rng.gen::<f64>().powf(0.7),
    ];
    let total: f64 = raw.iter().sum();
    let scaled: Vec<u32> = raw.iter().map(|r| (r / total * 100.0) as u32).collect();

    let mut traits = TraitVector {
        explorer: scaled[0],
        achiever: scaled[1],
        competitor: scaled[2],
        creator: scaled[3],
    };
    traits.explorer += 100 - traits.sum();
    traits
}

/// Create one simulated learner with randomized initial state. Every field
/// except identity may drift afterward via the profile updater.
pub fn generate_profile(rng: &mut ChaCha8Rng) -> LearnerProfile {
    let learner_id = format!("{:08x}", rng.gen::<u32>());
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];

    LearnerProfile {
        learner_id,
        name: format!("{} {}", first, last),
        traits: sample_traits(rng),
        challenge_preference: sample_level3(rng),
        failure_tolerance: sample_level3(rng),
        media_image: rng.gen_range(0.2..0.9),
        media_text: rng.gen_range(0.2..0.9),
        media_numeric: rng.gen_range(0.2..0.9),
        media_video: rng.gen_range(0.2..0.9),
        avg_focus_secs: rng.gen_range(90..=300),
        boredom_threshold_secs: rng.gen_range(60..=200),
        dropout_fail_threshold: rng.gen_range(2..=6),
        retry_probability: rng.gen_range(20..=80),
        exploration_probability: rng.gen_range(15..=60),
        rest_tolerance: sample_level3(rng),
        state_version: 0,
        completed_cells: Vec::new(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
