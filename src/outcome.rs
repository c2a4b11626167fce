// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Honeycomb Learning Simulation Suite ("The Hive") - Outcome Generator
//
// The generative model: (learner profile x unit) -> outcome record. All
// randomness comes from the caller's PRNG, so a fixed seed replays the
// exact same session.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::types::*;

// ─── Sampling helpers ────────────────────────────────────────────────────────

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Gaussian sample via Box-Muller.
fn gauss(rng: &mut ChaCha8Rng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-12);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

/// Categorical sample by cumulative weight.
fn sample_reward(rng: &mut ChaCha8Rng, traits: &TraitVector) -> RewardType {
    let weights = [
        (RewardType::Praise, (traits.achiever + 10) as f64),
        (RewardType::Unlock, (traits.explorer + traits.creator) as f64),
        (RewardType::VisualEffect, (traits.creator + traits.competitor) as f64),
    ];
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let r = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (reward, w) in weights {
        cumulative += w;
        if r <= cumulative {
            return reward;
        }
    }
    RewardType::VisualEffect
}

// ─── Outcome generation ──────────────────────────────────────────────────────

/// Sample one outcome record for `profile` working through `unit`.
///
/// Always produces a valid record: stay >= 20s, failures in 0..=10, all four
/// media reactions in [0, 1]. `step` is the driver's logical timestamp.
pub fn simulate_outcome(
    rng: &mut ChaCha8Rng,
    profile: &LearnerProfile,
    unit: &HexUnit,
    step: u64,
) -> OutcomeRecord {
    let log_id = format!("{:08x}", rng.gen::<u32>());

    // 1. Stay duration: focus baseline, difficulty shift, Gaussian noise,
    //    unit-type multiplier. Floor of 20 seconds.
    let base = profile.avg_focus_secs as f64
        + (unit.difficulty as f64 - 6.0) * 8.0
        + gauss(rng, 0.0, 25.0);
    let stay_secs = (base * unit.unit_type.time_multiplier()).round().max(20.0) as u32;

    // 2. Failure count: difficulty floor plus noise, shifted by the learner's
    //    challenge preference and failure tolerance. Capped at 10.
    let mut fails = (unit.difficulty as i64 - 5).div_euclid(2).max(0) as u32
        + rng.gen_range(0..=2);
    match profile.challenge_preference {
        Level3::High => fails += rng.gen_range(0..=2),
        Level3::Low => fails = fails.saturating_sub(1),
        Level3::Medium => {}
    }
    if profile.failure_tolerance == Level3::High {
        fails = fails.saturating_sub(1);
    }
    let fail_count = fails.min(10);

    // 3. Dropout: failure-triggered (60%) OR boredom-triggered (25%, concept
    //    and support units only).
    let mut dropped_out = false;
    if fail_count >= profile.dropout_fail_threshold {
        dropped_out = rng.gen::<f64>() < 0.6;
    }
    if !dropped_out
        && stay_secs > profile.boredom_threshold_secs
        && matches!(unit.unit_type, UnitType::Concept | UnitType::Support)
    {
        dropped_out = rng.gen::<f64>() < 0.25;
    }

    // 4. Retry: only meaningful after a non-dropout failure.
    let mut retried = false;
    if fail_count > 0 && !dropped_out {
        retried = rng.gen::<f64>() * 100.0 < profile.retry_probability as f64;
    }

    // 5. Reward response, weighted by personality.
    let reward_response = sample_reward(rng, &profile.traits);

    // 6. Media reactions: preferences perturbed by uniform noise, with a
    //    +0.2 bonus on the unit's recommended media (if concrete).
    let mut media_reaction = MediaReaction {
        image: clamp01(profile.media_image + rng.gen_range(-0.15..0.15)),
        text: clamp01(profile.media_text + rng.gen_range(-0.15..0.15)),
        numeric: clamp01(profile.media_numeric + rng.gen_range(-0.15..0.15)),
        video: clamp01(profile.media_video + rng.gen_range(-0.15..0.15)),
    };
    match unit.recommended_media {
        MediaType::Image => media_reaction.image = clamp01(media_reaction.image + 0.2),
        MediaType::Text => media_reaction.text = clamp01(media_reaction.text + 0.2),
        MediaType::Numeric => media_reaction.numeric = clamp01(media_reaction.numeric + 0.2),
        MediaType::Video => media_reaction.video = clamp01(media_reaction.video + 0.2),
        MediaType::Mixed => {}
    }

    // Achievement: dropout < over-budget failures < clean run.
    let achievement = if dropped_out {
        rng.gen_range(0.1..0.4)
    } else if fail_count > unit.fail_allow {
        rng.gen_range(0.4..0.7)
    } else {
        rng.gen_range(0.7..1.0)
    };

    OutcomeRecord {
        log_id,
        cell_id: unit.cell_id,
        learner_id: profile.learner_id.clone(),
        step,
        stay_secs,
        fail_count,
        retried,
        dropped_out,
        reward_response,
        media_reaction,
        achievement,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitCatalog;
    use crate::profile::generate_profile;
    use rand::SeedableRng;

    #[test]
    fn test_outcome_fields_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let catalog = UnitCatalog::generate(61, &mut rng);
        let profile = generate_profile(&mut rng);

        for cell in 1..=61 {
            let unit = catalog.get(cell).unwrap();
            for step in 0..10 {
                let out = simulate_outcome(&mut rng, &profile, unit, step);
                assert!(out.stay_secs >= 20);
                assert!(out.fail_count <= 10);
                for r in [
                    out.media_reaction.image,
                    out.media_reaction.text,
                    out.media_reaction.numeric,
                    out.media_reaction.video,
                ] {
                    assert!((0.0..=1.0).contains(&r));
                }
                assert!((0.0..=1.0).contains(&out.achievement));
                assert_eq!(out.cell_id, cell);
                assert_eq!(out.step, step);
            }
        }
    }

    #[test]
    fn test_retry_never_set_after_dropout_or_clean_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let catalog = UnitCatalog::generate(61, &mut rng);
        let profile = generate_profile(&mut rng);

        for cell in 1..=61 {
            let unit = catalog.get(cell).unwrap();
            let out = simulate_outcome(&mut rng, &profile, unit, 0);
            if out.retried {
                assert!(out.fail_count > 0);
                assert!(!out.dropped_out);
            }
        }
    }

    #[test]
    fn test_recommended_media_gets_bonus() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let catalog = UnitCatalog::generate(7, &mut rng);
        let mut profile = generate_profile(&mut rng);
        profile.media_image = 0.5;

        let mut unit = catalog.get(1).unwrap().clone();
        unit.recommended_media = MediaType::Image;

        // Worst case noise is -0.15, bonus is +0.2: reaction >= 0.55.
        for _ in 0..200 {
            let out = simulate_outcome(&mut rng, &profile, &unit, 0);
            assert!(out.media_reaction.image >= 0.55 - 1e-9);
        }
    }

    #[test]
    fn test_achievement_bands() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let catalog = UnitCatalog::generate(61, &mut rng);
        let profile = generate_profile(&mut rng);

        for cell in 1..=61 {
            let unit = catalog.get(cell).unwrap();
            let out = simulate_outcome(&mut rng, &profile, unit, 0);
            if out.dropped_out {
                assert!((0.1..0.4).contains(&out.achievement));
            } else if out.fail_count > unit.fail_allow {
                assert!((0.4..0.7).contains(&out.achievement));
            } else {
                assert!((0.7..1.0).contains(&out.achievement));
            }
        }
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let mut setup = ChaCha8Rng::seed_from_u64(8);
        let catalog = UnitCatalog::generate(61, &mut setup);
        let profile = generate_profile(&mut setup);
        let unit = catalog.get(5).unwrap();

        let mut a = ChaCha8Rng::seed_from_u64(77);
        let mut b = ChaCha8Rng::seed_from_u64(77);
        let oa = simulate_outcome(&mut a, &profile, unit, 3);
        let ob = simulate_outcome(&mut b, &profile, unit, 3);
        assert_eq!(oa.log_id, ob.log_id);
        assert_eq!(oa.stay_secs, ob.stay_secs);
        assert_eq!(oa.fail_count, ob.fail_count);
        assert_eq!(oa.dropped_out, ob.dropped_out);
        assert_eq!(oa.reward_response, ob.reward_response);
    }

    #[test]
    fn test_gauss_roughly_centered() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let n = 10_000;
        let sum: f64 = (0..n).map(|_| gauss(&mut rng, 0.0, 25.0)).sum();
        let mean = sum / n as f64;
        assert!(mean.abs() < 1.0, "Gaussian mean {} far from 0", mean);
    }
}
