// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Honeycomb Learning Simulation Suite ("The Hive") - Profile Updater
//
// Folds one outcome record back into the learner profile. The learner does
// not change; the state vector does, a little, after every unit.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::types::*;

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Apply the five update steps, in order: media preference drift, challenge
/// preference adjustment, trait drift + renormalization, state-version bump,
/// completed-set append (non-dropout only).
pub fn update_profile(
    rng: &mut ChaCha8Rng,
    profile: &mut LearnerProfile,
    outcome: &OutcomeRecord,
    unit: &HexUnit,
) {
    // 1. Media drift: the best-received media gains, the other three fade.
    let best = outcome.media_reaction.best();
    for (media, pref) in [
        (MediaType::Image, &mut profile.media_image),
        (MediaType::Text, &mut profile.media_text),
        (MediaType::Numeric, &mut profile.media_numeric),
        (MediaType::Video, &mut profile.media_video),
    ] {
        let delta = if media == best { 0.03 } else { -0.01 };
        *pref = clamp01(*pref + delta);
    }

    // 2. Challenge preference: back off after a rough unit, occasionally
    //    recover after a clean one.
    if outcome.dropped_out || outcome.fail_count > unit.fail_allow {
        match profile.challenge_preference {
            Level3::High => profile.challenge_preference = Level3::Medium,
            Level3::Medium => {
                if rng.gen::<f64>() < 0.3 {
                    profile.challenge_preference = Level3::Low;
                }
            }
            Level3::Low => {}
        }
    }
    if !outcome.dropped_out && outcome.fail_count <= 1 {
        if profile.challenge_preference == Level3::Low && rng.gen::<f64>() < 0.2 {
            profile.challenge_preference = Level3::Medium;
        }
    }

    // 3. Trait drift, then renormalize to sum 100.
    let traits = &mut profile.traits;
    if !outcome.dropped_out
        && rng.gen::<f64>() * 100.0 < profile.exploration_probability as f64
    {
        traits.explorer += 2;
    } else if outcome.dropped_out {
        traits.explorer = traits.explorer.saturating_sub(1);
    }

    if !outcome.dropped_out {
        traits.achiever += 1;
    }
    if outcome.retried {
        traits.achiever += 1;
    }

    if unit.unit_type == UnitType::Exploration && !outcome.dropped_out {
        traits.creator += 2;
    }

    traits.normalize();

    // 4. State version bump.
    profile.state_version += 1;

    // 5. Record completion. The scorer already filters completed cells out of
    //    the candidate set; the contains check keeps the set unique anyway.
    if !outcome.dropped_out && !profile.completed_cells.contains(&outcome.cell_id) {
        profile.completed_cells.push(outcome.cell_id);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
