// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Honeycomb Learning Simulation Suite ("The Hive") - Compatibility Scorer
//
// Ranks candidate units for a learner by five fit dimensions. Pure: no PRNG,
// no mutation. Two calls with the same inputs produce the same ordering.

use std::cmp::Ordering;

use crate::catalog::UnitCatalog;
use crate::types::*;

// ─── Weights ─────────────────────────────────────────────────────────────────

const W_DIFFICULTY: f64 = 0.25;
const W_TYPE: f64 = 0.20;
const W_MEDIA: f64 = 0.15;
const W_PREREQ: f64 = 0.25;
const W_ALIGNMENT: f64 = 0.15;

// ─── Sub-scores ──────────────────────────────────────────────────────────────

/// Recommended prerequisites met, mapped onto [0.6, 1.0]. Units without
/// recommendations sit at the 0.6 floor.
fn prereq_fit(profile: &LearnerProfile, unit: &HexUnit) -> f64 {
    let met = unit.prereq_recommended.iter()
        .filter(|&&r| profile.has_completed(r))
        .count();
    let total = unit.prereq_recommended.len().max(1);
    0.6 + 0.4 * met as f64 / total as f64
}

/// Distance from the learner's current ideal difficulty, 0.12 penalty per
/// step. The baseline of 6 shifts with the last outcome and the learner's
/// challenge preference.
fn difficulty_fit(
    profile: &LearnerProfile,
    last: Option<&OutcomeRecord>,
    unit: &HexUnit,
) -> f64 {
    let mut ideal: i64 = 6;
    if let Some(last) = last {
        if last.fail_count > 2 {
            ideal -= 1;
        }
        if !last.dropped_out && last.fail_count <= 1 {
            ideal += 1;
        }
    }
    match profile.challenge_preference {
        Level3::High => ideal += 2,
        Level3::Low => ideal -= 1,
        Level3::Medium => {}
    }
    let gap = (unit.difficulty as i64 - ideal).abs() as f64;
    (1.0 - gap * 0.12).max(0.0)
}

/// Whether this unit type is the right move now: support/exploration after a
/// dropout, practice after a retry, plus standing personality pull.
fn type_fit(
    profile: &LearnerProfile,
    last: Option<&OutcomeRecord>,
    unit: &HexUnit,
) -> f64 {
    let mut score: f64 = 0.5;
    if let Some(last) = last {
        if last.dropped_out {
            match unit.unit_type {
                UnitType::Support => score += 0.3,
                UnitType::Exploration => score += 0.2,
                _ => {}
            }
        } else if last.retried && unit.unit_type == UnitType::Practice {
            score += 0.3;
        }
    }
    let traits = &profile.traits;
    match unit.unit_type {
        UnitType::Exploration => score += traits.explorer as f64 * 0.005,
        UnitType::Practice => score += traits.achiever as f64 * 0.005,
        UnitType::Concept => score += traits.creator as f64 * 0.003,
        UnitType::Support => {}
    }
    score.min(1.0)
}

/// Preference for the unit's recommended media, smoothed toward the last
/// outcome's reaction when one exists. Mixed media sits at the 0.5 midpoint.
fn media_fit(
    profile: &LearnerProfile,
    last: Option<&OutcomeRecord>,
    unit: &HexUnit,
) -> f64 {
    if unit.recommended_media == MediaType::Mixed {
        return 0.5;
    }
    let mut pref = profile.media_preference(unit.recommended_media);
    if let Some(last) = last {
        if let Some(reaction) = last.media_reaction.get(unit.recommended_media) {
            pref = (pref + reaction) / 2.0;
        }
    }
    pref
}

/// Would the learner *want* to pick this: standing personality pull per
/// unit type.
fn trait_alignment(profile: &LearnerProfile, unit: &HexUnit) -> f64 {
    let traits = &profile.traits;
    let score = 0.5
        + match unit.unit_type {
            UnitType::Exploration => traits.explorer as f64 * 0.004,
            UnitType::Practice => {
                traits.achiever as f64 * 0.004 + traits.competitor as f64 * 0.002
            }
            UnitType::Concept => traits.creator as f64 * 0.003,
            UnitType::Support => 0.0,
        };
    score.min(1.0)
}

// ─── Scoring ─────────────────────────────────────────────────────────────────

/// Score `candidate_ids` against the profile (and optional last outcome).
///
/// Candidate ids missing from the catalog are skipped. Availability gating
/// short-circuits in order: already completed, locked, missing required
/// prerequisite (units declaring none are never prerequisite-blocked).
/// The result is stably sorted by (availability desc, total desc), so ties
/// keep candidate order.
pub fn score_candidates(
    catalog: &UnitCatalog,
    profile: &LearnerProfile,
    last: Option<&OutcomeRecord>,
    candidate_ids: &[u32],
) -> Vec<MatchScore> {
    let mut scores = Vec::with_capacity(candidate_ids.len());

    for &cell_id in candidate_ids {
        let unit = match catalog.get(cell_id) {
            Some(u) => u,
            None => continue, // caller broke referential integrity; skip
        };

        if profile.has_completed(cell_id) {
            scores.push(MatchScore::unavailable(cell_id, BlockReason::AlreadyCompleted));
            continue;
        }
        if unit.is_locked {
            scores.push(MatchScore::unavailable(cell_id, BlockReason::Locked));
            continue;
        }
        if !unit.prereq_required.is_empty()
            && !unit.prereq_required.iter().all(|&r| profile.has_completed(r))
        {
            scores.push(MatchScore::unavailable(cell_id, BlockReason::MissingRequiredPrereq));
            continue;
        }

        let difficulty = difficulty_fit(profile, last, unit);
        let type_score = type_fit(profile, last, unit);
        let media = media_fit(profile, last, unit);
        let prereq = prereq_fit(profile, unit);
        let alignment = trait_alignment(profile, unit);

        let total = difficulty * W_DIFFICULTY
            + type_score * W_TYPE
            + media * W_MEDIA
            + prereq * W_PREREQ
            + alignment * W_ALIGNMENT;

        scores.push(MatchScore {
            cell_id,
            total,
            difficulty_fit: difficulty,
            type_fit: type_score,
            media_fit: media,
            prereq_fit: prereq,
            trait_alignment: alignment,
            is_available: true,
            block_reason: BlockReason::None,
        });
    }

    // Stable: equal keys keep candidate order.
    scores.sort_by(|a, b| {
        b.is_available
            .cmp(&a.is_available)
            .then(b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal))
    });
    scores
}

/// Top `n` available units across the whole catalog, best first.
pub fn recommend_top(
    catalog: &UnitCatalog,
    profile: &LearnerProfile,
    last: Option<&OutcomeRecord>,
    n: usize,
) -> Vec<(HexUnit, MatchScore)> {
    let candidates = catalog.cells();
    score_candidates(catalog, profile, last, &candidates)
        .into_iter()
        .filter(|s| s.is_available)
        .take(n)
        .filter_map(|s| catalog.get(s.cell_id).map(|u| (u.clone(), s)))
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitCatalog;
    use crate::profile::generate_profile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fixture() -> (UnitCatalog, LearnerProfile) {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let catalog = UnitCatalog::generate(61, &mut rng);
        let profile = generate_profile(&mut rng);
        (catalog, profile)
    }

    #[test]
    fn test_sub_scores_in_range_and_total_weighted() {
        let (mut catalog, profile) = fixture();
        catalog.unlock_adjacent(1);

        let scores = score_candidates(&catalog, &profile, None, &catalog.cells());
        let mut saw_available = false;
        for s in &scores {
            if !s.is_available {
                continue;
            }
            saw_available = true;
            for sub in [s.difficulty_fit, s.type_fit, s.media_fit, s.prereq_fit, s.trait_alignment] {
                assert!((0.0..=1.0).contains(&sub), "cell {}: {:?}", s.cell_id, s);
            }
            let expected = s.difficulty_fit * 0.25
                + s.type_fit * 0.20
                + s.media_fit * 0.15
                + s.prereq_fit * 0.25
                + s.trait_alignment * 0.15;
            assert!((s.total - expected).abs() < 1e-3);
        }
        assert!(saw_available);
    }

    #[test]
    fn test_available_sorted_descending() {
        let (mut catalog, profile) = fixture();
        catalog.unlock_adjacent(1);

        let scores = score_candidates(&catalog, &profile, None, &catalog.cells());
        let available: Vec<&MatchScore> = scores.iter().filter(|s| s.is_available).collect();
        for pair in available.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
        // Available entries come before blocked ones.
        let first_blocked = scores.iter().position(|s| !s.is_available);
        if let Some(idx) = first_blocked {
            assert!(scores[idx..].iter().all(|s| !s.is_available));
        }
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let (mut catalog, profile) = fixture();
        catalog.unlock_adjacent(1);

        let a = score_candidates(&catalog, &profile, None, &catalog.cells());
        let b = score_candidates(&catalog, &profile, None, &catalog.cells());
        let ids_a: Vec<u32> = a.iter().map(|s| s.cell_id).collect();
        let ids_b: Vec<u32> = b.iter().map(|s| s.cell_id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_block_reasons() {
        let (mut catalog, mut profile) = fixture();
        catalog.unlock_adjacent(1);
        profile.completed_cells.push(1);

        let scores = score_candidates(&catalog, &profile, None, &[1, 2, 40]);
        let by_id = |id: u32| scores.iter().find(|s| s.cell_id == id).unwrap();

        assert_eq!(by_id(1).block_reason, BlockReason::AlreadyCompleted);
        assert_eq!(by_id(40).block_reason, BlockReason::Locked);
        // Cell 2 is unlocked; whether it is blocked depends only on its
        // required prerequisite being completed.
        let s2 = by_id(2);
        let unit2 = catalog.get(2).unwrap();
        if unit2.prereq_required.iter().all(|&r| profile.has_completed(r)) {
            assert!(s2.is_available);
        } else {
            assert_eq!(s2.block_reason, BlockReason::MissingRequiredPrereq);
        }
    }

    #[test]
    fn test_no_prereqs_never_blocks() {
        let (catalog, profile) = fixture();
        // Cell 1 declares no required prereqs and starts unlocked.
        let scores = score_candidates(&catalog, &profile, None, &[1]);
        assert!(scores[0].is_available);
    }

    #[test]
    fn test_unknown_candidate_skipped() {
        let (catalog, profile) = fixture();
        let scores = score_candidates(&catalog, &profile, None, &[1, 999]);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].cell_id, 1);
    }

    #[test]
    fn test_dropout_steers_toward_support() {
        let (mut catalog, profile) = fixture();
        catalog.unlock_adjacent(1);

        let mut unit = catalog.get(1).unwrap().clone();
        unit.unit_type = UnitType::Support;

        let mut last = OutcomeRecord {
            log_id: "00000000".into(),
            cell_id: 1,
            learner_id: profile.learner_id.clone(),
            step: 0,
            stay_secs: 60,
            fail_count: 5,
            retried: false,
            dropped_out: true,
            reward_response: RewardType::Praise,
            media_reaction: MediaReaction::default(),
            achievement: 0.2,
        };

        let with_dropout = type_fit(&profile, Some(&last), &unit);
        last.dropped_out = false;
        let without = type_fit(&profile, Some(&last), &unit);
        assert!(with_dropout > without);
    }

    #[test]
    fn test_recommend_top_only_available() {
        let (mut catalog, profile) = fixture();
        catalog.unlock_adjacent(1);

        let top = recommend_top(&catalog, &profile, None, 3);
        assert!(!top.is_empty());
        assert!(top.len() <= 3);
        for (unit, score) in &top {
            assert!(score.is_available);
            assert!(!unit.is_locked);
            assert_eq!(unit.cell_id, score.cell_id);
        }
    }
}
