// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Honeycomb Learning Simulation Suite ("The Hive") - Unit Catalog

use std::collections::BTreeMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Serialize, Deserialize};

use crate::grid;
use crate::types::*;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// The engine's only recoverable error: a caller referenced a unit id that is
/// not in the catalog. Candidate-id lists and the catalog must stay in sync.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("unit {0} is not in the catalog")]
    UnknownUnit(u32),
}

// ─── Subjects ────────────────────────────────────────────────────────────────

/// Seven subject strands, cycled across cells at catalog build.
pub const SUBJECTS: [(char, &str); 7] = [
    ('A', "Numbers & Operations"),
    ('B', "Geometry & Measurement"),
    ('C', "Patterns & Relations"),
    ('D', "Data & Probability"),
    ('E', "Matter & Energy"),
    ('F', "Life & Environment"),
    ('G', "Earth & Space"),
];

// ─── UnitCatalog ─────────────────────────────────────────────────────────────

/// The fixed mapping from cell index to unit, built once per session and
/// passed explicitly through every engine call. A `BTreeMap` keeps iteration
/// deterministic, which the scorer's tie-break order relies on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitCatalog {
    units: BTreeMap<u32, HexUnit>,
    max_cells: u32,
}

impl UnitCatalog {
    /// Build a honeycomb catalog of `num_cells` units. Only cell 1 starts
    /// unlocked; difficulty, unit type and prerequisites follow the cell's
    /// ring, everything else is sampled from the shared PRNG.
    pub fn generate(num_cells: u32, rng: &mut ChaCha8Rng) -> Self {
        let mut units = BTreeMap::new();

        for cell_id in 1..=num_cells {
            let ring = grid::ring_of(cell_id);

            let difficulty = (ring * 3 + rng.gen_range(0..=2)).clamp(1, 12);

            let unit_type = match ring {
                0 => UnitType::Concept,
                1 => {
                    if rng.gen::<bool>() { UnitType::Concept } else { UnitType::Support }
                }
                2 => {
                    if rng.gen::<bool>() { UnitType::Support } else { UnitType::Practice }
                }
                _ => {
                    if rng.gen::<bool>() { UnitType::Practice } else { UnitType::Exploration }
                }
            };

            let (subject, subject_name) = SUBJECTS[(cell_id as usize - 1) % SUBJECTS.len()];

            let adjacent = grid::adjacent_cells(cell_id, num_cells);
            // One inward lower cell is required; up to two lower cells recommended.
            let prereq_required: Vec<u32> = adjacent.iter()
                .filter(|&&a| a < cell_id && grid::ring_of(a) < ring)
                .take(1)
                .copied()
                .collect();
            let prereq_recommended: Vec<u32> = adjacent.iter()
                .filter(|&&a| a < cell_id)
                .take(2)
                .copied()
                .collect();

            let recommended_media = match rng.gen_range(0..5) {
                0 => MediaType::Image,
                1 => MediaType::Text,
                2 => MediaType::Numeric,
                3 => MediaType::Video,
                _ => MediaType::Mixed,
            };

            let estimated_time_secs =
                (120 + difficulty as i64 * 15 + rng.gen_range(-20..=20)) as u32;

            let reward_type = match rng.gen_range(0..3) {
                0 => RewardType::Praise,
                1 => RewardType::Unlock,
                _ => RewardType::VisualEffect,
            };

            units.insert(cell_id, HexUnit {
                cell_id,
                subject,
                subject_name: subject_name.to_string(),
                ring,
                difficulty,
                unit_type,
                prereq_required,
                prereq_recommended,
                prereq_optional: Vec::new(),
                adjacent_cells: adjacent,
                recommended_media,
                estimated_time_secs,
                fail_allow: 5u32.saturating_sub(difficulty / 3).max(1),
                reward_type,
                is_locked: cell_id != 1,
                is_completed: false,
                score: 0.0,
            });
        }

        Self { units, max_cells: num_cells }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn max_cells(&self) -> u32 {
        self.max_cells
    }

    pub fn get(&self, cell_id: u32) -> Option<&HexUnit> {
        self.units.get(&cell_id)
    }

    pub fn get_mut(&mut self, cell_id: u32) -> Option<&mut HexUnit> {
        self.units.get_mut(&cell_id)
    }

    /// All cell ids in ascending order.
    pub fn cells(&self) -> Vec<u32> {
        self.units.keys().copied().collect()
    }

    pub fn units(&self) -> impl Iterator<Item = &HexUnit> {
        self.units.values()
    }

    /// Cells that are neither completed nor locked, ascending.
    pub fn available_cells(&self) -> Vec<u32> {
        self.units.iter()
            .filter(|(_, u)| !u.is_completed && !u.is_locked)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Flag a unit completed and store its last-achieved score.
    pub fn mark_completed(&mut self, cell_id: u32, score: f64) {
        if let Some(unit) = self.units.get_mut(&cell_id) {
            unit.is_completed = true;
            unit.score = score;
        }
    }

    /// Clear the locked flag on every unit adjacent to `completed_cell`.
    /// Idempotent; unknown cells are a no-op. Returns the newly unlocked ids.
    pub fn unlock_adjacent(&mut self, completed_cell: u32) -> Vec<u32> {
        let adjacent = match self.units.get(&completed_cell) {
            Some(unit) => unit.adjacent_cells.clone(),
            None => return Vec::new(),
        };

        let mut unlocked = Vec::new();
        for adj_id in adjacent {
            if let Some(unit) = self.units.get_mut(&adj_id) {
                if unit.is_locked {
                    unit.is_locked = false;
                    unlocked.push(adj_id);
                }
            }
        }
        unlocked
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn catalog() -> UnitCatalog {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        UnitCatalog::generate(61, &mut rng)
    }

    #[test]
    fn test_generate_61_cells() {
        let cat = catalog();
        assert_eq!(cat.len(), 61);
        assert_eq!(cat.cells().first(), Some(&1));
        assert_eq!(cat.cells().last(), Some(&61));
    }

    #[test]
    fn test_only_center_starts_unlocked() {
        let cat = catalog();
        assert!(!cat.get(1).unwrap().is_locked);
        for cell in 2..=61 {
            assert!(cat.get(cell).unwrap().is_locked, "cell {} should start locked", cell);
        }
        assert_eq!(cat.available_cells(), vec![1]);
    }

    #[test]
    fn test_center_is_concept_ring_zero() {
        let cat = catalog();
        let center = cat.get(1).unwrap();
        assert_eq!(center.ring, 0);
        assert_eq!(center.unit_type, UnitType::Concept);
        assert!(center.prereq_required.is_empty());
    }

    #[test]
    fn test_difficulty_in_range() {
        let cat = catalog();
        for unit in cat.units() {
            assert!((1..=12).contains(&unit.difficulty), "cell {}", unit.cell_id);
            assert!(unit.fail_allow >= 1);
        }
    }

    #[test]
    fn test_required_prereqs_point_inward() {
        let cat = catalog();
        for unit in cat.units() {
            for &req in &unit.prereq_required {
                assert!(req < unit.cell_id);
                assert!(grid::ring_of(req) < unit.ring);
            }
            assert!(unit.prereq_required.len() <= 1);
            assert!(unit.prereq_recommended.len() <= 2);
        }
    }

    #[test]
    fn test_unlock_adjacent_center() {
        let mut cat = catalog();
        let unlocked = cat.unlock_adjacent(1);
        assert_eq!(unlocked, vec![2, 3, 4, 5, 6, 7]);

        // Idempotent: nothing further to unlock.
        assert!(cat.unlock_adjacent(1).is_empty());

        // Ring 4 untouched.
        for cell in 38..=61 {
            assert!(cat.get(cell).unwrap().is_locked);
        }
    }

    #[test]
    fn test_unlock_unknown_cell_is_noop() {
        let mut cat = catalog();
        assert!(cat.unlock_adjacent(999).is_empty());
    }

    #[test]
    fn test_mark_completed_stores_score() {
        let mut cat = catalog();
        cat.mark_completed(1, 0.85);
        let unit = cat.get(1).unwrap();
        assert!(unit.is_completed);
        assert!((unit.score - 0.85).abs() < f64::EPSILON);
        assert!(cat.available_cells().is_empty());
    }

    #[test]
    fn test_same_seed_same_catalog() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let cat_a = UnitCatalog::generate(61, &mut a);
        let cat_b = UnitCatalog::generate(61, &mut b);
        for cell in 1..=61 {
            let ua = cat_a.get(cell).unwrap();
            let ub = cat_b.get(cell).unwrap();
            assert_eq!(ua.difficulty, ub.difficulty);
            assert_eq!(ua.unit_type, ub.unit_type);
            assert_eq!(ua.recommended_media, ub.recommended_media);
        }
    }
}
