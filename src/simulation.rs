// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Honeycomb Learning Simulation Suite ("The Hive") - Simulation Driver
//
// Owns the full session state: catalog, learner, PRNG, outcome log. Single
// threaded; all mutation happens between steps, never during one.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

use crate::catalog::{EngineError, UnitCatalog};
use crate::matching::recommend_top;
use crate::outcome::simulate_outcome;
use crate::profile::generate_profile;
use crate::types::*;
use crate::update::update_profile;

// ─── HiveSimulation struct ───────────────────────────────────────────────────

#[wasm_bindgen]
pub struct HiveSimulation {
    pub(crate) catalog: UnitCatalog,
    pub(crate) profile: LearnerProfile,
    pub(crate) rng: ChaCha8Rng,

    pub(crate) seed: u64,
    pub(crate) num_cells: u32,

    pub(crate) step: u64,
    pub(crate) skipped: u64,
    pub(crate) last_outcome: Option<OutcomeRecord>,
    pub(crate) log: Vec<OutcomeRecord>,
}

impl HiveSimulation {
    /// Build a fresh session: catalog and learner both drawn from the seeded
    /// PRNG, so `(num_cells, seed)` fully determines everything that follows.
    pub fn with_seed(num_cells: u32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let catalog = UnitCatalog::generate(num_cells, &mut rng);
        let profile = generate_profile(&mut rng);

        Self {
            catalog,
            profile,
            rng,
            seed,
            num_cells,
            step: 0,
            skipped: 0,
            last_outcome: None,
            log: Vec::new(),
        }
    }

    /// Run one step: pick the best-matching available unit, simulate the
    /// learner working through it, fold the outcome back into the profile,
    /// and on a non-dropout mark the unit completed and unlock its neighbors.
    ///
    /// When nothing is available the step is skipped: profile and catalog are
    /// left untouched and only the step counter advances.
    pub fn step_core(&mut self) -> StepResult {
        let step = self.step;
        self.step += 1;

        let picked = recommend_top(&self.catalog, &self.profile, self.last_outcome.as_ref(), 1)
            .into_iter()
            .next();

        let (unit, match_score) = match picked {
            Some(pair) => pair,
            None => {
                self.skipped += 1;
                return StepResult {
                    step,
                    cell_id: None,
                    outcome: None,
                    match_score: None,
                    state_version: self.profile.state_version,
                    completed_count: self.profile.completed_cells.len() as u32,
                    available_count: self.catalog.available_cells().len() as u32,
                };
            }
        };

        let outcome = simulate_outcome(&mut self.rng, &self.profile, &unit, step);
        update_profile(&mut self.rng, &mut self.profile, &outcome, &unit);

        if !outcome.dropped_out {
            self.catalog.mark_completed(unit.cell_id, outcome.achievement);
            self.catalog.unlock_adjacent(unit.cell_id);
        }

        self.last_outcome = Some(outcome.clone());
        self.log.push(outcome.clone());

        StepResult {
            step,
            cell_id: Some(unit.cell_id),
            outcome: Some(outcome),
            match_score: Some(match_score),
            state_version: self.profile.state_version,
            completed_count: self.profile.completed_cells.len() as u32,
            available_count: self.catalog.available_cells().len() as u32,
        }
    }

    /// Force the learner onto a specific cell, bypassing the scorer. The cell
    /// must exist in the catalog.
    pub fn play_cell(&mut self, cell_id: u32) -> Result<StepResult, EngineError> {
        let unit = self
            .catalog
            .get(cell_id)
            .cloned()
            .ok_or(EngineError::UnknownUnit(cell_id))?;

        let step = self.step;
        self.step += 1;

        let outcome = simulate_outcome(&mut self.rng, &self.profile, &unit, step);
        update_profile(&mut self.rng, &mut self.profile, &outcome, &unit);

        if !outcome.dropped_out {
            self.catalog.mark_completed(unit.cell_id, outcome.achievement);
            self.catalog.unlock_adjacent(unit.cell_id);
        }

        self.last_outcome = Some(outcome.clone());
        self.log.push(outcome.clone());

        Ok(StepResult {
            step,
            cell_id: Some(cell_id),
            outcome: Some(outcome),
            match_score: None,
            state_version: self.profile.state_version,
            completed_count: self.profile.completed_cells.len() as u32,
            available_count: self.catalog.available_cells().len() as u32,
        })
    }

    pub fn run_batch(&mut self, n: u64) -> Vec<StepResult> {
        (0..n).map(|_| self.step_core()).collect()
    }

    /// Top-n recommendations for the current state, without advancing.
    pub fn recommend(&self, n: usize) -> Vec<(HexUnit, MatchScore)> {
        recommend_top(&self.catalog, &self.profile, self.last_outcome.as_ref(), n)
    }

    /// Aggregate tallies over the session so far.
    pub fn session_stats(&self) -> SessionStats {
        let played = self.log.len().max(1) as f64;
        SessionStats {
            steps: self.step,
            skipped: self.skipped,
            completions: self.profile.completed_cells.len() as u32,
            dropouts: self.log.iter().filter(|o| o.dropped_out).count() as u32,
            retries: self.log.iter().filter(|o| o.retried).count() as u32,
            avg_stay_secs: self.log.iter().map(|o| o.stay_secs as f64).sum::<f64>() / played,
            avg_fail_count: self.log.iter().map(|o| o.fail_count as f64).sum::<f64>() / played,
            avg_achievement: self.log.iter().map(|o| o.achievement).sum::<f64>() / played,
        }
    }

    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    pub fn profile(&self) -> &LearnerProfile {
        &self.profile
    }

    pub fn log(&self) -> &[OutcomeRecord] {
        &self.log
    }

    pub fn last_outcome(&self) -> Option<&OutcomeRecord> {
        self.last_outcome.as_ref()
    }

    pub fn current_step(&self) -> u64 {
        self.step
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
