// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Honeycomb Learning Simulation Suite ("The Hive")

pub mod types;
pub mod grid;
pub mod catalog;
pub mod profile;
pub mod outcome;
pub mod update;
pub mod matching;
pub mod simulation;

pub use catalog::{EngineError, UnitCatalog, SUBJECTS};
pub use simulation::HiveSimulation;
pub use types::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl HiveSimulation {
    /// `(num_cells, seed)` fully determines the session; the dashboard passes
    /// the same pair to replay a run.
    #[wasm_bindgen(constructor)]
    pub fn new(num_cells: u32, seed: u64) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        HiveSimulation::with_seed(num_cells, seed)
    }

    pub fn step(&mut self) -> JsValue {
        let result = self.step_core();
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    /// Force a specific cell instead of letting the scorer pick. NULL when the
    /// cell id is not in the catalog.
    pub fn play(&mut self, cell_id: u32) -> JsValue {
        match self.play_cell(cell_id) {
            Ok(result) => serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL),
            Err(_) => JsValue::NULL,
        }
    }

    /// Top-n `(unit, score)` recommendations without advancing the session.
    pub fn get_recommendations(&self, n: u32) -> JsValue {
        let top = self.recommend(n as usize);
        serde_wasm_bindgen::to_value(&top).unwrap_or(JsValue::NULL)
    }

    pub fn get_profile(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.profile()).unwrap_or(JsValue::NULL)
    }

    pub fn get_units(&self) -> JsValue {
        let units: Vec<&HexUnit> = self.catalog().units().collect();
        serde_wasm_bindgen::to_value(&units).unwrap_or(JsValue::NULL)
    }

    pub fn get_unit(&self, cell_id: u32) -> JsValue {
        match self.catalog().get(cell_id) {
            Some(unit) => serde_wasm_bindgen::to_value(unit).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    pub fn get_log(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.log()).unwrap_or(JsValue::NULL)
    }

    pub fn get_stats(&self) -> JsValue {
        let stats = self.session_stats();
        serde_wasm_bindgen::to_value(&stats).unwrap_or(JsValue::NULL)
    }

    pub fn get_available_cells(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.catalog().available_cells())
            .unwrap_or(JsValue::NULL)
    }

    /// Run N steps without returning per-step results (fast batch mode).
    pub fn run_steps(&mut self, n: u32) {
        for _ in 0..n {
            self.step_core();
        }
    }

    /// Reset the session to its initial state; the replay is bit-identical.
    pub fn reset(&mut self) {
        *self = HiveSimulation::with_seed(self.num_cells, self.seed);
    }
}
