use wasm_bindgen::prelude::*;

use crate::systems::physics::PhysicsCounters;

/// Snapshot of the last step. All zeros while perf metrics are off.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) physics_ms: f64,
    pub(super) transform_ms: f64,
    pub(super) prune_ms: f64,
    pub(super) entity_count: u32,
    pub(super) root_count: u32,
    pub(super) candidate_count: u32,
    pub(super) pair_tests: u32,
    pub(super) resolutions: u32,
    pub(super) push_aparts: u32,
    pub(super) tile_blocks: u32,
    pub(super) pruned: u32,
    pub(super) raycast_steps: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    pub(crate) fn absorb_physics(&mut self, counters: PhysicsCounters) {
        self.pair_tests = counters.pair_tests;
        self.resolutions = counters.resolutions;
        self.push_aparts = counters.push_aparts;
        self.tile_blocks = counters.tile_blocks;
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn physics_ms(&self) -> f64 { self.physics_ms }
    #[wasm_bindgen(getter)]
    pub fn transform_ms(&self) -> f64 { self.transform_ms }
    #[wasm_bindgen(getter)]
    pub fn prune_ms(&self) -> f64 { self.prune_ms }
    #[wasm_bindgen(getter)]
    pub fn entity_count(&self) -> u32 { self.entity_count }
    #[wasm_bindgen(getter)]
    pub fn root_count(&self) -> u32 { self.root_count }
    #[wasm_bindgen(getter)]
    pub fn candidate_count(&self) -> u32 { self.candidate_count }
    #[wasm_bindgen(getter)]
    pub fn pair_tests(&self) -> u32 { self.pair_tests }
    #[wasm_bindgen(getter)]
    pub fn resolutions(&self) -> u32 { self.resolutions }
    #[wasm_bindgen(getter)]
    pub fn push_aparts(&self) -> u32 { self.push_aparts }
    #[wasm_bindgen(getter)]
    pub fn tile_blocks(&self) -> u32 { self.tile_blocks }
    #[wasm_bindgen(getter)]
    pub fn pruned(&self) -> u32 { self.pruned }
    /// Cells visited by tile raycasts issued through the world between the
    /// previous step and this one
    #[wasm_bindgen(getter)]
    pub fn raycast_steps(&self) -> u32 { self.raycast_steps }
}
