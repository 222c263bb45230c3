/// Per-tick physics counters, folded into `PerfStats` when perf is enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhysicsCounters {
    /// Candidate pairs that passed the participation filter
    pub pair_tests: u32,
    /// Pairs corrected on at least one axis
    pub resolutions: u32,
    /// Pairs already overlapping last tick, nudged apart instead
    pub push_aparts: u32,
    /// Tile responses that blocked an entity
    pub tile_blocks: u32,
}

impl PhysicsCounters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Read and zero.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
