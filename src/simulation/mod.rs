//! World - fixed-step 2D physics over entities and a tile layer.
//!
//! `WorldCore` owns all simulation state and only orchestrates; the actual
//! physics lives in `systems/`, tile queries in `spatial/`. Each concern of
//! the world is a free-function module below that takes `&mut WorldCore`.

use crate::core::error::{EngineError, EngineResult};
use crate::core::math::Vec2;
use crate::core::rng::Rng;
use crate::domain::config::SimulationParams;
use crate::domain::entity::{CollisionFlags, Entity, EntityId};
use crate::domain::registry::EntityRegistry;
use crate::spatial::{TileGrid, TileRaycast};
use crate::systems::debug::{DebugDraw, DebugShape};
use crate::systems::physics::PhysicsCounters;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "clock/clock.rs"]
mod clock;
#[path = "step/step_physics.rs"]
mod step_physics;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "queries/queries.rs"]
mod queries;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use clock::FixedStepClock;
pub use facade::World;
pub use perf_stats::PerfStats;
pub use render_extract::RENDER_STRIDE;

use perf_timer::PerfTimer;

/// The simulation world
pub struct WorldCore {
    registry: EntityRegistry,
    tiles: TileGrid,
    params: SimulationParams,

    // Per-tick scratch
    /// Entities taking part in object collision, rebuilt before integration
    candidates: Vec<EntityId>,
    counters: PhysicsCounters,
    raycast_steps: u32,

    // State
    rng: Rng,
    clock: FixedStepClock,
    paused: bool,
    frame: u64,
    time: f64,

    debug: DebugDraw,
    render: Vec<f32>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create a world with a `width` x `height` tile layer and default params
    pub fn new(width: u32, height: u32) -> Self {
        init::create_world_core(width, height, SimulationParams::default())
    }

    pub fn with_params(width: u32, height: u32, params: SimulationParams) -> Self {
        init::create_world_core(width, height, params)
    }

    /// Create a world from a JSON `SimulationParams` document.
    pub fn from_config_json(width: u32, height: u32, json: &str) -> EngineResult<Self> {
        let params = SimulationParams::from_json(json)?;
        Ok(init::create_world_core(width, height, params))
    }

    pub fn params(&self) -> &SimulationParams { &self.params }

    pub fn params_json(&self) -> String { self.params.to_json() }

    /// Replace all parameters. Entity state and tiles are kept.
    pub fn load_params_json(&mut self, json: &str) -> EngineResult<()> {
        settings::load_params_json(self, json)
    }

    pub fn frame(&self) -> u64 { self.frame }

    /// Simulated seconds, summed tick by tick at the frame rate in force
    pub fn time(&self) -> f64 { self.time }

    pub fn entity_count(&self) -> usize { self.registry.len() }

    pub fn registry(&self) -> &EntityRegistry { &self.registry }

    pub fn tiles(&self) -> &TileGrid { &self.tiles }

    pub fn candidates(&self) -> &[EntityId] { &self.candidates }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.registry.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.registry.get_mut(id)
    }

    // === SETTINGS ===

    pub fn set_gravity(&mut self, gravity: f32) {
        settings::set_gravity(self, gravity);
    }

    pub fn set_max_speed(&mut self, max_speed: f32) {
        settings::set_max_speed(self, max_speed);
    }

    pub fn set_physics_enabled(&mut self, enabled: bool) {
        settings::set_physics_enabled(self, enabled);
    }

    pub fn set_frame_rate(&mut self, frame_rate: f32) {
        settings::set_frame_rate(self, frame_rate);
    }

    pub fn set_paused(&mut self, paused: bool) {
        settings::set_paused(self, paused);
    }

    pub fn is_paused(&self) -> bool { self.paused }

    pub fn set_debug(&mut self, physics: bool, raycast: bool) {
        settings::set_debug(self, physics, raycast);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === ENTITIES ===

    /// Spawn a box with the world's default material.
    pub fn spawn(&mut self, pos: Vec2, size: Vec2) -> EntityId {
        commands::spawn(self, pos, size)
    }

    /// Spawn a fully configured entity.
    pub fn spawn_entity(&mut self, entity: Entity) -> EntityId {
        commands::spawn_entity(self, entity)
    }

    /// Flag `id` and its subtree for removal at the end of the tick.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        commands::destroy(self, id)
    }

    pub fn destroy_all(&mut self) {
        commands::destroy_all(self)
    }

    pub fn add_child(&mut self, parent: EntityId, child: EntityId, local_pos: Vec2, local_angle: f32) -> EngineResult<()> {
        commands::add_child(self, parent, child, local_pos, local_angle)
    }

    pub fn remove_child(&mut self, parent: EntityId, child: EntityId) -> EngineResult<()> {
        commands::remove_child(self, parent, child)
    }

    pub fn set_collision(&mut self, id: EntityId, flags: CollisionFlags) -> EngineResult<()> {
        commands::set_collision(self, id, flags)
    }

    pub fn set_velocity(&mut self, id: EntityId, velocity: Vec2) -> EngineResult<()> {
        commands::set_velocity(self, id, velocity)
    }

    pub fn apply_force(&mut self, id: EntityId, force: Vec2) -> EngineResult<()> {
        commands::apply_force(self, id, force)
    }

    pub fn apply_acceleration(&mut self, id: EntityId, acceleration: Vec2) -> EngineResult<()> {
        commands::apply_acceleration(self, id, acceleration)
    }

    // === TILES ===

    /// Replace the tile layer with an empty `width` x `height` grid.
    pub fn init_tiles(&mut self, width: u32, height: u32) {
        commands::init_tiles(self, width, height)
    }

    pub fn set_tile(&mut self, x: i32, y: i32, value: i32) {
        commands::set_tile(self, x, y, value)
    }

    pub fn get_tile(&self, x: i32, y: i32) -> i32 {
        self.tiles.get_cell(x, y)
    }

    // === QUERIES ===

    pub fn collect_in_box(&self, pos: Vec2, size: Vec2) -> Vec<EntityId> {
        queries::collect_in_box(self, pos, size)
    }

    pub fn collect_in_radius(&self, pos: Vec2, radius: f32) -> Vec<EntityId> {
        queries::collect_in_radius(self, pos, radius)
    }

    pub fn raycast_entities(&mut self, start: Vec2, end: Vec2) -> Vec<EntityId> {
        queries::raycast_entities(self, start, end)
    }

    pub fn tile_raycast(&mut self, start: Vec2, end: Vec2, filter: Option<EntityId>) -> TileRaycast {
        queries::tile_raycast(self, start, end, filter)
    }

    pub fn tile_region_test(&self, pos: Vec2, size: Vec2, filter: Option<EntityId>) -> bool {
        queries::tile_region_test(self, pos, size, filter)
    }

    // === STEPPING ===

    /// Advance exactly one tick
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Paused-frame update: propagate transforms, no physics, no time.
    pub fn update_transforms_only(&mut self) {
        step::update_transforms_only(self);
    }

    /// Feed real frame time; runs the owed ticks and returns how many ran.
    pub fn tick(&mut self, frame_ms: f64) -> u32 {
        step::tick(self, frame_ms)
    }

    // === OUTPUT ===

    /// Refill the packed render buffer; returns the entity count written.
    pub fn extract_render(&mut self) -> usize {
        render_extract::extract_render(self)
    }

    pub fn render_buffer(&self) -> &[f32] { &self.render }

    /// Get pointer to the render buffer (for JS rendering)
    pub fn render_ptr(&self) -> *const f32 {
        render_extract::render_ptr(self)
    }

    pub fn render_len(&self) -> usize {
        render_extract::render_len(self)
    }

    pub fn debug_shapes(&self) -> &[DebugShape] { self.debug.shapes() }

    pub fn drain_debug(&mut self) -> Vec<DebugShape> { self.debug.drain() }

    fn live_entity_mut(&mut self, id: EntityId) -> EngineResult<&mut Entity> {
        match self.registry.get_mut(id) {
            Some(e) if !e.destroyed => Ok(e),
            _ => Err(EngineError::InvalidHandle(id)),
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
