use wasm_bindgen::prelude::*;

use crate::core::error::EngineError;
use crate::core::math::Vec2;
use crate::domain::entity::{CollisionFlags, EntityId};
use crate::domain::policy::CollisionPolicy;

use super::perf_stats::PerfStats;
use super::WorldCore;

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn ids_to_bits(ids: Vec<EntityId>) -> Vec<u64> {
    ids.into_iter().map(EntityId::to_bits).collect()
}

/// JS handle to a simulation world. Entity handles cross the boundary as
/// `u64` bit patterns (see `EntityId::to_bits`).
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with a `width` x `height` tile layer
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            core: WorldCore::new(width, height),
        }
    }

    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(width: u32, height: u32, json: String) -> Result<World, JsValue> {
        let core = WorldCore::from_config_json(width, height, &json).map_err(to_js)?;
        Ok(Self { core })
    }

    pub fn load_params_json(&mut self, json: String) -> Result<(), JsValue> {
        self.core.load_params_json(&json).map_err(to_js)
    }

    pub fn params_json(&self) -> String {
        self.core.params_json()
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 { self.core.time() }

    #[wasm_bindgen(getter)]
    pub fn entity_count(&self) -> u32 { self.core.entity_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn paused(&self) -> bool { self.core.is_paused() }

    // === SETTINGS ===

    pub fn set_gravity(&mut self, gravity: f32) {
        self.core.set_gravity(gravity);
    }

    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.core.set_max_speed(max_speed);
    }

    pub fn set_physics_enabled(&mut self, enabled: bool) {
        self.core.set_physics_enabled(enabled);
    }

    pub fn set_frame_rate(&mut self, frame_rate: f32) {
        self.core.set_frame_rate(frame_rate);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.core.set_paused(paused);
    }

    pub fn set_debug(&mut self, physics: bool, raycast: bool) {
        self.core.set_debug(physics, raycast);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === ENTITIES ===

    pub fn spawn(&mut self, x: f32, y: f32, w: f32, h: f32) -> u64 {
        self.core.spawn(Vec2::new(x, y), Vec2::new(w, h)).to_bits()
    }

    pub fn destroy(&mut self, id: u64) -> bool {
        self.core.destroy(EntityId::from_bits(id))
    }

    pub fn destroy_all(&mut self) {
        self.core.destroy_all();
    }

    pub fn is_alive(&self, id: u64) -> bool {
        self.core
            .entity(EntityId::from_bits(id))
            .map_or(false, |e| !e.is_destroyed())
    }

    /// `[x, y, vx, vy, angle, grounded]`, empty for a dead handle.
    pub fn entity_state(&self, id: u64) -> Vec<f32> {
        match self.core.entity(EntityId::from_bits(id)) {
            Some(e) => vec![
                e.pos.x,
                e.pos.y,
                e.velocity.x,
                e.velocity.y,
                e.angle,
                if e.ground().is_some() { 1.0 } else { 0.0 },
            ],
            None => Vec::new(),
        }
    }

    pub fn set_position(&mut self, id: u64, x: f32, y: f32) -> Result<(), JsValue> {
        self.with_entity(id, |e| e.pos = Vec2::new(x, y))
    }

    pub fn set_size(&mut self, id: u64, w: f32, h: f32) -> Result<(), JsValue> {
        self.with_entity(id, |e| e.size = Vec2::new(w.max(0.0), h.max(0.0)))
    }

    pub fn set_angle(&mut self, id: u64, angle: f32, angle_velocity: f32) -> Result<(), JsValue> {
        self.with_entity(id, |e| {
            e.angle = angle;
            e.angle_velocity = angle_velocity;
        })
    }

    pub fn set_mirror(&mut self, id: u64, mirror: bool) -> Result<(), JsValue> {
        self.with_entity(id, |e| e.mirror = mirror)
    }

    pub fn set_render_order(&mut self, id: u64, order: f32) -> Result<(), JsValue> {
        self.with_entity(id, |e| e.render_order = order)
    }

    pub fn set_velocity(&mut self, id: u64, vx: f32, vy: f32) -> Result<(), JsValue> {
        self.core
            .set_velocity(EntityId::from_bits(id), Vec2::new(vx, vy))
            .map_err(to_js)
    }

    /// Mass 0 makes the entity static.
    pub fn set_mass(&mut self, id: u64, mass: f32) -> Result<(), JsValue> {
        self.with_entity(id, |e| e.mass = mass.max(0.0))
    }

    pub fn set_material(
        &mut self,
        id: u64,
        damping: f32,
        elasticity: f32,
        friction: f32,
        gravity_scale: f32,
    ) -> Result<(), JsValue> {
        self.with_entity(id, |e| {
            e.set_damping(damping, e.angle_damping);
            e.set_elasticity(elasticity);
            e.set_friction(friction);
            e.gravity_scale = gravity_scale;
        })
    }

    pub fn set_collision(
        &mut self,
        id: u64,
        collide_solid_objects: bool,
        is_solid: bool,
        collide_tiles: bool,
        collide_raycast: bool,
    ) -> Result<(), JsValue> {
        let flags = CollisionFlags {
            collide_tiles,
            collide_solid_objects,
            is_solid,
            collide_raycast,
        };
        self.core
            .set_collision(EntityId::from_bits(id), flags)
            .map_err(to_js)
    }

    /// Make the entity a one-way platform (or back to always-solid).
    pub fn set_one_way_platform(&mut self, id: u64, one_way: bool) -> Result<(), JsValue> {
        self.with_entity(id, |e| {
            e.policy = if one_way {
                CollisionPolicy::OneWayPlatform
            } else {
                CollisionPolicy::Always
            };
        })
    }

    /// Tile values this entity ignores; empty restores the default.
    pub fn set_pass_through_tiles(&mut self, id: u64, values: Vec<i32>) -> Result<(), JsValue> {
        self.with_entity(id, move |e| {
            e.policy = if values.is_empty() {
                CollisionPolicy::Always
            } else {
                CollisionPolicy::PassThroughTiles(values)
            };
        })
    }

    pub fn apply_force(&mut self, id: u64, fx: f32, fy: f32) -> Result<(), JsValue> {
        self.core
            .apply_force(EntityId::from_bits(id), Vec2::new(fx, fy))
            .map_err(to_js)
    }

    pub fn apply_acceleration(&mut self, id: u64, ax: f32, ay: f32) -> Result<(), JsValue> {
        self.core
            .apply_acceleration(EntityId::from_bits(id), Vec2::new(ax, ay))
            .map_err(to_js)
    }

    pub fn add_child(
        &mut self,
        parent: u64,
        child: u64,
        local_x: f32,
        local_y: f32,
        local_angle: f32,
    ) -> Result<(), JsValue> {
        self.core
            .add_child(
                EntityId::from_bits(parent),
                EntityId::from_bits(child),
                Vec2::new(local_x, local_y),
                local_angle,
            )
            .map_err(to_js)
    }

    pub fn remove_child(&mut self, parent: u64, child: u64) -> Result<(), JsValue> {
        self.core
            .remove_child(EntityId::from_bits(parent), EntityId::from_bits(child))
            .map_err(to_js)
    }

    // === TILES ===

    pub fn init_tiles(&mut self, width: u32, height: u32) {
        self.core.init_tiles(width, height);
    }

    pub fn set_tile(&mut self, x: i32, y: i32, value: i32) {
        self.core.set_tile(x, y, value);
    }

    pub fn get_tile(&self, x: i32, y: i32) -> i32 {
        self.core.get_tile(x, y)
    }

    /// `[x, y]` of the first blocking cell's center, empty on a miss.
    pub fn tile_raycast(&mut self, sx: f32, sy: f32, ex: f32, ey: f32) -> Vec<f32> {
        let result = self.core.tile_raycast(Vec2::new(sx, sy), Vec2::new(ex, ey), None);
        result.hit.map_or_else(Vec::new, |h| vec![h.pos.x, h.pos.y])
    }

    pub fn tile_region_test(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        self.core.tile_region_test(Vec2::new(x, y), Vec2::new(w, h), None)
    }

    // === QUERIES ===

    pub fn collect_in_box(&self, x: f32, y: f32, w: f32, h: f32) -> Vec<u64> {
        ids_to_bits(self.core.collect_in_box(Vec2::new(x, y), Vec2::new(w, h)))
    }

    pub fn collect_in_radius(&self, x: f32, y: f32, radius: f32) -> Vec<u64> {
        ids_to_bits(self.core.collect_in_radius(Vec2::new(x, y), radius))
    }

    pub fn raycast_entities(&mut self, sx: f32, sy: f32, ex: f32, ey: f32) -> Vec<u64> {
        ids_to_bits(self.core.raycast_entities(Vec2::new(sx, sy), Vec2::new(ex, ey)))
    }

    // === STEPPING ===

    /// Advance exactly one tick
    pub fn step(&mut self) {
        self.core.step();
    }

    /// Feed real frame time in ms; returns how many ticks ran
    pub fn tick(&mut self, frame_ms: f64) -> u32 {
        self.core.tick(frame_ms)
    }

    pub fn update_transforms_only(&mut self) {
        self.core.update_transforms_only();
    }

    // === OUTPUT ===

    /// Pack live entities for rendering; returns the entity count
    pub fn extract_render(&mut self) -> usize {
        self.core.extract_render()
    }

    /// Get pointer to the render buffer (for JS rendering)
    pub fn render_ptr(&self) -> *const f32 {
        self.core.render_ptr()
    }

    /// Render buffer length in floats
    pub fn render_len(&self) -> usize {
        self.core.render_len()
    }

    pub fn render_stride(&self) -> usize {
        super::RENDER_STRIDE
    }

    /// Take all pending debug draw requests as a JSON array
    pub fn drain_debug_json(&mut self) -> String {
        let shapes = self.core.drain_debug();
        serde_json::to_string(&shapes).unwrap_or_else(|_| "[]".to_string())
    }
}

impl World {
    fn with_entity<F>(&mut self, id: u64, f: F) -> Result<(), JsValue>
    where
        F: FnOnce(&mut crate::domain::entity::Entity),
    {
        let id = EntityId::from_bits(id);
        match self.core.entity_mut(id) {
            Some(e) if !e.is_destroyed() => {
                f(e);
                Ok(())
            }
            _ => Err(to_js(EngineError::InvalidHandle(id))),
        }
    }

    pub fn core(&self) -> &WorldCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut WorldCore {
        &mut self.core
    }
}
