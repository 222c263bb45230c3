//! Global simulation parameters and per-entity defaults.
//!
//! Every field has a default so a partial JSON document (or `{}`) is valid.

use serde::{Deserialize, Serialize};

use crate::core::error::EngineResult;

/// Values a freshly spawned entity starts with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityDefaults {
    /// 0 makes the entity static (infinite mass)
    pub mass: f32,
    pub damping: f32,
    pub angle_damping: f32,
    pub elasticity: f32,
    pub friction: f32,
    pub gravity_scale: f32,
}

impl Default for EntityDefaults {
    fn default() -> Self {
        Self {
            mass: 1.0,
            damping: 1.0,
            angle_damping: 1.0,
            elasticity: 0.0,
            friction: 0.8,
            gravity_scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Added to `velocity.y` every tick (scaled per entity). Y is up, so
    /// negative values pull down.
    pub gravity: f32,
    /// Per-tick speed limit; keeps fast entities from skipping through
    /// colliders in one step.
    pub max_speed: f32,
    /// Master switch for collision resolution and gravity.
    pub physics_enabled: bool,
    /// Fixed ticks per second.
    pub frame_rate: f32,
    /// Upper bound on real time the clock will try to catch up per frame.
    pub max_catch_up_ms: f64,
    pub rng_seed: u32,
    pub debug_physics: bool,
    pub debug_raycast: bool,
    pub defaults: EntityDefaults,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            gravity: 0.0,
            max_speed: 1.0,
            physics_enabled: true,
            frame_rate: 60.0,
            max_catch_up_ms: 50.0,
            rng_seed: 12345,
            debug_physics: false,
            debug_raycast: false,
            defaults: EntityDefaults::default(),
        }
    }
}

impl SimulationParams {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let params: SimulationParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Seconds per tick.
    pub fn time_delta(&self) -> f64 {
        1.0 / self.frame_rate as f64
    }

    fn validate(&self) -> EngineResult<()> {
        use crate::core::EngineError;

        if !(self.frame_rate > 0.0) {
            return Err(EngineError::Config(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if !(self.max_speed >= 0.0) {
            return Err(EngineError::Config(format!(
                "max_speed must be non-negative, got {}",
                self.max_speed
            )));
        }
        let d = &self.defaults;
        if d.mass < 0.0 {
            return Err(EngineError::Config(format!("default mass {} is negative", d.mass)));
        }
        for (name, v) in [
            ("damping", d.damping),
            ("angle_damping", d.angle_damping),
            ("elasticity", d.elasticity),
            ("friction", d.friction),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(EngineError::Config(format!("default {name} {v} outside 0..=1")));
            }
        }
        Ok(())
    }
}
