//! Tilestep Engine - fixed-step 2D arcade physics in WASM
//!
//! Axis-aligned boxes moving through a static tile layer, colliding with
//! each other, optionally linked into parent/child transform trees.
//!
//! Architecture:
//! - core/          - math, rng, errors, logging, safety macros
//! - domain/        - entities, handles, policies, configuration
//! - spatial/       - tile collision grid
//! - systems/       - physics, transform hierarchy, debug draw
//! - simulation/    - world orchestration and the wasm facade

// Safety macros must be first for macro export
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

pub use spatial::tile_grid;
pub use systems::physics;
pub use systems::transform;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook and console logging.
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    crate::core::logging::init(level);

    log::info!("tilestep engine {} initialized", version());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::error::{EngineError, EngineResult};
pub use crate::core::math::Vec2;
pub use domain::{
    CollisionFilter, CollisionFlags, CollisionPolicy, Entity, EntityDefaults, EntityId, Ground,
    SimulationParams, SpeedClamp,
};
pub use simulation::{FixedStepClock, PerfStats, World, WorldCore, RENDER_STRIDE};
pub use spatial::{TileGrid, TileHit, TileRaycast};
pub use systems::debug::{DebugDraw, DebugShape};
