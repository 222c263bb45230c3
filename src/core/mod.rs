//! Core building blocks shared by every other layer:
//! math, deterministic randomness, errors, logging and the safety macros.

#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;

pub mod error;
pub mod logging;
pub mod math;
pub mod rng;

pub use error::EngineError;
pub use math::Vec2;
