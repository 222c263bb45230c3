//! Domain types: entities, their handles and policies, and configuration.

pub mod config;
pub mod entity;
pub mod policy;
pub mod registry;

pub use config::{EntityDefaults, SimulationParams};
pub use entity::{CollisionFlags, Entity, EntityId, Ground, SpeedClamp};
pub use policy::{CollisionFilter, CollisionPolicy};
pub use registry::EntityRegistry;
