mod atmosphere;
mod physics;

pub use atmosphere::{AtmosphereConfig, AtmosphereType};
pub use physics::PhysicsConfig;
