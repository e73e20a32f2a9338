use bevy::prelude::*;

use crate::components::{TrimMode, TrimResult};

/// Marks an aircraft entity waiting to be trimmed.
#[derive(Component, Debug, Clone, Copy)]
pub struct NeedsTrim {
    pub mode: TrimMode,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct TrimRequest {
    pub entity: Entity,
    pub mode: TrimMode,
}

/// Result of the last trim run on an entity.
#[derive(Component, Debug, Clone)]
pub struct TrimOutcome {
    pub mode: TrimMode,
    pub result: TrimResult,
}
