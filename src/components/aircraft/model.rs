use crate::components::{
    AircraftControlSurfaces, FullAircraftConfig, PropulsionState, SpatialComponent,
};

/// The mutable aircraft state a trim operates on, bundled with its configuration.
///
/// ECS systems assemble one from an entity's components and write the parts back
/// once the trim completes.
#[derive(Debug, Clone)]
pub struct AircraftModel {
    pub config: FullAircraftConfig,
    pub controls: AircraftControlSurfaces,
    pub propulsion: PropulsionState,
    pub spatial: SpatialComponent,
}

impl AircraftModel {
    pub fn new(config: FullAircraftConfig) -> Self {
        let propulsion = PropulsionState::new(config.propulsion.engines.len());
        Self {
            config,
            controls: AircraftControlSurfaces::default(),
            propulsion,
            spatial: SpatialComponent::default(),
        }
    }

    pub fn cessna_172() -> Self {
        Self::new(FullAircraftConfig::cessna_172())
    }

    /// Normalized throttle of the first engine, zero without engines.
    pub fn throttle(&self) -> f64 {
        match (
            self.config.propulsion.engines.first(),
            self.propulsion.engine_states.first(),
        ) {
            (Some(config), Some(state)) => config.throttle_for(state.power_lever),
            _ => 0.0,
        }
    }

    /// Commands a normalized throttle on every engine.
    pub fn set_throttle(&mut self, throttle: f64) {
        for (config, state) in self
            .config
            .propulsion
            .engines
            .iter()
            .zip(self.propulsion.engine_states.iter_mut())
        {
            state.power_lever = config.power_lever_for(throttle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_throttle_round_trip() {
        let mut model = AircraftModel::cessna_172();
        model.set_throttle(0.42);
        assert_relative_eq!(model.throttle(), 0.42);
        assert_relative_eq!(model.propulsion.engine_states[0].power_lever, 0.42);
    }

    #[test]
    fn test_engine_states_match_config() {
        let model = AircraftModel::cessna_172();
        assert_eq!(
            model.propulsion.engine_states.len(),
            model.config.propulsion.engines.len()
        );
    }
}
