use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{EngineKind, PowerplantConfig, PowerplantState};

/// Time step used when driving an engine to steady state (s).
const STEADY_STATE_DT: f64 = 0.5;
const STEADY_STATE_MAX_ITERATIONS: usize = 1000;
const STEADY_STATE_TOLERANCE: f64 = 1e-12;

/// Spool speed a turbine starter motor drives towards (%).
pub const TURBINE_STARTER_N2: f64 = 60.0;
/// Spool speed at which a turbine lights off (%).
pub const TURBINE_LIGHT_OFF_N2: f64 = 55.0;
const TURBINE_IDLE_N2: f64 = 60.0;
const TURBINE_SPOOL_TIME: f64 = 5.0;

/// Whether the engine has what it needs to keep running.
fn can_run(kind: EngineKind, state: &PowerplantState) -> bool {
    match kind {
        EngineKind::Piston => state.has_fuel && state.magnetos > 0 && state.mixture > 0.0,
        EngineKind::Turbine => state.has_fuel && !state.cutoff,
        EngineKind::Other => state.has_fuel,
    }
}

fn first_order(current: f64, target: f64, time_constant: f64, dt: f64) -> f64 {
    if time_constant > 1e-6 {
        let decay = (-dt / time_constant).exp();
        target + (current - target) * decay
    } else {
        target
    }
}

/// Advances an engine by `dt`, handling ignition, shutdown and spooling.
pub fn update_powerplant_state(state: &mut PowerplantState, config: &PowerplantConfig, dt: f64) {
    let available = can_run(config.kind, state);

    match config.kind {
        EngineKind::Piston => {
            if !state.running && state.starter && available {
                state.running = true;
            }
        }
        EngineKind::Turbine => {
            let n2_target = if state.running {
                TURBINE_IDLE_N2 + (100.0 - TURBINE_IDLE_N2) * state.thrust_fraction
            } else if state.starter {
                TURBINE_STARTER_N2
            } else {
                0.0
            };
            state.n2 = first_order(state.n2, n2_target, TURBINE_SPOOL_TIME, dt);
            if !state.running && available && state.n2 >= TURBINE_LIGHT_OFF_N2 {
                state.running = true;
            }
        }
        EngineKind::Other => {
            if !state.running && state.power_lever > 0.01 {
                state.running = true;
            } else if state.running && state.power_lever <= 0.0 {
                state.running = false;
            }
        }
    }

    if state.running && !available {
        state.running = false;
    }

    let target_thrust_fraction = if state.running {
        state.power_lever.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let time_constant = if target_thrust_fraction > state.thrust_fraction {
        config.spool_up_time
    } else {
        config.spool_down_time
    };

    state.thrust_fraction = first_order(
        state.thrust_fraction,
        target_thrust_fraction,
        time_constant,
        dt,
    )
    .clamp(0.0, 1.0);
}

/// Drives an engine to steady state at its current power lever.
///
/// Returns false if the thrust fraction was still moving after the iteration limit.
pub fn steady_state(state: &mut PowerplantState, config: &PowerplantConfig) -> bool {
    for _ in 0..STEADY_STATE_MAX_ITERATIONS {
        let previous = (state.thrust_fraction, state.n2);
        update_powerplant_state(state, config, STEADY_STATE_DT);
        if (state.thrust_fraction - previous.0).abs() < STEADY_STATE_TOLERANCE
            && (state.n2 - previous.1).abs() < STEADY_STATE_TOLERANCE
        {
            return true;
        }
    }
    false
}

/// Calculates thrust scalar and fuel flow scalar based on current conditions.
fn calculate_thrust_and_fuel_flow(
    config: &PowerplantConfig,
    state: &PowerplantState,
    air_density: f64,
    airspeed: f64,
) -> (f64, f64) {
    if !state.running {
        return (0.0, 0.0);
    }

    let rho_sealevel = 1.225;
    let rho_factor = (air_density / rho_sealevel).max(0.01).sqrt();

    let speed_of_sound_sea_level = 340.3;
    let mach = (airspeed / speed_of_sound_sea_level).max(0.0);
    let ram_factor = (1.0_f64 - 0.1_f64 * mach).max(0.0_f64);

    let max_thrust_available = (config.max_thrust * rho_factor * ram_factor).max(0.0);
    let min_thrust_available = (config.min_thrust * rho_factor).max(0.0);
    let effective_max_thrust = max_thrust_available.max(min_thrust_available);

    let thrust = min_thrust_available
        + (effective_max_thrust - min_thrust_available) * state.thrust_fraction;

    let fuel_flow = if state.thrust_fraction > 1e-6 {
        let inefficiency_factor = 1.0 + 0.2 * state.thrust_fraction;
        thrust * config.tsfc * inefficiency_factor
    } else {
        0.0
    };

    (thrust.max(0.0), fuel_flow.max(0.0))
}

/// Outputs of a single engine in the body frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutputs {
    pub thrust: f64,
    pub force: Vector3<f64>,
    /// Moment of the thrust about the centre of gravity
    pub moment: Vector3<f64>,
    pub fuel_flow: f64,
}

/// Calculates force, moment and fuel flow for one engine in its current state.
pub fn calculate_engine_outputs(
    config: &PowerplantConfig,
    state: &PowerplantState,
    air_density: f64,
    airspeed: f64,
) -> EngineOutputs {
    let (thrust, fuel_flow) = calculate_thrust_and_fuel_flow(config, state, air_density, airspeed);

    let thrust_orientation = UnitQuaternion::from_euler_angles(
        config.orientation.x,
        config.orientation.y,
        config.orientation.z,
    );
    let force = (thrust_orientation * Vector3::x()) * thrust;

    EngineOutputs {
        thrust,
        force,
        moment: config.position.cross(&force),
        fuel_flow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn running_engine(kind: EngineKind) -> (PowerplantConfig, PowerplantState) {
        let config = PowerplantConfig {
            kind,
            ..Default::default()
        };
        let state = PowerplantState {
            running: true,
            magnetos: 3,
            mixture: 0.87,
            cutoff: false,
            n2: TURBINE_IDLE_N2,
            ..Default::default()
        };
        (config, state)
    }

    #[test]
    fn test_engine_spool_up() {
        let (config, mut state) = running_engine(EngineKind::Other);
        state.power_lever = 1.0;
        update_powerplant_state(&mut state, &config, 1.0);
        assert!(state.thrust_fraction > 0.0);
        assert!(state.thrust_fraction < 1.0);
        assert!(state.running);
    }

    #[test]
    fn test_engine_on_off_state() {
        let config = PowerplantConfig::default();
        let mut state = PowerplantState::default();
        state.power_lever = 0.5;
        update_powerplant_state(&mut state, &config, 0.1);
        assert!(state.running);

        state.power_lever = 0.0;
        update_powerplant_state(&mut state, &config, 0.1);
        assert!(!state.running);
    }

    #[test]
    fn test_piston_stops_without_fuel() {
        let (config, mut state) = running_engine(EngineKind::Piston);
        state.has_fuel = false;
        update_powerplant_state(&mut state, &config, 0.1);
        assert!(!state.running);
    }

    #[test]
    fn test_steady_state_reaches_lever() {
        let (config, mut state) = running_engine(EngineKind::Piston);
        state.power_lever = 0.6;
        assert!(steady_state(&mut state, &config));
        assert_relative_eq!(state.thrust_fraction, 0.6, epsilon = 1e-9);
    }

    #[test]
    fn test_thrust_lapses_with_altitude() {
        let (config, mut state) = running_engine(EngineKind::Other);
        state.thrust_fraction = 1.0;
        let sea_level = calculate_engine_outputs(&config, &state, 1.225, 0.0);
        let altitude = calculate_engine_outputs(&config, &state, 0.9, 0.0);
        assert_relative_eq!(sea_level.thrust, config.max_thrust);
        assert!(altitude.thrust < sea_level.thrust);
    }

    #[test]
    fn test_offset_engine_produces_moment() {
        let (mut config, mut state) = running_engine(EngineKind::Other);
        config.position = Vector3::new(0.0, 2.0, 0.0);
        state.thrust_fraction = 0.5;
        let outputs = calculate_engine_outputs(&config, &state, 1.225, 50.0);
        // Thrust on the right wing yaws the nose left
        assert!(outputs.moment.z < 0.0);
        assert!(outputs.fuel_flow > 0.0);
    }

    #[test]
    fn test_stopped_engine_produces_nothing() {
        let config = PowerplantConfig::default();
        let state = PowerplantState::default();
        let outputs = calculate_engine_outputs(&config, &state, 1.225, 50.0);
        assert_eq!(outputs.thrust, 0.0);
        assert_eq!(outputs.force, Vector3::zeros());
    }
}
