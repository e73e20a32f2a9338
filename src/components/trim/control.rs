use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use bevy::prelude::*;

use crate::components::{AircraftModel, FullAircraftConfig, InitialConditions};

/// Fallback angle of attack range when the aircraft has no usable stall envelope.
const FALLBACK_ALPHA_MIN_DEG: f64 = -5.0;
const FALLBACK_ALPHA_MAX_DEG: f64 = 20.0;

/// Default convergence tolerance reported for a control.
pub const DEFAULT_CONTROL_TOLERANCE: f64 = 1e-5;

/// Adjustable quantities a trim can solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Throttle,
    Elevator,
    Aileron,
    Rudder,
    Roll,
    Pitch,
    Heading,
    Altitude,
    FlightPathAngle,
    Alpha,
    Beta,
    PitchTrim,
    RollTrim,
    YawTrim,
}

/// Unit a control value is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlUnit {
    /// Dimensionless command, displayed as is.
    Normalized,
    /// Angle, displayed in degrees.
    Radians,
    Meters,
}

impl ControlUnit {
    pub fn to_display(&self, value: f64) -> f64 {
        match self {
            ControlUnit::Radians => value.to_degrees(),
            ControlUnit::Normalized | ControlUnit::Meters => value,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ControlUnit::Normalized => "",
            ControlUnit::Radians => "deg",
            ControlUnit::Meters => "m",
        }
    }
}

impl ControlKind {
    pub fn name(&self) -> &'static str {
        match self {
            ControlKind::Throttle => "Throttle",
            ControlKind::Elevator => "Elevator",
            ControlKind::Aileron => "Aileron",
            ControlKind::Rudder => "Rudder",
            ControlKind::Roll => "Roll Angle",
            ControlKind::Pitch => "Pitch Angle",
            ControlKind::Heading => "Heading",
            ControlKind::Altitude => "Altitude AGL",
            ControlKind::FlightPathAngle => "Flight Path Angle",
            ControlKind::Alpha => "Alpha",
            ControlKind::Beta => "Beta",
            ControlKind::PitchTrim => "Pitch Trim",
            ControlKind::RollTrim => "Roll Trim",
            ControlKind::YawTrim => "Yaw Trim",
        }
    }

    pub fn unit(&self) -> ControlUnit {
        match self {
            ControlKind::Throttle
            | ControlKind::Elevator
            | ControlKind::Aileron
            | ControlKind::Rudder
            | ControlKind::PitchTrim
            | ControlKind::RollTrim
            | ControlKind::YawTrim => ControlUnit::Normalized,
            ControlKind::Altitude => ControlUnit::Meters,
            ControlKind::Roll
            | ControlKind::Pitch
            | ControlKind::Heading
            | ControlKind::FlightPathAngle
            | ControlKind::Alpha
            | ControlKind::Beta => ControlUnit::Radians,
        }
    }

    /// Physically valid range, independent of the search bounds.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            ControlKind::Throttle => (0.0, 1.0),
            ControlKind::Elevator
            | ControlKind::Aileron
            | ControlKind::Rudder
            | ControlKind::PitchTrim
            | ControlKind::RollTrim
            | ControlKind::YawTrim => (-1.0, 1.0),
            ControlKind::Heading => (0.0, TAU),
            ControlKind::Pitch | ControlKind::FlightPathAngle => (-FRAC_PI_2, FRAC_PI_2),
            ControlKind::Roll | ControlKind::Alpha | ControlKind::Beta => (-PI, PI),
            ControlKind::Altitude => (0.0, f64::INFINITY),
        }
    }

    pub fn in_domain(&self, value: f64) -> bool {
        let (min, max) = self.domain();
        value >= min && value <= max
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Candidate values keyed by the quantity they control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlVector(BTreeMap<ControlKind, f64>);

impl ControlVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs kinds with values positionally. Returns `None` on a length mismatch.
    pub fn from_parts(kinds: &[ControlKind], values: &[f64]) -> Option<Self> {
        if kinds.len() != values.len() {
            return None;
        }
        Some(Self(kinds.iter().copied().zip(values.iter().copied()).collect()))
    }

    pub fn get(&self, kind: ControlKind) -> Option<f64> {
        self.0.get(&kind).copied()
    }

    pub fn insert(&mut self, kind: ControlKind, value: f64) -> Option<f64> {
        self.0.insert(kind, value)
    }

    pub fn contains(&self, kind: ControlKind) -> bool {
        self.0.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ControlKind, f64> {
        self.0.iter()
    }
}

impl FromIterator<(ControlKind, f64)> for ControlVector {
    fn from_iter<T: IntoIterator<Item = (ControlKind, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One free variable of a trim: what it controls, where the search may take it,
/// and how far the initial simplex perturbs it.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlDescriptor {
    kind: ControlKind,
    /// Value from the last committed improvement, or the initial value.
    pub value: f64,
    pub initial: f64,
    pub step: f64,
    pub min: f64,
    pub max: f64,
    pub tolerance: f64,
}

impl ControlDescriptor {
    /// Builds a descriptor with the default bounds and step for `kind`.
    ///
    /// Bounds on the Euler angles are centred on the current initial conditions.
    /// Alpha bounds come from the aircraft stall envelope, with a conservative
    /// fallback when the aircraft does not provide one.
    pub fn create(
        kind: ControlKind,
        aircraft: &FullAircraftConfig,
        conditions: &InitialConditions,
    ) -> Self {
        let one_degree = 1.0_f64.to_radians();
        let (initial, step, min, max) = match kind {
            ControlKind::Throttle => (0.5, 0.2, 0.0, 1.0),
            ControlKind::Elevator
            | ControlKind::Aileron
            | ControlKind::Rudder
            | ControlKind::PitchTrim
            | ControlKind::RollTrim
            | ControlKind::YawTrim => (0.0, 0.1, -1.0, 1.0),
            ControlKind::Beta => (0.0, one_degree, -30.0_f64.to_radians(), 30.0_f64.to_radians()),
            ControlKind::Alpha => {
                let (min, max) = match aircraft.aero_coef.stall {
                    Some(stall) if stall.is_valid() => (stall.alpha_min, stall.alpha_max),
                    _ => {
                        warn!(
                            "{} has no usable stall envelope, alpha bounded to [{}, {}] deg",
                            aircraft.name, FALLBACK_ALPHA_MIN_DEG, FALLBACK_ALPHA_MAX_DEG
                        );
                        (
                            FALLBACK_ALPHA_MIN_DEG.to_radians(),
                            FALLBACK_ALPHA_MAX_DEG.to_radians(),
                        )
                    }
                };
                (0.5 * (min + max), one_degree, min, max)
            }
            ControlKind::Roll => {
                let half = 30.0_f64.to_radians();
                (conditions.phi, one_degree, conditions.phi - half, conditions.phi + half)
            }
            ControlKind::Pitch => {
                let half = 5.0_f64.to_radians();
                (
                    conditions.theta,
                    one_degree,
                    conditions.theta - half,
                    conditions.theta + half,
                )
            }
            ControlKind::Heading => {
                let half = 30.0_f64.to_radians();
                (conditions.psi, one_degree, conditions.psi - half, conditions.psi + half)
            }
            ControlKind::FlightPathAngle => (
                conditions.gamma,
                one_degree,
                -80.0_f64.to_radians(),
                80.0_f64.to_radians(),
            ),
            ControlKind::Altitude => (conditions.altitude_agl(), 0.5, 0.0, 10.0),
        };

        Self {
            kind,
            value: initial,
            initial,
            step,
            min,
            max,
            tolerance: DEFAULT_CONTROL_TOLERANCE,
        }
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    /// True when `value` lies inside both the search bounds and the physical domain.
    pub fn in_bounds(&self, value: f64) -> bool {
        value >= self.min && value <= self.max && self.kind.in_domain(value)
    }

    /// Current value in display units.
    pub fn display_value(&self) -> f64 {
        self.kind.unit().to_display(self.value)
    }

    /// Reads the quantity this descriptor is bound to.
    pub fn read(&self, model: &AircraftModel, conditions: &InitialConditions) -> f64 {
        match self.kind {
            ControlKind::Throttle => model.throttle(),
            ControlKind::Elevator => model.controls.elevator,
            ControlKind::Aileron => model.controls.aileron,
            ControlKind::Rudder => model.controls.rudder,
            ControlKind::PitchTrim => model.controls.pitch_trim,
            ControlKind::RollTrim => model.controls.roll_trim,
            ControlKind::YawTrim => model.controls.yaw_trim,
            ControlKind::Roll => conditions.phi,
            ControlKind::Pitch => conditions.theta,
            ControlKind::Heading => conditions.psi,
            ControlKind::Altitude => conditions.altitude_agl(),
            ControlKind::FlightPathAngle => conditions.gamma,
            ControlKind::Alpha => conditions.alpha,
            ControlKind::Beta => conditions.beta,
        }
    }

    /// Writes `value` to the bound quantity. Bounds are not enforced here.
    pub fn write(&self, value: f64, model: &mut AircraftModel, conditions: &mut InitialConditions) {
        match self.kind {
            ControlKind::Throttle => model.set_throttle(value),
            ControlKind::Elevator => model.controls.elevator = value,
            ControlKind::Aileron => model.controls.aileron = value,
            ControlKind::Rudder => model.controls.rudder = value,
            ControlKind::PitchTrim => model.controls.pitch_trim = value,
            ControlKind::RollTrim => model.controls.roll_trim = value,
            ControlKind::YawTrim => model.controls.yaw_trim = value,
            ControlKind::Roll => conditions.phi = value,
            ControlKind::Pitch => conditions.theta = value,
            ControlKind::Heading => conditions.psi = value,
            ControlKind::Altitude => conditions.set_altitude_agl(value),
            ControlKind::FlightPathAngle => conditions.gamma = value,
            ControlKind::Alpha => conditions.alpha = value,
            ControlKind::Beta => conditions.beta = value,
        }
    }
}
