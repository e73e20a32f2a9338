use nalgebra::Vector3;

use crate::components::MassModel;

/// Rigid-body accelerations expressed in the body frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyAccelerations {
    /// udot, vdot, wdot (m/s^2)
    pub linear: Vector3<f64>,
    /// pdot, qdot, rdot (rad/s^2)
    pub angular: Vector3<f64>,
}

/// Newton-Euler equations for a rigid body over a flat, non-rotating earth.
///
/// Forces and moments are the external loads in the body frame, excluding
/// gravity, which is passed separately as an acceleration in the body frame.
pub fn newton_euler(
    velocity_body: &Vector3<f64>,
    rates_body: &Vector3<f64>,
    force_body: &Vector3<f64>,
    moment_body: &Vector3<f64>,
    gravity_body: &Vector3<f64>,
    mass: &MassModel,
) -> BodyAccelerations {
    let linear = velocity_body.cross(rates_body) + force_body / mass.mass + gravity_body;

    let gyro_term = rates_body.cross(&(mass.inertia * rates_body));
    let angular = mass.inertia_inv * (moment_body - gyro_term);

    BodyAccelerations { linear, angular }
}
