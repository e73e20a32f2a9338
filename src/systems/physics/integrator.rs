use nalgebra::{UnitQuaternion, Vector3};

use crate::components::SpatialComponent;

/// Time derivatives of a spatial state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateDerivatives {
    /// Rate of change of the NED position, the NED velocity
    pub velocity: Vector3<f64>,
    /// NED acceleration
    pub acceleration: Vector3<f64>,
    /// Body angular acceleration
    pub angular_acceleration: Vector3<f64>,
}

fn rotate_body(
    attitude: &UnitQuaternion<f64>,
    angular_velocity: &Vector3<f64>,
    dt: f64,
) -> UnitQuaternion<f64> {
    if angular_velocity.norm() > 0.0 {
        attitude * UnitQuaternion::from_scaled_axis(angular_velocity * dt)
    } else {
        *attitude
    }
}

fn stage(
    initial: &SpatialComponent,
    k: &StateDerivatives,
    angular_velocity: &Vector3<f64>,
    dt: f64,
) -> SpatialComponent {
    SpatialComponent {
        position: initial.position + k.velocity * dt,
        velocity: initial.velocity + k.acceleration * dt,
        attitude: rotate_body(&initial.attitude, angular_velocity, dt),
        angular_velocity: initial.angular_velocity + k.angular_acceleration * dt,
    }
}

/// Advances `spatial` by one classical Runge-Kutta step.
///
/// `derivatives` is evaluated at each stage, so loads that depend on the state
/// (air data, ground contact) are recomputed along the step.
pub fn integrate_rk4<F>(spatial: &mut SpatialComponent, dt: f64, derivatives: F)
where
    F: Fn(&SpatialComponent) -> StateDerivatives,
{
    let initial = spatial.clone();

    let k1 = derivatives(&initial);

    let k2_angular_vel = initial.angular_velocity + k1.angular_acceleration * (dt / 2.0);
    let k2 = derivatives(&stage(&initial, &k1, &k2_angular_vel, dt / 2.0));

    let k3_angular_vel = initial.angular_velocity + k2.angular_acceleration * (dt / 2.0);
    let k3 = derivatives(&stage(&initial, &k2, &k3_angular_vel, dt / 2.0));

    let k4_angular_vel = initial.angular_velocity + k3.angular_acceleration * dt;
    let k4 = derivatives(&stage(&initial, &k3, &k4_angular_vel, dt));

    spatial.position = initial.position
        + (dt / 6.0) * (k1.velocity + 2.0 * k2.velocity + 2.0 * k3.velocity + k4.velocity);
    spatial.velocity = initial.velocity
        + (dt / 6.0)
            * (k1.acceleration + 2.0 * k2.acceleration + 2.0 * k3.acceleration + k4.acceleration);
    spatial.angular_velocity = initial.angular_velocity
        + (dt / 6.0)
            * (k1.angular_acceleration
                + 2.0 * k2.angular_acceleration
                + 2.0 * k3.angular_acceleration
                + k4.angular_acceleration);

    let omega_avg = (1.0 / 6.0)
        * (initial.angular_velocity + 2.0 * k2_angular_vel + 2.0 * k3_angular_vel + k4_angular_vel);
    let attitude = rotate_body(&initial.attitude, &omega_avg, dt);
    spatial.attitude = UnitQuaternion::from_quaternion(attitude.into_inner().normalize());
}

/// Applies velocity and angular velocity limits to prevent excessive motion.
pub fn apply_velocity_limits(
    spatial: &mut SpatialComponent,
    max_velocity: f64,
    max_angular_velocity: f64,
) {
    let velocity_norm = spatial.velocity.norm();
    if velocity_norm > max_velocity {
        spatial.velocity *= max_velocity / velocity_norm;
    }

    let angular_velocity_norm = spatial.angular_velocity.norm();
    if angular_velocity_norm > max_angular_velocity {
        spatial.angular_velocity *= max_angular_velocity / angular_velocity_norm;
    }
}
