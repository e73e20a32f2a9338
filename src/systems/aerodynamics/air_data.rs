use nalgebra::{UnitQuaternion, Vector3};

/// Below this airspeed (m/s) the aerodynamic angles are taken as zero.
const MIN_AIRSPEED_THRESHOLD: f64 = 0.05;

/// Air data derived from the aircraft kinematics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirDataValues {
    pub true_airspeed: f64,
    pub alpha: f64,
    pub beta: f64,
    pub density: f64,
    pub dynamic_pressure: f64,
    /// Velocity relative to the air mass, body frame
    pub relative_velocity_body: Vector3<f64>,
}

impl AirDataValues {
    /// Air data from a wind-relative velocity already expressed in the body frame.
    pub fn from_body_velocity(relative_velocity_body: Vector3<f64>, density: f64) -> Self {
        let airspeed = relative_velocity_body.norm();
        let (alpha, beta) = if airspeed > MIN_AIRSPEED_THRESHOLD {
            let u = relative_velocity_body.x;
            let v = relative_velocity_body.y;
            let w = relative_velocity_body.z;
            (w.atan2(u), v.atan2(u.hypot(w)))
        } else {
            (0.0, 0.0)
        };

        Self {
            true_airspeed: airspeed,
            alpha,
            beta,
            density,
            dynamic_pressure: 0.5 * density * airspeed * airspeed,
            relative_velocity_body,
        }
    }
}

/// Computes air data from the NED velocity, attitude and NED wind.
pub fn calculate_air_data(
    velocity_ned: &Vector3<f64>,
    attitude: &UnitQuaternion<f64>,
    wind_ned: &Vector3<f64>,
    density: f64,
) -> AirDataValues {
    let relative_velocity_body = attitude.inverse() * (velocity_ned - wind_ned);
    AirDataValues::from_body_velocity(relative_velocity_body, density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_level_flight_air_data() {
        let air = calculate_air_data(
            &Vector3::new(50.0, 0.0, 0.0),
            &UnitQuaternion::identity(),
            &Vector3::zeros(),
            1.225,
        );
        assert_relative_eq!(air.true_airspeed, 50.0);
        assert_relative_eq!(air.alpha, 0.0);
        assert_relative_eq!(air.dynamic_pressure, 0.5 * 1.225 * 2500.0);
    }

    #[test]
    fn test_pitched_up_gives_positive_alpha() {
        let attitude = UnitQuaternion::from_euler_angles(0.0, 0.1, 0.0);
        let air = calculate_air_data(
            &Vector3::new(50.0, 0.0, 0.0),
            &attitude,
            &Vector3::zeros(),
            1.225,
        );
        assert_relative_eq!(air.alpha, 0.1, epsilon = 1e-12);
        assert_relative_eq!(air.beta, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_headwind_increases_airspeed() {
        let air = calculate_air_data(
            &Vector3::new(40.0, 0.0, 0.0),
            &UnitQuaternion::identity(),
            &Vector3::new(-10.0, 0.0, 0.0),
            1.225,
        );
        assert_relative_eq!(air.true_airspeed, 50.0);
    }

    #[test]
    fn test_angles_zero_when_stationary() {
        let air = AirDataValues::from_body_velocity(Vector3::new(0.0, 0.01, -0.01), 1.225);
        assert_eq!(air.alpha, 0.0);
        assert_eq!(air.beta, 0.0);
    }
}
