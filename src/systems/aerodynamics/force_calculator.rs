use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::components::{AircraftAeroCoefficients, AircraftControlSurfaces, AircraftGeometry};
use crate::systems::AirDataValues;

/// Calculates aerodynamic forces and moments in the BODY frame.
///
/// Lift and drag act in wind axes and are rotated through alpha into the body
/// frame. Effective surface deflections include the trim tabs.
///
/// # Returns
/// A tuple containing: `(body_forces, body_moments)`
pub fn calculate_aerodynamic_forces_moments(
    geometry: &AircraftGeometry,
    coeffs: &AircraftAeroCoefficients,
    air_data: &AirDataValues,
    angular_velocity_body: &Vector3<f64>,
    controls: &AircraftControlSurfaces,
) -> (Vector3<f64>, Vector3<f64>) {
    if air_data.dynamic_pressure <= 1e-6 || air_data.true_airspeed <= 0.1 {
        return (Vector3::zeros(), Vector3::zeros());
    }

    let q_dyn = air_data.dynamic_pressure;
    let elevator = controls.effective_elevator();
    let aileron = controls.effective_aileron();
    let rudder = controls.effective_rudder();

    // Clamp angles and rates to the range the polynomial fits are valid for
    let alpha = air_data.alpha.clamp(-10.0 * PI / 180.0, 40.0 * PI / 180.0);
    let beta = air_data.beta.clamp(-20.0 * PI / 180.0, 20.0 * PI / 180.0);
    let p = angular_velocity_body
        .x
        .clamp(-100.0 * PI / 180.0, 100.0 * PI / 180.0);
    let q = angular_velocity_body
        .y
        .clamp(-50.0 * PI / 180.0, 50.0 * PI / 180.0);
    let r = angular_velocity_body
        .z
        .clamp(-50.0 * PI / 180.0, 50.0 * PI / 180.0);

    // Non-dimensional rates
    let airspeed = air_data.true_airspeed;
    let span = geometry.wing_span;
    let mac = geometry.mac;
    let v_denom = 2.0 * airspeed;
    let p_hat = (span / v_denom) * p;
    let q_hat = (mac / v_denom) * q;
    let r_hat = (span / v_denom) * r;

    let c_d = coeffs.drag.c_d_0
        + (coeffs.drag.c_d_alpha * alpha)
        + (coeffs.drag.c_d_alpha_q * alpha * q_hat)
        + (coeffs.drag.c_d_alpha_deltae * alpha * elevator)
        + (coeffs.drag.c_d_alpha2 * alpha.powi(2))
        + (coeffs.drag.c_d_alpha2_q * q_hat * alpha.powi(2))
        + (coeffs.drag.c_d_alpha2_deltae * elevator * alpha.powi(2))
        + (coeffs.drag.c_d_alpha3 * alpha.powi(3))
        + (coeffs.drag.c_d_alpha3_q * q_hat * alpha.powi(3))
        + (coeffs.drag.c_d_alpha4 * alpha.powi(4));

    let c_y = coeffs.side_force.c_y_beta * beta
        + (coeffs.side_force.c_y_p * p_hat)
        + (coeffs.side_force.c_y_r * r_hat)
        + (coeffs.side_force.c_y_deltaa * aileron)
        + (coeffs.side_force.c_y_deltar * rudder);

    let c_l = coeffs.lift.c_l_0
        + (coeffs.lift.c_l_alpha * alpha)
        + (coeffs.lift.c_l_q * q_hat)
        + (coeffs.lift.c_l_deltae * elevator)
        + (coeffs.lift.c_l_alpha_q * alpha * q_hat)
        + (coeffs.lift.c_l_alpha2 * alpha.powi(2))
        + (coeffs.lift.c_l_alpha3 * alpha.powi(3))
        + (coeffs.lift.c_l_alpha4 * alpha.powi(4));

    let c_l_roll = coeffs.roll.c_l_beta * beta
        + (coeffs.roll.c_l_p * p_hat)
        + (coeffs.roll.c_l_r * r_hat)
        + (coeffs.roll.c_l_deltaa * aileron)
        + (coeffs.roll.c_l_deltar * rudder);

    let c_m = coeffs.pitch.c_m_0
        + (coeffs.pitch.c_m_alpha * alpha)
        + (coeffs.pitch.c_m_q * q_hat)
        + (coeffs.pitch.c_m_deltae * elevator)
        + (coeffs.pitch.c_m_alpha_q * alpha * q_hat)
        + (coeffs.pitch.c_m_alpha2_q * q_hat * alpha.powi(2))
        + (coeffs.pitch.c_m_alpha2_deltae * elevator * alpha.powi(2))
        + (coeffs.pitch.c_m_alpha3_q * q_hat * alpha.powi(3))
        + (coeffs.pitch.c_m_alpha3_deltae * elevator * alpha.powi(3))
        + (coeffs.pitch.c_m_alpha4 * alpha.powi(4));

    let c_n = coeffs.yaw.c_n_beta * beta
        + (coeffs.yaw.c_n_p * p_hat)
        + (coeffs.yaw.c_n_r * r_hat)
        + (coeffs.yaw.c_n_deltaa * aileron)
        + (coeffs.yaw.c_n_deltar * rudder)
        + (coeffs.yaw.c_n_beta2 * beta.powi(2))
        + (coeffs.yaw.c_n_beta3 * beta.powi(3));

    // Rotate drag and lift from wind to body axes using the unclamped alpha
    let qs = q_dyn * geometry.wing_area;
    let (sin_alpha, cos_alpha) = air_data.alpha.sin_cos();
    let forces_body = Vector3::new(
        qs * (-c_d * cos_alpha + c_l * sin_alpha),
        qs * c_y,
        qs * (-c_d * sin_alpha - c_l * cos_alpha),
    );

    let moments_body = Vector3::new(
        qs * geometry.wing_span * c_l_roll,
        qs * geometry.mac * c_m,
        qs * geometry.wing_span * c_n,
    );

    (forces_body, moments_body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cruise_air_data(alpha: f64) -> AirDataValues {
        let speed = 50.0;
        AirDataValues::from_body_velocity(
            Vector3::new(speed * alpha.cos(), 0.0, speed * alpha.sin()),
            1.225,
        )
    }

    fn forces(
        air_data: &AirDataValues,
        controls: &AircraftControlSurfaces,
    ) -> (Vector3<f64>, Vector3<f64>) {
        calculate_aerodynamic_forces_moments(
            &AircraftGeometry::cessna_172(),
            &AircraftAeroCoefficients::cessna_172(),
            air_data,
            &Vector3::zeros(),
            controls,
        )
    }

    #[test]
    fn test_zero_dynamic_pressure() {
        let (f, m) = forces(&AirDataValues::default(), &AircraftControlSurfaces::default());
        assert_eq!(f, Vector3::zeros());
        assert_eq!(m, Vector3::zeros());
    }

    #[test]
    fn test_lift_increases_with_alpha() {
        let controls = AircraftControlSurfaces::default();
        let (f_low, _) = forces(&cruise_air_data(0.0), &controls);
        let (f_high, _) = forces(&cruise_air_data(0.1), &controls);

        // Body z points down, more lift means a more negative Fz
        assert!(f_high.z < f_low.z);
    }

    #[test]
    fn test_symmetric_flight_has_no_side_force() {
        let (f, m) = forces(&cruise_air_data(0.05), &AircraftControlSurfaces::default());
        assert_relative_eq!(f.y, 0.0);
        assert_relative_eq!(m.x, 0.0);
        assert_relative_eq!(m.z, 0.0);
    }

    #[test]
    fn test_trim_tab_acts_like_elevator() {
        let air_data = cruise_air_data(0.05);
        let elevator = AircraftControlSurfaces {
            elevator: -0.1,
            ..Default::default()
        };
        let tab = AircraftControlSurfaces {
            pitch_trim: -0.1,
            ..Default::default()
        };
        let (_, m_elevator) = forces(&air_data, &elevator);
        let (_, m_tab) = forces(&air_data, &tab);
        assert_relative_eq!(m_elevator.y, m_tab.y);
    }
}
