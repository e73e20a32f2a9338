//! Closed-form kinematics of steady turns and pull-ups.
//!
//! None of these functions guard against impossible geometry: an unreachable
//! load factor yields NaN, which the cost function carries through.

use nalgebra::Vector3;

/// Wind-axis bank angle giving load factor `nlf` at flight-path angle `gamma`.
pub fn phi_w_from_nlf(nlf: f64, gamma: f64) -> f64 {
    let cos_gamma = gamma.cos();
    (nlf * nlf - cos_gamma * cos_gamma).sqrt().atan2(cos_gamma)
}

/// Load factor of a turn banked `phi_w` at flight-path angle `gamma`.
pub fn nlf_from_phi_w(phi_w: f64, gamma: f64) -> f64 {
    let cga2 = gamma.cos().powi(2);
    (cga2 + cga2 * phi_w.tan().powi(2)).sqrt()
}

/// Pitch attitude of a coordinated turn.
pub fn coordinated_pitch(gamma: f64, psi: f64) -> f64 {
    let (sin_gamma, cos_gamma) = gamma.sin_cos();
    let (sin_psi, cos_psi) = psi.sin_cos();
    (sin_psi * cos_gamma + cos_psi * sin_gamma).atan2(cos_gamma)
}

/// Roll attitude and sideslip of a turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnGeometry {
    pub phi: f64,
    pub cos_beta: f64,
    pub sin_beta: f64,
}

pub fn turn_geometry(phi_w: f64, gamma: f64, theta: f64, psi: f64) -> TurnGeometry {
    let (sin_phw, cos_phw) = phi_w.sin_cos();
    let (sin_gamma, cos_gamma) = gamma.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_psi, cos_psi) = psi.sin_cos();

    let c1 = cos_phw * sin_gamma * cos_theta * sin_psi + sin_phw * cos_theta * cos_psi;
    let c2 = cos_phw * cos_gamma * cos_theta * cos_psi + cos_phw * sin_gamma * sin_theta;
    let c3 = sin_phw * sin_theta + cos_phw * cos_gamma * cos_theta * sin_psi;

    // Bounded by one in exact arithmetic; clamp away rounding only
    let cos_beta = ((c1 * sin_phw * cos_gamma + c2 * cos_phw + c3 * sin_phw * sin_gamma)
        / (c1 * c1 + c2 * c2 + c3 * c3).sqrt())
    .clamp(-1.0, 1.0);
    let sin_beta = (1.0 - cos_beta * cos_beta).sqrt();
    let phi = ((cos_beta * sin_phw * cos_gamma - sin_beta * sin_gamma) / cos_theta).asin();

    TurnGeometry {
        phi,
        cos_beta,
        sin_beta,
    }
}

/// Heading rate of a turn banked `phi_w` at airspeed `airspeed` (rad/s).
pub fn turn_rate(phi_w: f64, airspeed: f64, gravity: f64) -> f64 {
    gravity * phi_w.tan() / airspeed
}

/// Body rates p, q, r of a turn.
pub fn turn_body_rates(
    psi_dot_w: f64,
    phi_w: f64,
    gamma: f64,
    theta: f64,
    psi: f64,
    geometry: &TurnGeometry,
) -> Vector3<f64> {
    let (sin_phw, cos_phw) = phi_w.sin_cos();
    let (sin_gamma, cos_gamma) = gamma.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_psi, cos_psi) = psi.sin_cos();

    let cth2 = cos_theta * cos_theta;
    let scth = sin_theta * cos_theta;
    let cph2 = cos_phw * cos_phw;
    let scph = sin_phw * cos_phw;
    let cga2 = cos_gamma * cos_gamma;
    let scga = sin_gamma * cos_gamma;
    let cps2 = cos_psi * cos_psi;
    let scps = sin_psi * cos_psi;

    let c_alpha = (1.0 - cth2 + cph2 * cth2 - 2.0 * scph * scth * cos_gamma * sin_psi
        + cph2 * cga2 * cth2
        + cph2 * cga2 * cth2 * (1.0 - cps2)
        + 2.0 * cph2 * scga * scth * cos_psi
        - cga2 * cph2
        - 2.0 * cph2 * cth2 * cps2
        + 2.0 * scph * sin_gamma * cth2 * scps
        + cps2 * cth2)
        .sqrt();
    let s_alpha = (1.0 - c_alpha * c_alpha).sqrt();
    let c_beta = geometry.cos_beta;
    let s_beta = geometry.sin_beta;

    let p = -psi_dot_w
        * (sin_gamma * c_alpha * c_beta
            + cos_gamma * sin_phw * c_alpha * s_beta
            + cos_gamma * cos_phw * s_alpha);
    let q = -psi_dot_w * (sin_gamma * s_beta - cos_gamma * sin_phw * c_beta);
    let r = -psi_dot_w
        * (sin_gamma * s_alpha * c_beta + cos_gamma * sin_phw * s_alpha * s_beta
            - cos_gamma * cos_phw * c_alpha);

    Vector3::new(p, q, r)
}

/// Pitch rate of a steady pull-up at load factor `nlf`.
pub fn pullup_pitch_rate(nlf: f64, gamma: f64, airspeed: f64, gravity: f64) -> f64 {
    gravity * (nlf - gamma.cos()) / airspeed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_level_turn_bank_angle() {
        let nlf = 1.41;
        assert_relative_eq!(phi_w_from_nlf(nlf, 0.0), (1.0 / nlf).acos(), epsilon = 1e-12);
    }

    #[test]
    fn test_load_factor_round_trip() {
        for &(nlf, gamma) in &[(1.0, 0.0), (1.41, 0.0), (2.0, 0.1), (3.5, -0.2)] {
            let phi_w = phi_w_from_nlf(nlf, gamma);
            assert_relative_eq!(nlf_from_phi_w(phi_w, gamma), nlf, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_unreachable_load_factor_is_nan() {
        assert!(phi_w_from_nlf(0.5, 0.0).is_nan());
    }

    #[test]
    fn test_level_turn_geometry_has_no_sideslip() {
        let phi_w = 45.0_f64.to_radians();
        let geometry = turn_geometry(phi_w, 0.0, 0.0, 0.0);
        assert_relative_eq!(geometry.cos_beta, 1.0, epsilon = 1e-12);
        assert_relative_eq!(geometry.phi, phi_w, epsilon = 1e-6);
    }

    #[test]
    fn test_level_turn_pitch_rate() {
        let phi_w = 45.0_f64.to_radians();
        let geometry = turn_geometry(phi_w, 0.0, 0.0, 0.0);
        let psi_dot = turn_rate(phi_w, 50.0, 9.80665);
        let rates = turn_body_rates(psi_dot, phi_w, 0.0, 0.0, 0.0, &geometry);
        assert_relative_eq!(rates.y, psi_dot * phi_w.sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_pullup_pitch_rate() {
        let q = pullup_pitch_rate(2.0, 0.0, 45.72, 9.80665);
        assert_eq!(q, 9.80665 * (2.0 - 1.0) / 45.72);
    }
}
