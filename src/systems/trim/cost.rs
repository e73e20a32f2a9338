use nalgebra::Vector3;

use crate::components::TrimMode;

/// Weight of the squared angular accelerations against the linear ones.
const ANGULAR_ACCEL_WEIGHT: f64 = 0.01;

/// Squared acceleration residual of a candidate trim point.
///
/// Longitudinal and pull-up trims only see the symmetric axes.
pub fn trim_cost(mode: TrimMode, linear: &Vector3<f64>, angular: &Vector3<f64>) -> f64 {
    if mode.is_longitudinal() {
        linear.x.powi(2) + linear.z.powi(2) + ANGULAR_ACCEL_WEIGHT * angular.y.powi(2)
    } else {
        linear.norm_squared() + ANGULAR_ACCEL_WEIGHT * angular.norm_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_longitudinal_ignores_lateral_axes() {
        let linear = Vector3::new(1.0, 5.0, 2.0);
        let angular = Vector3::new(7.0, 10.0, 3.0);
        assert_relative_eq!(trim_cost(TrimMode::Longitudinal, &linear, &angular), 6.0);
        assert_relative_eq!(trim_cost(TrimMode::Pullup, &linear, &angular), 6.0);
    }

    #[test]
    fn test_full_sums_every_axis() {
        let linear = Vector3::new(1.0, 2.0, 3.0);
        let angular = Vector3::new(1.0, 1.0, 1.0);
        assert_relative_eq!(trim_cost(TrimMode::Full, &linear, &angular), 14.03);
        assert_relative_eq!(trim_cost(TrimMode::Ground, &linear, &angular), 14.03);
    }

    #[test]
    fn test_angular_terms_are_weighted() {
        let angular = Vector3::new(1.0, 1.0, 1.0);
        for mode in [TrimMode::Full, TrimMode::FullWingsLevel, TrimMode::Turn, TrimMode::TurnFull] {
            assert_relative_eq!(trim_cost(mode, &Vector3::zeros(), &angular), 0.03);
        }
    }

    #[test]
    fn test_nan_propagates() {
        let linear = Vector3::new(f64::NAN, 0.0, 0.0);
        assert!(trim_cost(TrimMode::Turn, &linear, &Vector3::zeros()).is_nan());
    }
}
