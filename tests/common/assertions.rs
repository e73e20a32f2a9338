use flyer_trim::components::{SpatialComponent, TrimResult};

/// Assert that a spatial component's state is valid
#[track_caller]
pub fn assert_spatial_valid(spatial: &SpatialComponent) {
    assert!(
        spatial.position.iter().all(|x| x.is_finite()),
        "Position is not finite"
    );
    assert!(
        spatial.velocity.iter().all(|x| x.is_finite()),
        "Velocity is not finite"
    );
    assert!(
        spatial.angular_velocity.iter().all(|x| x.is_finite()),
        "Angular velocity is not finite"
    );
    assert!(
        (spatial.attitude.norm() - 1.0).abs() < 1e-6,
        "Attitude quaternion is not normalized"
    );
}

/// Assert that a trim result holds usable commands and a finite state
#[track_caller]
pub fn assert_trim_result_valid(result: &TrimResult) {
    let c = &result.commands;
    assert!(
        (0.0..=1.0).contains(&c.throttle),
        "Throttle {} outside [0, 1]",
        c.throttle
    );
    for (name, value) in [
        ("elevator", c.elevator),
        ("aileron", c.aileron),
        ("rudder", c.rudder),
    ] {
        assert!(
            (-1.0..=1.0).contains(&value),
            "{} {} outside [-1, 1]",
            name,
            value
        );
    }
    assert!(
        result.state.velocity_body.iter().all(|x| x.is_finite()),
        "Trimmed body velocity is not finite"
    );
    assert!(result.cost >= 0.0, "Negative cost {}", result.cost);
    assert!(result.improvements <= result.evaluations);
}
