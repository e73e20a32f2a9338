use nalgebra::{UnitQuaternion, Vector3};

use crate::components::LandingGearConfig;

/// Horizontal contact speed below which rolling friction is ignored (m/s).
const FRICTION_SPEED_THRESHOLD: f64 = 0.1;

/// Net ground reaction on the airframe, body frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundReactions {
    pub force: Vector3<f64>,
    pub moment: Vector3<f64>,
    pub weight_on_wheels: bool,
}

/// Spring-damper reactions of every gear contact touching the terrain.
///
/// `position_ned` is the centre of gravity in the local NED frame and
/// `terrain_elevation` the ground height above the NED origin.
pub fn calculate_ground_reactions(
    gear: &LandingGearConfig,
    position_ned: &Vector3<f64>,
    attitude: &UnitQuaternion<f64>,
    velocity_body: &Vector3<f64>,
    rates_body: &Vector3<f64>,
    terrain_elevation: f64,
) -> GroundReactions {
    let mut reactions = GroundReactions::default();

    for contact in &gear.contacts {
        let point_ned = position_ned + attitude * contact.position;
        let compression = point_ned.z + terrain_elevation;
        if compression <= 0.0 {
            continue;
        }

        let point_velocity_ned = attitude * (velocity_body + rates_body.cross(&contact.position));
        let normal = (contact.stiffness * compression + contact.damping * point_velocity_ned.z)
            .max(0.0);
        if normal <= 0.0 {
            continue;
        }
        reactions.weight_on_wheels = true;

        let horizontal = Vector3::new(point_velocity_ned.x, point_velocity_ned.y, 0.0);
        let horizontal_speed = horizontal.norm();
        let friction = if horizontal_speed > FRICTION_SPEED_THRESHOLD {
            -horizontal * (contact.rolling_friction * normal / horizontal_speed)
        } else {
            Vector3::zeros()
        };

        let force_ned = friction + Vector3::new(0.0, 0.0, -normal);
        let force_body = attitude.inverse() * force_ned;
        reactions.force += force_body;
        reactions.moment += contact.position.cross(&force_body);
    }

    reactions
}
