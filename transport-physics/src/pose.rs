use glam::{DQuat, DVec3, EulerRot};

/// Position and orientation of a box-owning body.
///
/// Angles are Euler degrees (pitch about X, yaw about Y, roll about Z),
/// applied in Y-X-Z order when rotating local offsets into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityPose {
    pub position: DVec3,
    pub angles: DVec3,
}

impl EntityPose {
    pub fn new(position: DVec3, angles: DVec3) -> Self {
        EntityPose { position, angles }
    }

    /// Orientation for the current angles.
    #[inline]
    pub fn orientation(&self) -> DQuat {
        DQuat::from_euler(
            EulerRot::YXZ,
            self.angles.y.to_radians(),
            self.angles.x.to_radians(),
            self.angles.z.to_radians(),
        )
    }

    /// Rotates a local-frame offset into the world frame.
    #[inline]
    pub fn rotate(&self, point: DVec3) -> DVec3 {
        self.orientation() * point
    }
}
