use crate::math;
use crate::pose::EntityPose;
use crate::world::{BlockHandle, CollisionWorld};
use glam::DVec3;
use smallvec::SmallVec;

/// Mutable box volume attached to a body, described by a center point and
/// per-axis radii rather than min/max corners. Most queries against it ask
/// whether something sits within a given distance of the center, so the
/// radius form keeps the per-tick hot path on additions instead of
/// corner-interval math. Width is the X radius, height Y, depth Z.
///
/// `local_center` is the box's fixed offset from the owning body's origin
/// and is never written after construction; `global_center` is the world
/// position after the owner's rotation and translation have been applied,
/// and is the only field normally rewritten each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub local_center: DVec3,
    pub global_center: DVec3,
    /// Penetration reported by the most recent collision query. Rewritten,
    /// never accumulated, across queries.
    pub current_collision_depth: DVec3,
    /// Blocks reported by the most recent collision query, in the world
    /// service's iteration order. Inline capacity covers the usual
    /// few-cell overlap without allocating.
    pub colliding_blocks: SmallVec<[BlockHandle; 8]>,
    pub width_radius: f64,
    pub height_radius: f64,
    pub depth_radius: f64,
    pub collides_with_liquids: bool,
    pub is_interior: bool,
    pub is_collision: bool,
    pub armor_thickness: f64,
}

/// Properties fixed at construction. `is_collision` marks a box used for
/// hard collision resolution rather than a purely informational hitbox;
/// `armor_thickness` is consumed by damage logic, never by geometry here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxProperties {
    pub collides_with_liquids: bool,
    pub is_interior: bool,
    pub is_collision: bool,
    pub armor_thickness: f64,
}

impl BoundingBox {
    /// Box not attached to any rotating body: local and global centers
    /// coincide and all properties take their defaults.
    pub fn new(center: DVec3, width_radius: f64, height_radius: f64, depth_radius: f64) -> Self {
        Self::with_properties(
            center,
            center,
            width_radius,
            height_radius,
            depth_radius,
            BoxProperties::default(),
        )
    }

    /// Full form for entity-attached boxes. Radii must be finite and
    /// non-negative.
    pub fn with_properties(
        local_center: DVec3,
        global_center: DVec3,
        width_radius: f64,
        height_radius: f64,
        depth_radius: f64,
        properties: BoxProperties,
    ) -> Self {
        BoundingBox {
            local_center,
            global_center,
            current_collision_depth: DVec3::ZERO,
            colliding_blocks: SmallVec::new(),
            width_radius,
            height_radius,
            depth_radius,
            collides_with_liquids: properties.collides_with_liquids,
            is_interior: properties.is_interior,
            is_collision: properties.is_collision,
            armor_thickness: properties.armor_thickness,
        }
    }

    #[inline]
    pub fn radii(&self) -> DVec3 {
        DVec3::new(self.width_radius, self.height_radius, self.depth_radius)
    }

    /// World-space lower corner.
    #[inline]
    pub fn min_corner(&self) -> DVec3 {
        self.global_center - self.radii()
    }

    /// World-space upper corner.
    #[inline]
    pub fn max_corner(&self) -> DVec3 {
        self.global_center + self.radii()
    }

    /// Repositions this box onto the owning body's pose: the local center
    /// is rotated by the body's angles and offset by its position.
    /// Hard-collision boxes are additionally snapped to 0.1-unit steps,
    /// truncating toward zero, so repeated pose updates cannot accumulate
    /// floating-point jitter into the collision resolver. Informational
    /// boxes keep the raw coordinates.
    pub fn update_to_pose(&mut self, pose: &EntityPose) {
        self.global_center = pose.rotate(self.local_center) + pose.position;
        if self.is_collision {
            self.global_center = (self.global_center * 10.0).trunc() / 10.0;
        }
    }

    /// Populates `colliding_blocks` and `current_collision_depth` for this
    /// box displaced by `offset`. The offset applies only for the query
    /// and is reverted before returning. Returns whether any blocks
    /// collided.
    pub fn update_colliding_blocks<W: CollisionWorld + ?Sized>(
        &mut self,
        world: &W,
        offset: DVec3,
    ) -> bool {
        self.update_collisions(world, offset, false)
    }

    /// Like [`Self::update_colliding_blocks`], but takes movement into
    /// account when setting collision depth.
    pub fn update_moving_collisions<W: CollisionWorld + ?Sized>(
        &mut self,
        world: &W,
        offset: DVec3,
    ) -> bool {
        self.update_collisions(world, offset, true)
    }

    fn update_collisions<W: CollisionWorld + ?Sized>(
        &mut self,
        world: &W,
        offset: DVec3,
        ignore_if_greater: bool,
    ) -> bool {
        let saved_center = self.global_center;
        self.global_center += offset;
        world.update_bounding_box_collisions(self, offset, ignore_if_greater);
        self.global_center = saved_center;
        !self.colliding_blocks.is_empty()
    }

    /// Border points count as inside, so hit-scan code can tell which of
    /// two face-adjacent boxes owns the point it scanned to.
    pub fn is_point_inside(&self, point: DVec3) -> bool {
        self.global_center.x - self.width_radius <= point.x
            && self.global_center.x + self.width_radius >= point.x
            && self.global_center.y - self.height_radius <= point.y
            && self.global_center.y + self.height_radius >= point.y
            && self.global_center.z - self.depth_radius <= point.z
            && self.global_center.z + self.depth_radius >= point.z
    }

    /// Strict overlap test; boxes that only touch at a face do not
    /// intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.global_center.x - self.width_radius < other.global_center.x + other.width_radius
            && self.global_center.x + self.width_radius > other.global_center.x - other.width_radius
            && self.global_center.y - self.height_radius
                < other.global_center.y + other.height_radius
            && self.global_center.y + self.height_radius
                > other.global_center.y - other.height_radius
            && self.global_center.z - self.depth_radius < other.global_center.z + other.depth_radius
            && self.global_center.z + self.depth_radius > other.global_center.z - other.depth_radius
    }

    /// Inclusive containment on the Y and Z axes only.
    pub fn intersects_with_yz(&self, point: DVec3) -> bool {
        point.y >= self.global_center.y - self.height_radius
            && point.y <= self.global_center.y + self.height_radius
            && point.z >= self.global_center.z - self.depth_radius
            && point.z <= self.global_center.z + self.depth_radius
    }

    /// Inclusive containment on the X and Z axes only.
    pub fn intersects_with_xz(&self, point: DVec3) -> bool {
        point.x >= self.global_center.x - self.width_radius
            && point.x <= self.global_center.x + self.width_radius
            && point.z >= self.global_center.z - self.depth_radius
            && point.z <= self.global_center.z + self.depth_radius
    }

    /// Inclusive containment on the X and Y axes only.
    pub fn intersects_with_xy(&self, point: DVec3) -> bool {
        point.x >= self.global_center.x - self.width_radius
            && point.x <= self.global_center.x + self.width_radius
            && point.y >= self.global_center.y - self.height_radius
            && point.y <= self.global_center.y + self.height_radius
    }

    /// Point where the segment crosses the plane `x = x_value`, if that
    /// point also lies within this box's Y/Z bounds.
    pub fn get_x_plane_collision(&self, start: DVec3, end: DVec3, x_value: f64) -> Option<DVec3> {
        math::intermediate_with_x_value(start, end, x_value)
            .filter(|point| self.intersects_with_yz(*point))
    }

    /// Point where the segment crosses the plane `y = y_value`, if that
    /// point also lies within this box's X/Z bounds.
    pub fn get_y_plane_collision(&self, start: DVec3, end: DVec3, y_value: f64) -> Option<DVec3> {
        math::intermediate_with_y_value(start, end, y_value)
            .filter(|point| self.intersects_with_xz(*point))
    }

    /// Point where the segment crosses the plane `z = z_value`, if that
    /// point also lies within this box's X/Y bounds.
    pub fn get_z_plane_collision(&self, start: DVec3, end: DVec3, z_value: f64) -> Option<DVec3> {
        math::intermediate_with_z_value(start, end, z_value)
            .filter(|point| self.intersects_with_xy(*point))
    }

    /// First point where the segment `start -> end` enters this box, or
    /// `None` if it never does. The six faces are tested in X-min, X-max,
    /// Y-min, Y-max, Z-min, Z-max order and the candidate nearest `start`
    /// wins; on exact ties the earlier face keeps the hit.
    pub fn get_intersection_point(&self, start: DVec3, end: DVec3) -> Option<DVec3> {
        let candidates = [
            self.get_x_plane_collision(start, end, self.global_center.x - self.width_radius),
            self.get_x_plane_collision(start, end, self.global_center.x + self.width_radius),
            self.get_y_plane_collision(start, end, self.global_center.y - self.height_radius),
            self.get_y_plane_collision(start, end, self.global_center.y + self.height_radius),
            self.get_z_plane_collision(start, end, self.global_center.z - self.depth_radius),
            self.get_z_plane_collision(start, end, self.global_center.z + self.depth_radius),
        ];

        let mut closest: Option<DVec3> = None;
        for candidate in candidates.into_iter().flatten() {
            let is_closer = closest
                .is_none_or(|current| start.distance(candidate) < start.distance(current));
            if is_closer {
                closest = Some(candidate);
            }
        }
        closest
    }
}
