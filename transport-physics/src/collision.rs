use crate::bounds::BoundingBox;
use glam::DVec3;

/// Static min/max volume of a single voxel cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Aabb {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn translate(&self, translation: DVec3) -> Self {
        Aabb {
            min: self.min + translation,
            max: self.max + translation,
        }
    }

    /// Strict overlap against a center/radius box; face contact alone is
    /// not an overlap.
    #[inline]
    pub fn intersects_box(&self, bbox: &BoundingBox) -> bool {
        self.min.x < bbox.global_center.x + bbox.width_radius
            && self.max.x > bbox.global_center.x - bbox.width_radius
            && self.min.y < bbox.global_center.y + bbox.height_radius
            && self.max.y > bbox.global_center.y - bbox.height_radius
            && self.min.z < bbox.global_center.z + bbox.depth_radius
            && self.max.z > bbox.global_center.z - bbox.depth_radius
    }
}

/// Penetration of a box into one cell, measured per axis against the
/// direction of motion. With `ignore_if_greater`, axes whose depth exceeds
/// the motion that could have caused it this tick are zeroed.
pub(crate) fn penetration_depth(
    bbox: &BoundingBox,
    cell: &Aabb,
    offset: DVec3,
    ignore_if_greater: bool,
) -> DVec3 {
    let box_min = bbox.min_corner();
    let box_max = bbox.max_corner();
    DVec3::new(
        axis_penetration(
            box_min.x,
            box_max.x,
            cell.min.x,
            cell.max.x,
            offset.x,
            ignore_if_greater,
        ),
        axis_penetration(
            box_min.y,
            box_max.y,
            cell.min.y,
            cell.max.y,
            offset.y,
            ignore_if_greater,
        ),
        axis_penetration(
            box_min.z,
            box_max.z,
            cell.min.z,
            cell.max.z,
            offset.z,
            ignore_if_greater,
        ),
    )
}

fn axis_penetration(
    box_min: f64,
    box_max: f64,
    cell_min: f64,
    cell_max: f64,
    motion: f64,
    ignore_if_greater: bool,
) -> f64 {
    let depth = if motion > 0.0 {
        box_max - cell_min
    } else if motion < 0.0 {
        cell_max - box_min
    } else {
        (box_max - cell_min).min(cell_max - box_min)
    };
    if ignore_if_greater && depth > motion.abs() {
        0.0
    } else {
        depth.max(0.0)
    }
}
