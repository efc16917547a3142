use glam::DVec3;

/// Below this squared axis delta a segment is treated as parallel to the
/// plane and yields no intercept.
const INTERCEPT_EPSILON: f64 = 1.0e-7;

/// Point where the segment `start -> end` crosses the plane `x = x_value`,
/// or `None` if the segment is parallel to the plane or the crossing falls
/// outside the segment.
pub fn intermediate_with_x_value(start: DVec3, end: DVec3, x_value: f64) -> Option<DVec3> {
    let delta = end - start;
    if delta.x * delta.x < INTERCEPT_EPSILON {
        return None;
    }
    let t = (x_value - start.x) / delta.x;
    (0.0..=1.0).contains(&t).then(|| start + delta * t)
}

/// Point where the segment `start -> end` crosses the plane `y = y_value`,
/// if one exists on the segment.
pub fn intermediate_with_y_value(start: DVec3, end: DVec3, y_value: f64) -> Option<DVec3> {
    let delta = end - start;
    if delta.y * delta.y < INTERCEPT_EPSILON {
        return None;
    }
    let t = (y_value - start.y) / delta.y;
    (0.0..=1.0).contains(&t).then(|| start + delta * t)
}

/// Point where the segment `start -> end` crosses the plane `z = z_value`,
/// if one exists on the segment.
pub fn intermediate_with_z_value(start: DVec3, end: DVec3, z_value: f64) -> Option<DVec3> {
    let delta = end - start;
    if delta.z * delta.z < INTERCEPT_EPSILON {
        return None;
    }
    let t = (z_value - start.z) / delta.z;
    (0.0..=1.0).contains(&t).then(|| start + delta * t)
}
