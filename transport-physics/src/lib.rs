mod bounds;
mod collision;
mod math;
mod pose;
mod world;

pub use bounds::{BoundingBox, BoxProperties};
pub use collision::Aabb;
pub use math::{intermediate_with_x_value, intermediate_with_y_value, intermediate_with_z_value};
pub use pose::EntityPose;
pub use world::{BlockHandle, CollisionMaterial, CollisionWorld, GridWorld};
