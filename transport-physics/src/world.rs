use crate::bounds::BoundingBox;
use crate::collision::{Aabb, penetration_depth};
use glam::{DVec3, IVec3};
use std::collections::HashMap;

/// Opaque handle to a block reported by a collision query: the world-space
/// cell coordinate the world service registers the block under. Resolve it
/// back to block data through the service that reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle(pub IVec3);

/// World-collision service consumed by [`BoundingBox`].
///
/// Implementations must, before returning, replace `bbox.colliding_blocks`
/// with the handles of exactly the blocks overlapping the box at its
/// current (already displaced) position, in the service's natural
/// iteration order, and set `bbox.current_collision_depth` to the
/// penetration vector of that overlap (zero when nothing overlaps). The
/// box's `collides_with_liquids` and `is_interior` flags select which
/// block categories are tested.
pub trait CollisionWorld {
    fn update_bounding_box_collisions(
        &self,
        bbox: &mut BoundingBox,
        offset: DVec3,
        ignore_if_greater: bool,
    );
}

/// Collision categories of a block type.
pub trait CollisionMaterial {
    /// Collision volume relative to the cell's min corner, or `None` for
    /// non-collidable blocks such as air.
    fn relative_bounds(&self) -> Option<Aabb>;

    /// Liquid cells are only tested against boxes that opt in.
    fn is_liquid(&self) -> bool {
        false
    }

    /// World-space collision volume for this block type at `cell`.
    fn world_bounds(&self, cell: IVec3) -> Option<Aabb> {
        self.relative_bounds()
            .map(|bounds| bounds.translate(cell.as_dvec3()))
    }
}

/// Chunked block storage implementing [`CollisionWorld`].
#[derive(Clone)]
pub struct GridWorld<B, const CHUNK_SIZE: usize>
where
    B: CollisionMaterial + Clone,
{
    chunks: HashMap<IVec3, Box<[[[B; CHUNK_SIZE]; CHUNK_SIZE]; CHUNK_SIZE]>>,
}

impl<B, const CHUNK_SIZE: usize> GridWorld<B, CHUNK_SIZE>
where
    B: CollisionMaterial + Clone,
{
    /// Creates a new, empty `GridWorld`.
    pub fn new() -> Self {
        const { assert!(CHUNK_SIZE > 0, "CHUNK_SIZE must be positive") }
        Self {
            chunks: HashMap::new(),
        }
    }

    pub fn load_chunk(
        &mut self,
        chunk_coord: IVec3,
        block_data: Box<[[[B; CHUNK_SIZE]; CHUNK_SIZE]; CHUNK_SIZE]>,
    ) {
        log::debug!("Loading chunk: {:?}", chunk_coord);
        self.chunks.insert(chunk_coord, block_data);
    }

    pub fn unload_chunk(&mut self, chunk_coord: IVec3) {
        log::debug!("Unloading chunk: {:?}", chunk_coord);
        self.chunks.remove(&chunk_coord);
    }

    pub fn get_block(&self, world_pos: IVec3) -> Option<&B> {
        let chunk_coord = IVec3::new(
            world_pos.x.div_euclid(CHUNK_SIZE as i32),
            world_pos.y.div_euclid(CHUNK_SIZE as i32),
            world_pos.z.div_euclid(CHUNK_SIZE as i32),
        );
        let local_coord = IVec3::new(
            world_pos.x.rem_euclid(CHUNK_SIZE as i32),
            world_pos.y.rem_euclid(CHUNK_SIZE as i32),
            world_pos.z.rem_euclid(CHUNK_SIZE as i32),
        );

        self.chunks.get(&chunk_coord).map(|chunk_data| {
            &chunk_data[local_coord.x as usize][local_coord.y as usize][local_coord.z as usize]
        })
    }
}

impl<B, const CHUNK_SIZE: usize> Default for GridWorld<B, CHUNK_SIZE>
where
    B: CollisionMaterial + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<B, const CHUNK_SIZE: usize> CollisionWorld for GridWorld<B, CHUNK_SIZE>
where
    B: CollisionMaterial + Clone,
{
    fn update_bounding_box_collisions(
        &self,
        bbox: &mut BoundingBox,
        offset: DVec3,
        ignore_if_greater: bool,
    ) {
        bbox.colliding_blocks.clear();
        bbox.current_collision_depth = DVec3::ZERO;

        let test_liquids = bbox.collides_with_liquids && !bbox.is_interior;
        let min_cell = bbox.min_corner().floor().as_ivec3();
        let max_cell = bbox.max_corner().floor().as_ivec3();

        for x in min_cell.x..=max_cell.x {
            for y in min_cell.y..=max_cell.y {
                for z in min_cell.z..=max_cell.z {
                    let cell = IVec3::new(x, y, z);
                    let Some(block) = self.get_block(cell) else {
                        continue;
                    };
                    if block.is_liquid() && !test_liquids {
                        continue;
                    }
                    let Some(bounds) = block.world_bounds(cell) else {
                        continue;
                    };

                    if bounds.intersects_box(bbox) {
                        bbox.colliding_blocks.push(BlockHandle(cell));
                        let depth = penetration_depth(bbox, &bounds, offset, ignore_if_greater);
                        bbox.current_collision_depth = bbox.current_collision_depth.max(depth);
                    }
                }
            }
        }
    }
}
