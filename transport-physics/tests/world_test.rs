use glam::{DVec3, IVec3};
use transport_physics::{
    Aabb, BlockHandle, BoundingBox, BoxProperties, CollisionMaterial, GridWorld,
};

const TEST_CHUNK_SIZE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TestBlock {
    Air,
    Stone,
    Water,
    Slab,
}

impl CollisionMaterial for TestBlock {
    fn relative_bounds(&self) -> Option<Aabb> {
        match self {
            TestBlock::Air => None,
            TestBlock::Stone | TestBlock::Water => Some(Aabb::new(DVec3::ZERO, DVec3::ONE)),
            TestBlock::Slab => Some(Aabb::new(DVec3::ZERO, DVec3::new(1.0, 0.5, 1.0))),
        }
    }

    fn is_liquid(&self) -> bool {
        matches!(self, TestBlock::Water)
    }
}

type TestWorld = GridWorld<TestBlock, TEST_CHUNK_SIZE>;

fn create_test_chunk(
    fill_type: TestBlock,
) -> Box<[[[TestBlock; TEST_CHUNK_SIZE]; TEST_CHUNK_SIZE]; TEST_CHUNK_SIZE]> {
    Box::new([[[fill_type; TEST_CHUNK_SIZE]; TEST_CHUNK_SIZE]; TEST_CHUNK_SIZE])
}

fn world_with_blocks(blocks: &[(IVec3, TestBlock)]) -> TestWorld {
    let mut chunk_data = create_test_chunk(TestBlock::Air);
    for (pos, block) in blocks {
        chunk_data[pos.x as usize][pos.y as usize][pos.z as usize] = *block;
    }
    let mut world = TestWorld::new();
    world.load_chunk(IVec3::ZERO, chunk_data);
    world
}

fn assert_dvec3_approx_eq(a: DVec3, b: DVec3, tolerance: f64) {
    assert!(
        (a - b).length_squared() < tolerance * tolerance,
        "Assertion failed: {:?} != {:?} within tolerance {}",
        a,
        b,
        tolerance
    );
}

#[test]
fn test_query_in_empty_world_reports_nothing() {
    let world = TestWorld::new();
    let mut bbox = BoundingBox::new(DVec3::new(0.5, 0.5, 0.5), 0.45, 0.45, 0.45);

    assert!(!bbox.update_colliding_blocks(&world, DVec3::ZERO));
    assert!(bbox.colliding_blocks.is_empty());
    assert_eq!(bbox.current_collision_depth, DVec3::ZERO);
}

#[test]
fn test_query_in_all_air_chunk_reports_nothing() {
    let world = world_with_blocks(&[]);
    let mut bbox = BoundingBox::new(DVec3::new(8.0, 8.0, 8.0), 2.0, 2.0, 2.0);

    assert!(!bbox.update_colliding_blocks(&world, DVec3::ZERO));
    assert!(bbox.colliding_blocks.is_empty());
}

#[test]
fn test_handles_follow_cell_scan_order_and_exclude_face_touch() {
    let world = world_with_blocks(&[
        (IVec3::new(1, 1, 1), TestBlock::Stone),
        (IVec3::new(2, 1, 1), TestBlock::Stone),
        (IVec3::new(3, 1, 1), TestBlock::Stone),
    ]);
    // Spans x [1.0, 3.0]: overlaps the first two stones, and only touches
    // the face of the third at x = 3.0.
    let mut bbox = BoundingBox::new(DVec3::new(2.0, 1.5, 1.5), 1.0, 0.4, 0.4);

    assert!(bbox.update_colliding_blocks(&world, DVec3::ZERO));
    assert_eq!(
        bbox.colliding_blocks.as_slice(),
        &[
            BlockHandle(IVec3::new(1, 1, 1)),
            BlockHandle(IVec3::new(2, 1, 1)),
        ]
    );
}

#[test]
fn test_box_resting_on_partial_block_does_not_collide() {
    let world = world_with_blocks(&[(IVec3::new(0, 0, 0), TestBlock::Slab)]);

    // Bottom face exactly on the slab top at y = 0.5.
    let mut resting = BoundingBox::new(DVec3::new(0.5, 1.0, 0.5), 0.5, 0.5, 0.5);
    assert!(!resting.update_colliding_blocks(&world, DVec3::ZERO));

    // Sunk 0.1 into the slab.
    let mut sunk = BoundingBox::new(DVec3::new(0.5, 0.9, 0.5), 0.5, 0.5, 0.5);
    assert!(sunk.update_colliding_blocks(&world, DVec3::ZERO));
    assert_eq!(
        sunk.colliding_blocks.as_slice(),
        &[BlockHandle(IVec3::new(0, 0, 0))]
    );
    assert_dvec3_approx_eq(
        sunk.current_collision_depth,
        DVec3::new(1.0, 0.1, 1.0),
        1e-9,
    );
}

#[test]
fn test_liquid_cells_require_opt_in() {
    let world = world_with_blocks(&[(IVec3::new(0, 0, 0), TestBlock::Water)]);
    let center = DVec3::new(0.5, 0.5, 0.5);

    let mut default_box = BoundingBox::new(center, 0.45, 0.45, 0.45);
    assert!(!default_box.update_colliding_blocks(&world, DVec3::ZERO));

    let liquid_properties = BoxProperties {
        collides_with_liquids: true,
        ..Default::default()
    };
    let mut liquid_box =
        BoundingBox::with_properties(center, center, 0.45, 0.45, 0.45, liquid_properties);
    assert!(liquid_box.update_colliding_blocks(&world, DVec3::ZERO));
    assert_eq!(
        liquid_box.colliding_blocks.as_slice(),
        &[BlockHandle(IVec3::new(0, 0, 0))]
    );
}

#[test]
fn test_interior_boxes_skip_liquids_but_hit_solids() {
    let world = world_with_blocks(&[
        (IVec3::new(0, 0, 0), TestBlock::Water),
        (IVec3::new(2, 0, 0), TestBlock::Stone),
    ]);
    let interior_properties = BoxProperties {
        collides_with_liquids: true,
        is_interior: true,
        ..Default::default()
    };

    let water_center = DVec3::new(0.5, 0.5, 0.5);
    let mut over_water = BoundingBox::with_properties(
        water_center,
        water_center,
        0.45,
        0.45,
        0.45,
        interior_properties,
    );
    assert!(!over_water.update_colliding_blocks(&world, DVec3::ZERO));

    let stone_center = DVec3::new(2.5, 0.5, 0.5);
    let mut over_stone = BoundingBox::with_properties(
        stone_center,
        stone_center,
        0.45,
        0.45,
        0.45,
        interior_properties,
    );
    assert!(over_stone.update_colliding_blocks(&world, DVec3::ZERO));
}

#[test]
fn test_static_depth_is_two_sided_minimum() {
    let world = world_with_blocks(&[(IVec3::new(0, 0, 0), TestBlock::Stone)]);
    // Overlaps the stone by 0.3 on X; spans it fully on Y and Z.
    let mut bbox = BoundingBox::new(DVec3::new(1.2, 0.5, 0.5), 0.5, 0.5, 0.5);

    assert!(bbox.update_colliding_blocks(&world, DVec3::ZERO));
    assert_dvec3_approx_eq(
        bbox.current_collision_depth,
        DVec3::new(0.3, 1.0, 1.0),
        1e-9,
    );
}

#[test]
fn test_moving_depth_follows_motion_direction() {
    let world = world_with_blocks(&[(IVec3::new(0, 0, 0), TestBlock::Stone)]);
    let center = DVec3::new(0.5, 1.55, 0.5);
    let falling = DVec3::new(0.0, -0.3, 0.0);

    // The moving variant only keeps depth the motion could have caused:
    // the stationary X/Z overlap is suppressed.
    let mut moving = BoundingBox::new(center, 0.5, 0.5, 0.5);
    assert!(moving.update_moving_collisions(&world, falling));
    assert_dvec3_approx_eq(
        moving.current_collision_depth,
        DVec3::new(0.0, 0.25, 0.0),
        1e-9,
    );

    // The static variant reports the full overlap on every axis.
    let mut static_query = BoundingBox::new(center, 0.5, 0.5, 0.5);
    assert!(static_query.update_colliding_blocks(&world, falling));
    assert_dvec3_approx_eq(
        static_query.current_collision_depth,
        DVec3::new(1.0, 0.25, 1.0),
        1e-9,
    );
}

#[test]
fn test_depth_is_per_axis_maximum_over_cells() {
    let world = world_with_blocks(&[
        (IVec3::new(0, 0, 0), TestBlock::Stone),
        (IVec3::new(1, 0, 0), TestBlock::Slab),
    ]);
    let mut bbox = BoundingBox::new(DVec3::new(1.0, 0.8, 0.5), 0.9, 0.5, 0.5);

    assert!(bbox.update_colliding_blocks(&world, DVec3::ZERO));
    assert_eq!(
        bbox.colliding_blocks.as_slice(),
        &[
            BlockHandle(IVec3::new(0, 0, 0)),
            BlockHandle(IVec3::new(1, 0, 0)),
        ]
    );
    // The stone dominates Y (0.7 vs the slab's 0.2); X agrees at 0.9.
    assert_dvec3_approx_eq(
        bbox.current_collision_depth,
        DVec3::new(0.9, 0.7, 1.0),
        1e-9,
    );
}

#[test]
fn test_query_across_chunk_boundary() {
    let mut world = TestWorld::new();
    let max_idx = TEST_CHUNK_SIZE - 1;

    let mut chunk_data0 = create_test_chunk(TestBlock::Air);
    chunk_data0[max_idx][0][0] = TestBlock::Stone;
    world.load_chunk(IVec3::ZERO, chunk_data0);

    let mut chunk_data1 = create_test_chunk(TestBlock::Air);
    chunk_data1[0][0][0] = TestBlock::Stone;
    world.load_chunk(IVec3::new(1, 0, 0), chunk_data1);

    let center = DVec3::new(16.0, 0.5, 0.5);
    let mut bbox = BoundingBox::new(center, 0.6, 0.45, 0.45);

    assert!(bbox.update_colliding_blocks(&world, DVec3::ZERO));
    assert_eq!(
        bbox.colliding_blocks.as_slice(),
        &[
            BlockHandle(IVec3::new(15, 0, 0)),
            BlockHandle(IVec3::new(16, 0, 0)),
        ]
    );
    // Round-trip invariant holds through the real service too.
    assert_eq!(bbox.global_center, center);
}

#[test]
fn test_results_are_overwritten_between_queries() {
    let world = world_with_blocks(&[(IVec3::new(0, 0, 0), TestBlock::Stone)]);
    let mut bbox = BoundingBox::new(DVec3::new(0.5, 0.5, 0.5), 0.45, 0.45, 0.45);

    assert!(bbox.update_colliding_blocks(&world, DVec3::ZERO));
    assert!(!bbox.colliding_blocks.is_empty());
    assert!(bbox.current_collision_depth.length_squared() > 0.0);

    // Displaced well clear of the stone, the same box reports nothing.
    assert!(!bbox.update_colliding_blocks(&world, DVec3::new(0.0, 5.0, 0.0)));
    assert!(bbox.colliding_blocks.is_empty());
    assert_eq!(bbox.current_collision_depth, DVec3::ZERO);
}

#[test]
fn test_unload_chunk_removes_blocks() {
    let mut world = world_with_blocks(&[(IVec3::new(0, 0, 0), TestBlock::Stone)]);
    assert_eq!(
        world.get_block(IVec3::ZERO),
        Some(&TestBlock::Stone)
    );

    world.unload_chunk(IVec3::ZERO);
    assert_eq!(world.get_block(IVec3::ZERO), None);

    let mut bbox = BoundingBox::new(DVec3::new(0.5, 0.5, 0.5), 0.45, 0.45, 0.45);
    assert!(!bbox.update_colliding_blocks(&world, DVec3::ZERO));
}
