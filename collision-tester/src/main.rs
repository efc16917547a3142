use glam::{DVec3, IVec3};
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use transport_physics::{
    Aabb, BoundingBox, BoxProperties, CollisionMaterial, EntityPose, GridWorld,
};

const CHUNK_SIZE: usize = 16;

const SEED: u32 = 1;
const TERRAIN_SCALE: f64 = 0.05;
const BASE_HEIGHT: f64 = 6.0;
const HEIGHT_VARIATION: f64 = 4.0;
const SEA_LEVEL: i32 = 4;

const DROP_HEIGHT: f64 = 24.0;
const TICK_FALL: f64 = 0.5;
const MAX_TICKS: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Block {
    Air,
    Stone,
    Water,
}

impl CollisionMaterial for Block {
    fn relative_bounds(&self) -> Option<Aabb> {
        match self {
            Block::Air => None,
            Block::Stone | Block::Water => Some(Aabb::new(DVec3::ZERO, DVec3::ONE)),
        }
    }

    fn is_liquid(&self) -> bool {
        matches!(self, Block::Water)
    }
}

type World = GridWorld<Block, CHUNK_SIZE>;

fn generate_chunk(
    chunk_coord: IVec3,
    heightmap: &Fbm<Perlin>,
) -> Box<[[[Block; CHUNK_SIZE]; CHUNK_SIZE]; CHUNK_SIZE]> {
    let mut blocks = Box::new([[[Block::Air; CHUNK_SIZE]; CHUNK_SIZE]; CHUNK_SIZE]);
    for lx in 0..CHUNK_SIZE {
        for lz in 0..CHUNK_SIZE {
            let gx = chunk_coord.x * CHUNK_SIZE as i32 + lx as i32;
            let gz = chunk_coord.z * CHUNK_SIZE as i32 + lz as i32;
            let sample = heightmap.get([gx as f64 * TERRAIN_SCALE, gz as f64 * TERRAIN_SCALE]);
            let surface = (BASE_HEIGHT + sample * HEIGHT_VARIATION) as i32;

            for ly in 0..CHUNK_SIZE {
                let gy = chunk_coord.y * CHUNK_SIZE as i32 + ly as i32;
                blocks[lx][ly][lz] = if gy <= surface {
                    Block::Stone
                } else if gy <= SEA_LEVEL {
                    Block::Water
                } else {
                    Block::Air
                };
            }
        }
    }
    blocks
}

struct Vehicle {
    pose: EntityPose,
    boxes: Vec<(&'static str, BoundingBox)>,
}

fn build_vehicle(position: DVec3, yaw_degrees: f64) -> Vehicle {
    let collision = BoxProperties {
        collides_with_liquids: true,
        is_collision: true,
        ..Default::default()
    };
    let cabin = BoxProperties {
        is_interior: true,
        armor_thickness: 8.0,
        ..Default::default()
    };

    let hull_center = DVec3::new(0.0, 1.0, 0.0);
    let front_axle = DVec3::new(0.0, 0.4, 1.6);
    let rear_axle = DVec3::new(0.0, 0.4, -1.6);
    let cabin_center = DVec3::new(0.0, 1.4, -0.4);

    Vehicle {
        pose: EntityPose::new(position, DVec3::new(0.0, yaw_degrees, 0.0)),
        boxes: vec![
            (
                "hull",
                BoundingBox::with_properties(hull_center, hull_center, 1.1, 0.9, 2.4, collision),
            ),
            (
                "front-axle",
                BoundingBox::with_properties(front_axle, front_axle, 1.0, 0.4, 0.4, collision),
            ),
            (
                "rear-axle",
                BoundingBox::with_properties(rear_axle, rear_axle, 1.0, 0.4, 0.4, collision),
            ),
            (
                "cabin",
                BoundingBox::with_properties(cabin_center, cabin_center, 0.8, 0.6, 1.0, cabin),
            ),
        ],
    }
}

fn main() {
    env_logger::init();

    let heightmap = Fbm::<Perlin>::new(SEED)
        .set_octaves(2)
        .set_frequency(1.0)
        .set_lacunarity(2.0)
        .set_persistence(0.5);

    let mut world = World::new();
    for cx in -1..=1 {
        for cy in 0..=1 {
            for cz in -1..=1 {
                let chunk_coord = IVec3::new(cx, cy, cz);
                world.load_chunk(chunk_coord, generate_chunk(chunk_coord, &heightmap));
            }
        }
    }

    let mut vehicle = build_vehicle(DVec3::new(0.5, DROP_HEIGHT, 0.5), 30.0);
    log::info!(
        "Dropping vehicle from y = {DROP_HEIGHT} with {} boxes",
        vehicle.boxes.len()
    );

    let motion = DVec3::new(0.0, -TICK_FALL, 0.0);
    let mut settled = false;

    for tick in 0..MAX_TICKS {
        for (_, bbox) in &mut vehicle.boxes {
            bbox.update_to_pose(&vehicle.pose);
        }

        let mut deepest = 0.0_f64;
        for (name, bbox) in &mut vehicle.boxes {
            if !bbox.is_collision {
                continue;
            }
            if bbox.update_moving_collisions(&world, motion) {
                log::debug!(
                    "tick {tick}: {name} hit {} blocks, depth {:?}",
                    bbox.colliding_blocks.len(),
                    bbox.current_collision_depth
                );
                deepest = deepest.max(bbox.current_collision_depth.y);
            }
        }

        if deepest > 0.0 {
            // Descend only as far as this tick's motion stays clear of the
            // reported penetration, then stop.
            vehicle.pose.position.y -= (TICK_FALL - deepest).max(0.0);
            log::info!(
                "Vehicle settled at y = {:.2} after {} ticks",
                vehicle.pose.position.y,
                tick + 1
            );
            settled = true;
            break;
        }
        vehicle.pose.position.y -= TICK_FALL;
    }

    if !settled {
        log::warn!(
            "Vehicle never touched ground; ended at y = {:.2}",
            vehicle.pose.position.y
        );
        return;
    }

    for (name, bbox) in &mut vehicle.boxes {
        bbox.update_to_pose(&vehicle.pose);
        bbox.update_colliding_blocks(&world, DVec3::ZERO);
        log::info!(
            "{name}: center {:?}, {} resting contacts",
            bbox.global_center,
            bbox.colliding_blocks.len()
        );
    }

    // Hit-scan straight down through the hull to show where a shot from
    // above would land.
    let (_, hull) = &vehicle.boxes[0];
    let scan_start = hull.global_center + DVec3::new(0.2, 10.0, 0.3);
    let scan_end = hull.global_center + DVec3::new(0.2, -10.0, 0.3);
    match hull.get_intersection_point(scan_start, scan_end) {
        Some(point) => log::info!("Hit-scan strikes the hull at {point:?}"),
        None => log::info!("Hit-scan missed the hull"),
    }
}
