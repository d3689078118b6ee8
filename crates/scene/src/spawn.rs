//! Entity spawners for every kind of city object.
//!
//! Each spawner only adds components; meshes and materials are the renderer's job.

use std::f32::consts::{FRAC_PI_2, TAU};

use engine_core::{
    BugSwarmer, Building, BuildingPart, Car, District, DistrictSign, Extent, Fountain, Ground, Label, PartOf,
    Pedestrian, RoadAxis, Road, SmokeEmitter, Tint, Transform, Tree, Visible, Water,
};
use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use layout::{FileCategory, PlacedBuilding};
use rand::Rng;

pub const BUILDING_FOOTPRINT: f32 = 0.9;
pub const BASE_HEIGHT: f32 = 0.15;
pub const ROOF_TIER_HEIGHT: f32 = 0.15;
pub const UPPER_ROOF_TIER_HEIGHT: f32 = 0.12;
pub const DOME_RADIUS: f32 = BUILDING_FOOTPRINT * 0.35;
pub const LABEL_MAX_CHARS: usize = 10;

const CAR_COLORS: [u32; 7] = [0xe53935, 0x1e88e5, 0x43a047, 0xfdd835, 0x8e24aa, 0xff6f00, 0x00acc1];
const PEDESTRIAN_COLORS: [u32; 6] = [0x2563eb, 0xdc2626, 0x16a34a, 0x9333ea, 0xea580c, 0x0891b2];

pub fn district_of(category: FileCategory) -> District {
    match category {
        FileCategory::Code => District::Code,
        FileCategory::Test => District::Test,
    }
}

/// Label text: names longer than ten characters are cut to eight plus "..".
pub fn label_text(name: &str) -> String {
    if name.chars().count() > LABEL_MAX_CHARS {
        let head: String = name.chars().take(8).collect();
        format!("{head}..")
    } else {
        name.to_string()
    }
}

pub fn spire_height(building_height: f32) -> f32 {
    building_height * 0.08 + 0.3
}

/// Smoke color darkens as the smell score grows.
pub fn smoke_tint(smell_score: u32) -> Tint {
    match smell_score {
        0..=39 => Tint::from_hex(0xaaaaaa),
        40..=69 => Tint::from_hex(0x666666),
        _ => Tint::from_hex(0x332211),
    }
}

pub fn smoke_opacity(smell_score: u32) -> f32 {
    (0.3 + smell_score as f32 / 200.0).min(0.7)
}

pub fn spawn_water(world: &mut World, ground_width: f32, ground_height: f32) -> Entity {
    world.spawn((
        Transform::from_position(Vec3::new(0.0, -0.15, 0.0)),
        Extent::plane(ground_width + 10.0, ground_height + 10.0),
        Tint::from_hex(0x2a6099),
        Water,
    ))
}

pub fn spawn_ground(world: &mut World, ground_width: f32, ground_height: f32) -> Entity {
    world.spawn((
        Transform::default(),
        Extent::plane(ground_width, ground_height),
        Ground,
    ))
}

pub fn spawn_district_sign(world: &mut World, district: District, offset_x: f32, ground_height: f32) -> Entity {
    let color = match district {
        District::Code => 0x2c5282,
        District::Test => 0x9333ea,
    };
    world.spawn((
        Transform::from_position(Vec3::new(offset_x, 0.5, -ground_height / 2.0 + 0.5)),
        Extent::new(2.0, 0.3, 0.1),
        Tint::from_hex(color),
        DistrictSign(district),
    ))
}

/// The north-south road between the two quarters.
pub fn spawn_main_road(world: &mut World, ground_height: f32) -> Entity {
    world.spawn((
        Transform::from_position(Vec3::new(0.0, 0.01, 0.0)),
        Extent::plane(1.0, ground_height),
        Tint::from_hex(0x3a3a3a),
        Road,
    ))
}

/// Spawn the body, base, roof, dome, spire and label of one building.
/// Returns the body entity; every other piece carries `PartOf(body)`.
pub fn spawn_building(world: &mut World, placed: &PlacedBuilding, visible: bool) -> Entity {
    let (x, z, h) = (placed.world_x, placed.world_z, placed.height);
    let district = district_of(placed.category);
    let base_color = placed.color.to_rgb();
    let roof_color = base_color * 0.85;

    let body = world.spawn((
        Transform::from_position(Vec3::new(x, h / 2.0, z)),
        Extent::new(BUILDING_FOOTPRINT, h, BUILDING_FOOTPRINT),
        Building {
            path: placed.file.path.clone(),
            district,
            height: h,
            base_color,
        },
        Tint(base_color),
        district,
        Visible(visible),
    ));

    let spire_h = spire_height(h);
    let roof_top = h + ROOF_TIER_HEIGHT + UPPER_ROOF_TIER_HEIGHT;
    let parts = [
        (
            BuildingPart::Base,
            Vec3::new(x, BASE_HEIGHT / 2.0, z),
            Extent::new(BUILDING_FOOTPRINT + 0.2, BASE_HEIGHT, BUILDING_FOOTPRINT + 0.2),
            Tint::from_hex(0x555555),
        ),
        (
            BuildingPart::RoofTier,
            Vec3::new(x, h + ROOF_TIER_HEIGHT / 2.0, z),
            Extent::new(BUILDING_FOOTPRINT + 0.1, ROOF_TIER_HEIGHT, BUILDING_FOOTPRINT + 0.1),
            Tint(roof_color),
        ),
        (
            BuildingPart::UpperRoofTier,
            Vec3::new(x, h + ROOF_TIER_HEIGHT + UPPER_ROOF_TIER_HEIGHT / 2.0, z),
            Extent::new(BUILDING_FOOTPRINT * 0.7, UPPER_ROOF_TIER_HEIGHT, BUILDING_FOOTPRINT * 0.7),
            Tint(roof_color),
        ),
        (
            BuildingPart::Dome,
            Vec3::new(x, roof_top, z),
            Extent::new(DOME_RADIUS * 2.0, DOME_RADIUS, DOME_RADIUS * 2.0),
            Tint(roof_color * 1.2),
        ),
        (
            BuildingPart::Spire,
            Vec3::new(x, roof_top + DOME_RADIUS + spire_h / 2.0 - 0.05, z),
            Extent::new(0.12, spire_h, 0.12),
            Tint::from_hex(0xffd700),
        ),
    ];
    for (part, position, extent, tint) in parts {
        world.spawn((
            Transform::from_position(position),
            extent,
            tint,
            part,
            PartOf(body),
            district,
            Visible(visible),
        ));
    }

    world.spawn((
        Transform::from_position(Vec3::new(x, h + 0.8, z)),
        Label {
            text: label_text(&placed.file.name),
        },
        PartOf(body),
        district,
        Visible(visible),
    ));

    body
}

pub fn spawn_smoke(world: &mut World, placed: &PlacedBuilding, visible: bool) -> Entity {
    let score = placed.file.clamped_smell_score();
    world.spawn((
        Transform::from_position(placed.position() + Vec3::Y * placed.height),
        SmokeEmitter {
            particle_count: placed.smoke_particles,
            base_height: placed.height,
            opacity: smoke_opacity(score),
        },
        smoke_tint(score),
        Visible(visible),
    ))
}

/// Bug hovering around a building of height `height` somewhere in its middle half.
pub fn spawn_bug<R: Rng + ?Sized>(world: &mut World, x: f32, z: f32, height: f32, visible: bool, rng: &mut R) -> Entity {
    let y = height * 0.3 + rng.gen::<f32>() * height * 0.5;
    let base = Vec3::new(x, y, z);
    world.spawn((
        Transform::from_position(base),
        BugSwarmer {
            base,
            angle: rng.gen::<f32>() * TAU,
            orbit_radius: 0.15 + rng.gen::<f32>() * 0.1,
            orbit_speed: 0.02 + rng.gen::<f32>() * 0.02,
        },
        Tint::from_hex(0x228b22),
        Visible(visible),
    ))
}

pub fn spawn_car<R: Rng + ?Sized>(
    world: &mut World,
    start: Vec2,
    direction: f32,
    axis: RoadAxis,
    rng: &mut R,
) -> Entity {
    let yaw = match axis {
        RoadAxis::Z if direction > 0.0 => 0.0,
        RoadAxis::Z => std::f32::consts::PI,
        RoadAxis::X if direction > 0.0 => FRAC_PI_2,
        RoadAxis::X => -FRAC_PI_2,
    };
    let color = CAR_COLORS[rng.gen_range(0..CAR_COLORS.len())];
    world.spawn((
        Transform::from_position_yaw(Vec3::new(start.x, 0.0, start.y), yaw),
        Car {
            axis,
            direction,
            speed: 0.015 + rng.gen::<f32>() * 0.01,
            start: match axis {
                RoadAxis::X => start.x,
                RoadAxis::Z => start.y,
            },
        },
        Tint::from_hex(color),
    ))
}

/// Pedestrian starting 2 to 4 units from `target` and heading towards it.
pub fn spawn_pedestrian<R: Rng + ?Sized>(world: &mut World, target: Vec2, rng: &mut R) -> Entity {
    let color = PEDESTRIAN_COLORS[rng.gen_range(0..PEDESTRIAN_COLORS.len())];
    let angle = rng.gen::<f32>() * TAU;
    let distance = 2.0 + rng.gen::<f32>() * 2.0;
    let start = target + Vec2::new(angle.cos(), angle.sin()) * distance;
    world.spawn((
        Transform::from_position(Vec3::new(start.x, 0.0, start.y)),
        Pedestrian {
            target,
            speed: 0.005 + rng.gen::<f32>() * 0.01,
            arrived: false,
        },
        Tint::from_hex(color),
    ))
}

pub fn spawn_tree(world: &mut World, x: f32, z: f32) -> Entity {
    world.spawn((Transform::from_position(Vec3::new(x, 0.0, z)), Tree))
}

pub fn spawn_fountain(world: &mut World, x: f32, z: f32) -> Entity {
    world.spawn((Transform::from_position(Vec3::new(x, 0.0, z)), Fountain))
}

/// Tree positions: an outer and an inner ellipse inset 1 and 3 units from the
/// ground edge, plus two short rows along the west end of the north and south edges.
pub fn tree_positions(ground_width: f32, ground_height: f32) -> Vec<Vec2> {
    let mut trees = Vec::with_capacity(24 + 16 + 12);
    for (count, inset) in [(24, 1.0), (16, 3.0)] {
        let radius = Vec2::new(ground_width / 2.0 - inset, ground_height / 2.0 - inset);
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            trees.push(Vec2::new(angle.cos() * radius.x, angle.sin() * radius.y));
        }
    }
    for i in 0..6 {
        let x = -ground_width / 2.0 + 0.5 + i as f32 * 0.8;
        trees.push(Vec2::new(x, -ground_height / 2.0 + 0.5));
        trees.push(Vec2::new(x, ground_height / 2.0 - 0.5));
    }
    trees
}

/// Car lanes: four east-west roads, each carrying one car per direction.
/// Yields `(start, direction)` pairs.
pub fn car_starts(ground_width: f32, spacing: f32) -> Vec<(Vec2, f32)> {
    let bounds = ground_width / 2.0 - 2.0;
    (0..4)
        .flat_map(|i| {
            let lane_z = (i as f32 - 1.5) * spacing * 2.0;
            [
                (Vec2::new(-bounds, lane_z + 0.1), 1.0),
                (Vec2::new(bounds, lane_z - 0.1), -1.0),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::{BuildingColor, FileRecord, GridCoord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn placed(path: &str, height: f32) -> PlacedBuilding {
        PlacedBuilding {
            file: FileRecord::new(path).with_smell_score(80),
            category: FileCategory::Code,
            grid: GridCoord::new(0, 0),
            world_x: 2.0,
            world_z: -1.0,
            height,
            color: BuildingColor::hsl(0.0, 1.0, 0.5),
            bug_visual_count: 0,
            pedestrian_count: 0,
            smoke_eligible: true,
            smoke_particles: 40,
        }
    }

    #[test]
    fn smoke_rises_from_the_roof() {
        let mut world = World::new();
        let emitter = spawn_smoke(&mut world, &placed("src/smelly.rs", 4.0), false);
        let transform = world.get::<&Transform>(emitter).unwrap();
        assert_eq!(transform.position, Vec3::new(2.0, 4.0, -1.0));
        let smoke = world.get::<&SmokeEmitter>(emitter).unwrap();
        assert_eq!(smoke.particle_count, 40);
        assert!(!world.get::<&Visible>(emitter).unwrap().0);
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(label_text("main.rs"), "main.rs");
        assert_eq!(label_text("abcdefghij"), "abcdefghij");
        assert_eq!(label_text("abcdefghijk"), "abcdefgh..");
    }

    #[test]
    fn smoke_gets_darker_and_denser() {
        assert_eq!(smoke_tint(20), Tint::from_hex(0xaaaaaa));
        assert_eq!(smoke_tint(40), Tint::from_hex(0x666666));
        assert_eq!(smoke_tint(70), Tint::from_hex(0x332211));
        assert!((smoke_opacity(20) - 0.4).abs() < 1e-6);
        assert_eq!(smoke_opacity(100), 0.7);
    }

    #[test]
    fn building_is_body_plus_six_parts() {
        let mut world = World::new();
        let body = spawn_building(&mut world, &placed("src/very_long_name.rs", 4.0), true);
        assert_eq!(world.len(), 7);

        let parts = world
            .query::<&PartOf>()
            .iter()
            .filter(|(_, part)| part.0 == body)
            .count();
        assert_eq!(parts, 6);

        let transform = *world.get::<&Transform>(body).unwrap();
        assert_eq!(transform.position, Vec3::new(2.0, 2.0, -1.0));
        let label = world
            .query::<&Label>()
            .iter()
            .map(|(_, l)| l.text.clone())
            .next()
            .unwrap();
        assert_eq!(label, "very_lon..");
    }

    #[test]
    fn spire_tops_the_dome() {
        let mut world = World::new();
        spawn_building(&mut world, &placed("a.rs", 5.0), true);
        let mut spire_y = 0.0;
        let mut dome_y = 0.0;
        for (_, (part, t)) in world.query::<(&BuildingPart, &Transform)>().iter() {
            match part {
                BuildingPart::Spire => spire_y = t.position.y,
                BuildingPart::Dome => dome_y = t.position.y,
                _ => {}
            }
        }
        assert!((dome_y - 5.27).abs() < 1e-5);
        assert!((spire_y - (5.27 + DOME_RADIUS + spire_height(5.0) / 2.0 - 0.05)).abs() < 1e-5);
    }

    #[test]
    fn bug_hovers_in_middle_half() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let e = spawn_bug(&mut world, 0.0, 0.0, 6.0, true, &mut rng);
            let bug = *world.get::<&BugSwarmer>(e).unwrap();
            assert!(bug.base.y >= 1.8 && bug.base.y <= 4.8);
            assert!(bug.orbit_radius >= 0.15 && bug.orbit_radius <= 0.25);
        }
    }

    #[test]
    fn pedestrians_start_two_to_four_units_away() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(8);
        let target = Vec2::new(3.0, -2.0);
        for _ in 0..50 {
            let e = spawn_pedestrian(&mut world, target, &mut rng);
            let p = world.get::<&Transform>(e).unwrap().position;
            let d = Vec2::new(p.x, p.z).distance(target);
            assert!((2.0 - 1e-4..=4.0 + 1e-4).contains(&d));
        }
    }

    #[test]
    fn lanes_run_both_ways() {
        let starts = car_starts(20.0, 1.5);
        assert_eq!(starts.len(), 8);
        assert!((starts[0].0 - Vec2::new(-8.0, -4.4)).length() < 1e-5);
        assert_eq!(starts[0].1, 1.0);
        assert!((starts[1].0 - Vec2::new(8.0, -4.6)).length() < 1e-5);
        assert_eq!(starts[1].1, -1.0);
        assert!(starts[7].0.y > 4.0);
    }

    #[test]
    fn tree_count() {
        let trees = tree_positions(17.0, 8.5);
        assert_eq!(trees.len(), 52);
        assert!((trees[0] - Vec2::new(7.5, 0.0)).length() < 1e-5);
    }
}
