//! Renderer-side city world: every entity spawned from a placement plan plus
//! camera, lighting and weather state that survives a city reload.

use engine_core::{
    BugSwarmer, Building, Car, District, Highlight, Label, PartOf, Pedestrian, RoadAxis, SmokeEmitter, Transform, Tree,
    Visible,
};
use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use layout::{FileCategory, PlacementPlan};
use rand::Rng;

use crate::layers::{Layer, Layers, Precipitation};
use crate::lighting::{Lighting, TimeOfDay};
use crate::spawn;

/// Offset from a focused building to the camera.
pub const FOCUS_OFFSET: Vec3 = Vec3::new(5.0, 10.0, 5.0);

/// Orbit-style camera: a transform looking at a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub transform: Transform,
    pub target: Vec3,
}

impl CameraRig {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let mut transform = Transform::from_position(position);
        transform.look_at(target, Vec3::Y);
        Self { transform, target }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Vec3::new(15.0, 12.0, 15.0), Vec3::ZERO)
    }
}

/// Entity counts by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub buildings: usize,
    pub test_buildings: usize,
    pub bugs: usize,
    pub smoke_emitters: usize,
    pub cars: usize,
    pub pedestrians: usize,
    pub trees: usize,
}

pub struct WorldState {
    pub world: World,
    pub camera: CameraRig,
    pub lighting: Lighting,
    pub layers: Layers,
    pub rain: Precipitation,
    pub snow: Precipitation,
    highlighted: Option<Entity>,
}

impl WorldState {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            world: World::new(),
            camera: CameraRig::default(),
            lighting: Lighting::day(),
            layers: Layers::default(),
            rain: Precipitation::rain(rng),
            snow: Precipitation::snow(rng),
            highlighted: None,
        }
    }

    /// Discard every city entity. Camera, lighting, layers and weather are kept.
    pub fn clear(&mut self) {
        self.world.clear();
        self.highlighted = None;
    }

    /// Rebuild the city from `plan`. An empty plan leaves an empty world.
    pub fn populate<R: Rng + ?Sized>(&mut self, plan: &PlacementPlan, rng: &mut R) {
        self.clear();
        if plan.is_empty() {
            log::info!("Empty placement plan, nothing to build");
            return;
        }

        let (width, height) = (plan.ground_width(), plan.ground_height());
        let world = &mut self.world;

        spawn::spawn_water(world, width, height);
        spawn::spawn_ground(world, width, height);
        spawn::spawn_district_sign(world, District::Code, plan.quarters.code_offset_x, height);
        spawn::spawn_district_sign(world, District::Test, plan.quarters.test_offset_x, height);
        spawn::spawn_main_road(world, height);

        for placed in &plan.buildings {
            let visible = placed.category == FileCategory::Code || self.layers.tests;
            spawn::spawn_building(world, placed, visible);
            if placed.smoke_eligible {
                spawn::spawn_smoke(world, placed, self.layers.smoke);
            }
            for _ in 0..placed.bug_visual_count {
                spawn::spawn_bug(world, placed.world_x, placed.world_z, placed.height, self.layers.bugs, rng);
            }
        }

        for (start, direction) in spawn::car_starts(width, plan.spacing) {
            spawn::spawn_car(world, start, direction, RoadAxis::X, rng);
        }
        for tree in spawn::tree_positions(width, height) {
            spawn::spawn_tree(world, tree.x, tree.y);
        }
        spawn::spawn_fountain(world, 0.0, 0.0);

        for placed in &plan.buildings {
            for _ in 0..placed.pedestrian_count {
                spawn::spawn_pedestrian(world, placed.footprint_center(), rng);
            }
        }

        self.camera = CameraRig::new(plan.camera.position, plan.camera.target);

        let census = self.census();
        log::info!(
            "Built {} buildings ({} test), {} bugs, {} smoke plumes, {} cars, {} pedestrians",
            census.buildings,
            census.test_buildings,
            census.bugs,
            census.smoke_emitters,
            census.cars,
            census.pedestrians
        );
    }

    pub fn census(&self) -> Census {
        let world = &self.world;
        Census {
            buildings: world.query::<&Building>().iter().count(),
            test_buildings: world
                .query::<&Building>()
                .iter()
                .filter(|(_, b)| b.district == District::Test)
                .count(),
            bugs: world.query::<&BugSwarmer>().iter().count(),
            smoke_emitters: world.query::<&SmokeEmitter>().iter().count(),
            cars: world.query::<&Car>().iter().count(),
            pedestrians: world.query::<&Pedestrian>().iter().count(),
            trees: world.query::<&Tree>().iter().count(),
        }
    }

    pub fn find_building(&self, path: &str) -> Option<Entity> {
        self.world
            .query::<&Building>()
            .iter()
            .find(|(_, b)| b.path == path)
            .map(|(e, _)| e)
    }

    pub fn highlighted(&self) -> Option<Entity> {
        self.highlighted
    }

    /// Highlight the building of `path` (body and parts, not its label) and fly
    /// the camera to it. Returns the building's center, or `None` (with any
    /// previous highlight cleared) when the path is not in the city.
    pub fn focus_on(&mut self, path: &str) -> Option<Vec3> {
        self.clear_highlight();
        let body = self.find_building(path)?;
        let center = self.world.get::<&Transform>(body).ok()?.position;

        let mut targets: Vec<Entity> = self
            .world
            .query::<(&PartOf, Option<&Label>)>()
            .iter()
            .filter(|(_, (part, label))| part.0 == body && label.is_none())
            .map(|(e, _)| e)
            .collect();
        targets.push(body);
        for e in targets {
            self.world.insert_one(e, Highlight::default()).ok();
        }

        self.highlighted = Some(body);
        self.camera = CameraRig::new(center + FOCUS_OFFSET, center);
        Some(center)
    }

    pub fn clear_highlight(&mut self) {
        let lit: Vec<Entity> = self.world.query::<&Highlight>().iter().map(|(e, _)| e).collect();
        for e in lit {
            self.world.remove_one::<Highlight>(e).ok();
        }
        self.highlighted = None;
    }

    pub fn set_time_of_day(&mut self, time_of_day: TimeOfDay) {
        self.lighting = Lighting::for_time(time_of_day);
    }

    /// Toggle a layer and update the visibility of the entities it covers.
    pub fn set_layer(&mut self, layer: Layer, on: bool) {
        if !self.layers.set(layer, on) {
            return;
        }
        match layer {
            Layer::Bugs => {
                for (_, (_, visible)) in self.world.query_mut::<(&BugSwarmer, &mut Visible)>() {
                    visible.0 = on;
                }
            }
            Layer::Smoke => {
                for (_, (_, visible)) in self.world.query_mut::<(&SmokeEmitter, &mut Visible)>() {
                    visible.0 = on;
                }
            }
            Layer::Tests => {
                for (_, (district, visible)) in self.world.query_mut::<(&District, &mut Visible)>() {
                    if *district == District::Test {
                        visible.0 = on;
                    }
                }
            }
            // Precipitation fields read the flag directly.
            Layer::Rain | Layer::Snow => {}
        }
        log::debug!("Layer {:?} {}", layer, if on { "shown" } else { "hidden" });
    }

    /// Active precipitation fields.
    pub fn precipitation(&self) -> impl Iterator<Item = &Precipitation> {
        let rain = self.layers.rain.then_some(&self.rain);
        let snow = self.layers.snow.then_some(&self.snow);
        rain.into_iter().chain(snow)
    }

    /// Number of entities of kind `T` whose `Visible` flag is set.
    pub fn visible_count<T: hecs::Component>(&self) -> usize {
        self.world
            .query::<(&T, &Visible)>()
            .iter()
            .filter(|(_, (_, visible))| visible.0)
            .count()
    }

    /// Plan-space center of a building's footprint.
    pub fn building_footprint(&self, path: &str) -> Option<Vec2> {
        let body = self.find_building(path)?;
        let planar = self.world.get::<&Transform>(body).ok()?.planar();
        Some(planar)
    }
}
