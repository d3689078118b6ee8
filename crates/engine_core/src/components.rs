//! Common ECS components used by the city world.

use glam::{Vec2, Vec3};

/// Which half of the city an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum District {
    Code,
    Test,
}

/// Main building body for one source file.
#[derive(Debug, Clone)]
pub struct Building {
    /// Repository-relative path (unique key of the file).
    pub path: String,
    pub district: District,
    /// Wall height in world units (roof parts sit on top).
    pub height: f32,
    /// Linear RGB base color.
    pub base_color: Vec3,
}

/// Piece of a building stacked on or under the main body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingPart {
    Base,
    RoofTier,
    UpperRoofTier,
    Dome,
    Spire,
}

/// Links a building part to the entity of its main body.
#[derive(Debug, Clone, Copy)]
pub struct PartOf(pub hecs::Entity);

/// Box or cylinder extents for an entity, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    /// Flat plane lying on the XZ plane.
    pub fn plane(width: f32, depth: f32) -> Self {
        Self::new(width, 0.0, depth)
    }
}

/// Flat color applied to an entity's material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint(pub Vec3);

impl Tint {
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self(Vec3::new(r, g, b))
    }
}

/// Billboard text floating above a building.
#[derive(Debug, Clone)]
pub struct Label {
    pub text: String,
}

/// Render toggle. Entities without it are always drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visible(pub bool);

impl Default for Visible {
    fn default() -> Self {
        Self(true)
    }
}

/// Emissive highlight applied to every part of a focused building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub emissive: Vec3,
    pub intensity: f32,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            emissive: Vec3::new(1.0, 1.0, 0.0),
            intensity: 0.5,
        }
    }
}

/// Axis a road (and the cars on it) runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadAxis {
    X,
    Z,
}

/// Car driving along a road lane, wrapping at the city edge.
#[derive(Debug, Clone, Copy)]
pub struct Car {
    pub axis: RoadAxis,
    /// +1.0 or -1.0 along `axis`.
    pub direction: f32,
    pub speed: f32,
    /// Coordinate along `axis` where the car entered the lane.
    pub start: f32,
}

/// Pedestrian walking towards the building of a busy file.
#[derive(Debug, Clone, Copy)]
pub struct Pedestrian {
    pub target: Vec2,
    pub speed: f32,
    pub arrived: bool,
}

/// Bug orbiting the building of a file with bug-fix history.
#[derive(Debug, Clone, Copy)]
pub struct BugSwarmer {
    pub base: Vec3,
    pub angle: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
}

/// Smoke plume rising from the roof of a smelly file.
#[derive(Debug, Clone, Copy)]
pub struct SmokeEmitter {
    pub particle_count: u32,
    /// Roof height the particles start from.
    pub base_height: f32,
    pub opacity: f32,
}

/// Sign marking a district entrance.
#[derive(Debug, Clone, Copy)]
pub struct DistrictSign(pub District);

/// Tag component for the cobblestone ground plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ground;

/// Tag component for the water plane under the ground.
#[derive(Debug, Clone, Copy, Default)]
pub struct Water;

/// Tag component for road strips.
#[derive(Debug, Clone, Copy, Default)]
pub struct Road;

/// Tag component for trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tree;

/// Tag component for the central fountain.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fountain;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_from_hex_splits_channels() {
        let Tint(c) = Tint::from_hex(0xff8000);
        assert_eq!(c.x, 1.0);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
    }

    #[test]
    fn visible_defaults_on() {
        assert!(Visible::default().0);
    }
}
