//! Placement plan: the complete, immutable output of a layout pass.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::category::FileCategory;
use crate::color::BuildingColor;
use crate::metrics::MetricScales;
use crate::quarter::QuarterLayout;
use crate::record::FileRecord;
use crate::spiral::GridCoord;

/// Where one file is built and how it is decorated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBuilding {
    pub file: FileRecord,
    pub category: FileCategory,
    /// Spiral cell inside the file's quarter.
    pub grid: GridCoord,
    pub world_x: f32,
    pub world_z: f32,
    pub height: f32,
    pub color: BuildingColor,
    pub bug_visual_count: u32,
    pub pedestrian_count: u32,
    pub smoke_eligible: bool,
    /// Zero unless `smoke_eligible`.
    pub smoke_particles: u32,
}

impl PlacedBuilding {
    /// Ground-level center of the building footprint.
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.world_x, 0.0, self.world_z)
    }

    pub fn footprint_center(&self) -> Vec2 {
        Vec2::new(self.world_x, self.world_z)
    }
}

/// Suggested initial camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFraming {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraFraming {
    /// Elevated three-quarter view over a `ground_width` x `ground_height` ground.
    pub fn for_ground(ground_width: f32, ground_height: f32) -> Self {
        Self {
            position: Vec3::new(ground_width * 0.7, ground_height * 0.6, ground_height * 0.7),
            target: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementPlan {
    /// Code buildings first (busiest first), then test buildings.
    pub buildings: Vec<PlacedBuilding>,
    pub quarters: QuarterLayout,
    pub code_grid_size: usize,
    pub test_grid_size: usize,
    pub scales: MetricScales,
    pub camera: CameraFraming,
    /// Grid spacing the plan was laid out with.
    pub spacing: f32,
    /// Files in the input list.
    pub source_files: usize,
    /// Files left out by the building budget.
    pub dropped: usize,
}

impl PlacementPlan {
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn code(&self) -> impl Iterator<Item = &PlacedBuilding> {
        self.buildings.iter().filter(|b| b.category == FileCategory::Code)
    }

    pub fn test(&self) -> impl Iterator<Item = &PlacedBuilding> {
        self.buildings.iter().filter(|b| b.category == FileCategory::Test)
    }

    pub fn find(&self, path: &str) -> Option<&PlacedBuilding> {
        self.buildings.iter().find(|b| b.file.path == path)
    }

    pub fn ground_width(&self) -> f32 {
        self.quarters.ground_width
    }

    pub fn ground_height(&self) -> f32 {
        self.quarters.ground_height
    }

    pub fn total_bug_visuals(&self) -> u32 {
        self.buildings.iter().map(|b| b.bug_visual_count).sum()
    }

    pub fn total_pedestrians(&self) -> u32 {
        self.buildings.iter().map(|b| b.pedestrian_count).sum()
    }

    pub fn smoking(&self) -> impl Iterator<Item = &PlacedBuilding> {
        self.buildings.iter().filter(|b| b.smoke_eligible)
    }

    /// Up to `limit` buildings, tallest first (ties keep plan order).
    pub fn tallest(&self, limit: usize) -> Vec<&PlacedBuilding> {
        let mut ranked = self.buildings.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.height.total_cmp(&a.height));
        ranked.truncate(limit);
        ranked
    }
}
