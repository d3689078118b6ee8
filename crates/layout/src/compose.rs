//! City composer: runs the full layout pipeline over a file list.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cap::cap_subsets;
use crate::category::FileCategory;
use crate::color::{code_color, test_color};
use crate::config::LayoutConfig;
use crate::metrics::{
    bug_visual_count, height_for, pedestrian_count, smoke_eligible, smoke_particle_count, MetricScales,
};
use crate::plan::{CameraFraming, PlacedBuilding, PlacementPlan};
use crate::quarter::{cell_to_world, QuarterLayout};
use crate::record::FileRecord;
use crate::spiral::{grid_size_for, spiral_positions};

/// Builds [`PlacementPlan`]s. Holds no state besides its configuration.
#[derive(Debug, Clone, Default)]
pub struct CityComposer {
    pub config: LayoutConfig,
}

impl CityComposer {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Compose with fresh color jitter from the thread RNG.
    pub fn compose(&self, files: &[FileRecord]) -> PlacementPlan {
        self.compose_with_rng(files, &mut rand::thread_rng())
    }

    /// Compose with reproducible color jitter.
    pub fn compose_seeded(&self, files: &[FileRecord], seed: u64) -> PlacementPlan {
        self.compose_with_rng(files, &mut StdRng::seed_from_u64(seed))
    }

    /// Compose using `rng` for color jitter. Positions, heights and counts do not
    /// depend on the RNG.
    pub fn compose_with_rng<R: Rng + ?Sized>(&self, files: &[FileRecord], rng: &mut R) -> PlacementPlan {
        let config = &self.config;
        if files.is_empty() {
            log::debug!("No files to lay out, returning an empty plan");
            return self.empty_plan();
        }

        let (mut code, mut test): (Vec<FileRecord>, Vec<FileRecord>) = files
            .iter()
            .cloned()
            .partition(|file| FileCategory::of(&file.path) == FileCategory::Code);
        // Stable: equal commit counts keep input order.
        code.sort_by(|a, b| b.effective_commits().cmp(&a.effective_commits()));
        test.sort_by(|a, b| b.effective_commits().cmp(&a.effective_commits()));

        let capped = cap_subsets(code, test, config.max_buildings);
        let code_grid_size = grid_size_for(capped.code.len());
        let test_grid_size = grid_size_for(capped.test.len());
        let scales = MetricScales::from_files(files);
        let quarters = QuarterLayout::partition(code_grid_size, test_grid_size, config);

        log::debug!(
            "Laying out {} code files on a {}x{} grid and {} test files on a {}x{} grid",
            capped.code.len(),
            code_grid_size,
            code_grid_size,
            capped.test.len(),
            test_grid_size,
            test_grid_size
        );

        let mut buildings = Vec::with_capacity(capped.code.len() + capped.test.len());
        self.place_quarter(
            capped.code,
            FileCategory::Code,
            code_grid_size,
            quarters.code_offset_x,
            scales,
            rng,
            &mut buildings,
        );
        self.place_quarter(
            capped.test,
            FileCategory::Test,
            test_grid_size,
            quarters.test_offset_x,
            scales,
            rng,
            &mut buildings,
        );

        PlacementPlan {
            buildings,
            camera: CameraFraming::for_ground(quarters.ground_width, quarters.ground_height),
            quarters,
            code_grid_size,
            test_grid_size,
            scales,
            spacing: config.spacing,
            source_files: files.len(),
            dropped: capped.dropped,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn place_quarter<R: Rng + ?Sized>(
        &self,
        files: Vec<FileRecord>,
        category: FileCategory,
        grid_size: usize,
        offset_x: f32,
        scales: MetricScales,
        rng: &mut R,
        out: &mut Vec<PlacedBuilding>,
    ) {
        let config = &self.config;
        let total = files.len();
        let cells = spiral_positions(total, grid_size);

        for (index, (file, cell)) in files.into_iter().zip(cells).enumerate() {
            let world = cell_to_world(cell, grid_size, offset_x, config.spacing);
            let commits = file.effective_commits();
            let smell_score = file.clamped_smell_score();
            let smoking = smoke_eligible(smell_score, config.smoke_threshold);

            let (color, bug_ceiling, pedestrians) = match category {
                FileCategory::Code => (
                    code_color(index, total, rng),
                    config.code_bug_ceiling,
                    pedestrian_count(commits, scales.max_commits, config.pedestrian_ceiling),
                ),
                // Test buildings get no pedestrians.
                FileCategory::Test => (test_color(index, total), config.test_bug_ceiling, 0),
            };

            out.push(PlacedBuilding {
                category,
                grid: cell,
                world_x: world.x,
                world_z: world.y,
                height: height_for(commits, scales.max_commits, config.max_height),
                color,
                bug_visual_count: bug_visual_count(file.bugs, scales.max_bugs, bug_ceiling),
                pedestrian_count: pedestrians,
                smoke_eligible: smoking,
                smoke_particles: if smoking { smoke_particle_count(smell_score) } else { 0 },
                file,
            });
        }
    }

    fn empty_plan(&self) -> PlacementPlan {
        let quarters = QuarterLayout::partition(1, 1, &self.config);
        PlacementPlan {
            buildings: Vec::new(),
            camera: CameraFraming::for_ground(quarters.ground_width, quarters.ground_height),
            quarters,
            code_grid_size: 1,
            test_grid_size: 1,
            scales: MetricScales::default(),
            spacing: self.config.spacing,
            source_files: 0,
            dropped: 0,
        }
    }
}
