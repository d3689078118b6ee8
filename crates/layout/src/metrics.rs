//! Metric normalization: raw commit/bug/smell numbers to visual quantities.

use serde::{Deserialize, Serialize};

use crate::record::FileRecord;

/// Dataset-wide maxima used to normalize per-file metrics. Both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricScales {
    pub max_commits: u32,
    pub max_bugs: u32,
}

impl Default for MetricScales {
    fn default() -> Self {
        Self {
            max_commits: 1,
            max_bugs: 1,
        }
    }
}

impl MetricScales {
    /// Scan a file set for its commit and bug maxima.
    pub fn from_files<'a>(files: impl IntoIterator<Item = &'a FileRecord>) -> Self {
        files.into_iter().fold(Self::default(), |scales, file| Self {
            max_commits: scales.max_commits.max(file.effective_commits()),
            max_bugs: scales.max_bugs.max(file.bugs),
        })
    }
}

/// Building height for a commit count: linear in commits, never below 1 nor above `max_height`.
pub fn height_for(commits: u32, max_commits: u32, max_height: f32) -> f32 {
    let ratio = commits.max(1) as f32 / max_commits.max(1) as f32;
    (ratio * max_height).min(max_height).max(1.0)
}

/// Number of bug entities to draw, `ceil(bugs / max_bugs * ceiling)` capped at `ceiling`.
pub fn bug_visual_count(bugs: u32, max_bugs: u32, ceiling: u32) -> u32 {
    if bugs == 0 {
        return 0;
    }
    let scaled = (bugs as f64 / max_bugs.max(1) as f64) * ceiling as f64;
    (scaled.ceil() as u32).min(ceiling)
}

pub fn smoke_eligible(smell_score: u32, threshold: u32) -> bool {
    smell_score >= threshold
}

/// Particles in a smoke plume. Only meaningful for eligible buildings.
pub fn smoke_particle_count(smell_score: u32) -> u32 {
    smell_score / 2
}

/// Pedestrians heading to a building, `ceil(commits / max_commits * ceiling)` capped at `ceiling`.
pub fn pedestrian_count(commits: u32, max_commits: u32, ceiling: u32) -> u32 {
    let scaled = (commits.max(1) as f64 / max_commits.max(1) as f64) * ceiling as f64;
    (scaled.ceil() as u32).min(ceiling)
}
