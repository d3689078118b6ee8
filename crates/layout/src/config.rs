//! Tunable layout constants. Every value here can be overridden from `config.ron`.

use serde::{Deserialize, Serialize};

/// Geometry and metric-encoding parameters for [`crate::CityComposer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Maximum number of buildings placed across both quarters.
    #[serde(default = "default_max_buildings")]
    pub max_buildings: usize,
    /// Distance between neighbouring grid cells in world units.
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    /// Height of the building with the most commits.
    #[serde(default = "default_max_height")]
    pub max_height: f32,
    /// Border added around each quarter's grid.
    #[serde(default = "default_margin")]
    pub margin: f32,
    /// Width of the strip between the two quarters (holds the main road).
    #[serde(default = "default_gap")]
    pub gap: f32,
    /// Most bugs drawn around one code building.
    #[serde(default = "default_code_bug_ceiling")]
    pub code_bug_ceiling: u32,
    /// Most bugs drawn around one test building.
    #[serde(default = "default_test_bug_ceiling")]
    pub test_bug_ceiling: u32,
    /// Most pedestrians walking to one code building.
    #[serde(default = "default_pedestrian_ceiling")]
    pub pedestrian_ceiling: u32,
    /// Smell score at which a building starts smoking.
    #[serde(default = "default_smoke_threshold")]
    pub smoke_threshold: u32,
}

fn default_max_buildings() -> usize {
    500
}
fn default_spacing() -> f32 {
    1.5
}
fn default_max_height() -> f32 {
    8.0
}
fn default_margin() -> f32 {
    4.0
}
fn default_gap() -> f32 {
    3.0
}
fn default_code_bug_ceiling() -> u32 {
    5
}
fn default_test_bug_ceiling() -> u32 {
    3
}
fn default_pedestrian_ceiling() -> u32 {
    3
}
fn default_smoke_threshold() -> u32 {
    20
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_buildings: default_max_buildings(),
            spacing: default_spacing(),
            max_height: default_max_height(),
            margin: default_margin(),
            gap: default_gap(),
            code_bug_ceiling: default_code_bug_ceiling(),
            test_bug_ceiling: default_test_bug_ceiling(),
            pedestrian_ceiling: default_pedestrian_ceiling(),
            smoke_threshold: default_smoke_threshold(),
        }
    }
}

impl LayoutConfig {
    /// Same geometry with a different building budget.
    pub fn with_max_buildings(mut self, max_buildings: usize) -> Self {
        self.max_buildings = max_buildings;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_fills_in_defaults() {
        let config: LayoutConfig = ron::from_str("(max_buildings: 12, gap: 1.0)").unwrap();
        assert_eq!(config.max_buildings, 12);
        assert_eq!(config.gap, 1.0);
        assert_eq!(config.spacing, 1.5);
        assert_eq!(config.code_bug_ceiling, 5);
        assert_eq!(config.test_bug_ceiling, 3);
    }

    #[test]
    fn defaults_match_reference_city() {
        let config = LayoutConfig::default();
        assert_eq!(config.max_buildings, 500);
        assert_eq!(config.max_height, 8.0);
        assert_eq!(config.margin, 4.0);
        assert_eq!(config.smoke_threshold, 20);
    }
}
