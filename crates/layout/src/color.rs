//! Building colors. Code buildings cycle through the whole hue wheel with a little
//! random saturation/lightness jitter; test buildings share a purple band.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hue band (in turns) used for test buildings.
pub const TEST_HUE_START: f32 = 0.75;
pub const TEST_HUE_SPAN: f32 = 0.15;

/// HSL color with every channel in 0..=1 (hue in turns).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl BuildingColor {
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert to RGB in 0..=1.
    pub fn to_rgb(self) -> Vec3 {
        let h = self.hue.rem_euclid(1.0);
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);
        if s == 0.0 {
            return Vec3::splat(l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Vec3::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Color of the `index`-th of `total` code buildings. Saturation is drawn from
/// 0.70..0.90 and lightness from 0.45..0.60.
pub fn code_color<R: Rng + ?Sized>(index: usize, total: usize, rng: &mut R) -> BuildingColor {
    let hue = index as f32 / total.max(1) as f32;
    let saturation = 0.70 + rng.gen::<f32>() * 0.20;
    let lightness = 0.45 + rng.gen::<f32>() * 0.15;
    BuildingColor::hsl(hue, saturation, lightness)
}

/// Color of the `index`-th of `total` test buildings.
pub fn test_color(index: usize, total: usize) -> BuildingColor {
    let hue = TEST_HUE_START + (index as f32 / total.max(1) as f32) * TEST_HUE_SPAN;
    BuildingColor::hsl(hue, 0.7, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn code_hue_spreads_over_index_range() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(code_color(0, 4, &mut rng).hue, 0.0);
        assert_eq!(code_color(1, 4, &mut rng).hue, 0.25);
        assert_eq!(code_color(3, 4, &mut rng).hue, 0.75);
    }

    #[test]
    fn code_jitter_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..200 {
            let c = code_color(i, 200, &mut rng);
            assert!((0.70..=0.90).contains(&c.saturation));
            assert!((0.45..=0.60).contains(&c.lightness));
        }
    }

    #[test]
    fn same_seed_same_colors() {
        let a: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(3);
            (0..10).map(|i| code_color(i, 10, &mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(3);
            (0..10).map(|i| code_color(i, 10, &mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_colors_stay_in_purple_band() {
        for i in 0..10 {
            let c = test_color(i, 10);
            assert!(c.hue >= 0.75 && c.hue < 0.90);
            assert_eq!(c.saturation, 0.7);
            assert_eq!(c.lightness, 0.5);
        }
        assert_eq!(test_color(0, 1).hue, 0.75);
    }

    #[test]
    fn hsl_primaries() {
        let red = BuildingColor::hsl(0.0, 1.0, 0.5).to_rgb();
        assert!((red - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
        let green = BuildingColor::hsl(1.0 / 3.0, 1.0, 0.5).to_rgb();
        assert!((green - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5);
        let grey = BuildingColor::hsl(0.6, 0.0, 0.4).to_rgb();
        assert_eq!(grey, Vec3::splat(0.4));
    }
}
