//! Visibility layers and precipitation.

use engine_core::Tint;
use glam::Vec3;
use rand::Rng;

/// Independently toggled groups of entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Bugs,
    Tests,
    Smoke,
    Rain,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layers {
    pub bugs: bool,
    pub tests: bool,
    pub smoke: bool,
    pub rain: bool,
    pub snow: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            bugs: true,
            tests: true,
            smoke: false,
            rain: false,
            snow: false,
        }
    }
}

impl Layers {
    pub fn get(&self, layer: Layer) -> bool {
        match layer {
            Layer::Bugs => self.bugs,
            Layer::Tests => self.tests,
            Layer::Smoke => self.smoke,
            Layer::Rain => self.rain,
            Layer::Snow => self.snow,
        }
    }

    /// Returns whether the flag changed.
    pub fn set(&mut self, layer: Layer, on: bool) -> bool {
        let flag = match layer {
            Layer::Bugs => &mut self.bugs,
            Layer::Tests => &mut self.tests,
            Layer::Smoke => &mut self.smoke,
            Layer::Rain => &mut self.rain,
            Layer::Snow => &mut self.snow,
        };
        let changed = *flag != on;
        *flag = on;
        changed
    }
}

/// Side of the square area precipitation falls over, centered on the origin.
pub const PRECIPITATION_AREA: f32 = 60.0;
/// Height particles fall from.
pub const PRECIPITATION_CEILING: f32 = 20.0;

/// Falling particle field (rain or snow).
#[derive(Debug, Clone)]
pub struct Precipitation {
    pub positions: Vec<Vec3>,
    /// Per-particle fall velocity; snow also drifts on X and Z.
    pub velocities: Vec<Vec3>,
    pub color: Vec3,
    pub size: f32,
    pub opacity: f32,
}

impl Precipitation {
    pub fn rain<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut field = Self::scatter(5000, rng, |rng| Vec3::new(0.0, -(0.3 + rng.gen::<f32>() * 0.2), 0.0));
        field.color = Tint::from_hex(0x6699cc).0;
        field.size = 0.1;
        field.opacity = 0.6;
        field
    }

    pub fn snow<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut field = Self::scatter(3000, rng, |rng| {
            Vec3::new(
                (rng.gen::<f32>() - 0.5) * 0.01,
                -(0.02 + rng.gen::<f32>() * 0.02),
                (rng.gen::<f32>() - 0.5) * 0.01,
            )
        });
        field.color = Vec3::ONE;
        field.size = 0.15;
        field.opacity = 0.8;
        field
    }

    fn scatter<R: Rng + ?Sized>(count: usize, rng: &mut R, velocity: impl Fn(&mut R) -> Vec3) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(Vec3::new(
                (rng.gen::<f32>() - 0.5) * PRECIPITATION_AREA,
                rng.gen::<f32>() * PRECIPITATION_CEILING,
                (rng.gen::<f32>() - 0.5) * PRECIPITATION_AREA,
            ));
            velocities.push(velocity(&mut *rng));
        }
        Self {
            positions,
            velocities,
            color: Vec3::ONE,
            size: 0.1,
            opacity: 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults_show_bugs_and_tests_only() {
        let layers = Layers::default();
        assert!(layers.get(Layer::Bugs));
        assert!(layers.get(Layer::Tests));
        assert!(!layers.get(Layer::Smoke));
        assert!(!layers.get(Layer::Rain));
        assert!(!layers.get(Layer::Snow));
    }

    #[test]
    fn set_reports_changes() {
        let mut layers = Layers::default();
        assert!(layers.set(Layer::Rain, true));
        assert!(!layers.set(Layer::Rain, true));
        assert!(layers.rain);
    }

    #[test]
    fn precipitation_starts_inside_its_volume() {
        let mut rng = StdRng::seed_from_u64(1);
        let rain = Precipitation::rain(&mut rng);
        let snow = Precipitation::snow(&mut rng);
        assert_eq!(rain.len(), 5000);
        assert_eq!(snow.len(), 3000);
        for p in rain.positions.iter().chain(&snow.positions) {
            assert!(p.x.abs() <= PRECIPITATION_AREA / 2.0);
            assert!(p.z.abs() <= PRECIPITATION_AREA / 2.0);
            assert!((0.0..=PRECIPITATION_CEILING).contains(&p.y));
        }
        assert!(rain.velocities.iter().all(|v| v.y < -0.29 && v.x == 0.0));
        assert!(snow.velocities.iter().all(|v| v.y < 0.0 && v.y > -0.05));
    }
}
