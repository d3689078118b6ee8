//! Day and night lighting presets.

use engine_core::Tint;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub time_of_day: TimeOfDay,
    /// Background color.
    pub sky: Vec3,
    pub ambient_intensity: f32,
    pub sun_intensity: f32,
    pub sun_color: Vec3,
    pub hemisphere_intensity: f32,
    /// Opacity of every cloud puff.
    pub cloud_opacity: f32,
}

impl Lighting {
    pub fn day() -> Self {
        Self {
            time_of_day: TimeOfDay::Day,
            sky: Tint::from_hex(0x87ceeb).0,
            ambient_intensity: 0.6,
            sun_intensity: 1.2,
            sun_color: Tint::from_hex(0xfffacd).0,
            hemisphere_intensity: 0.4,
            cloud_opacity: 0.85,
        }
    }

    pub fn night() -> Self {
        Self {
            time_of_day: TimeOfDay::Night,
            sky: Tint::from_hex(0x0a0a1a).0,
            ambient_intensity: 0.15,
            sun_intensity: 0.3,
            sun_color: Tint::from_hex(0x4444aa).0,
            hemisphere_intensity: 0.1,
            cloud_opacity: 0.3,
        }
    }

    pub fn for_time(time_of_day: TimeOfDay) -> Self {
        match time_of_day {
            TimeOfDay::Day => Self::day(),
            TimeOfDay::Night => Self::night(),
        }
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn night_is_darker_than_day() {
        let day = Lighting::day();
        let night = Lighting::night();
        assert!(night.ambient_intensity < day.ambient_intensity);
        assert!(night.sun_intensity < day.sun_intensity);
        assert!(night.cloud_opacity < day.cloud_opacity);
        assert!(night.sky.length() < day.sky.length());
    }

    #[test]
    fn preset_matches_time() {
        assert_eq!(Lighting::for_time(TimeOfDay::Night), Lighting::night());
        assert_eq!(Lighting::default().time_of_day, TimeOfDay::Day);
    }
}
