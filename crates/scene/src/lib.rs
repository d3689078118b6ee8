//! ECS world for a composed code city.
//!
//! [`WorldState::populate`] turns a [`layout::PlacementPlan`] into hecs entities
//! carrying `engine_core` components. A renderer draws those entities; this crate
//! only decides what exists, where, and whether it is visible.

pub mod layers;
pub mod lighting;
pub mod spawn;
pub mod world;

pub use layers::{Layer, Layers, Precipitation};
pub use lighting::{Lighting, TimeOfDay};
pub use world::{CameraRig, Census, WorldState, FOCUS_OFFSET};
