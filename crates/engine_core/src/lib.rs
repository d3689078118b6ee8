//! Core scene types shared by the code city crates.
//!
//! This crate provides the foundational types used by the renderer-side world:
//! - Transform and spatial components
//! - Tag and data components for every kind of city entity

pub mod components;
pub mod transform;

pub use components::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3};
pub use hecs::{Entity, World};
