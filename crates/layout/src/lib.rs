//! Code city layout: turns per-file repository metrics into a placement plan.
//!
//! Files are split into a code quarter and a test quarter, trimmed to a
//! building budget, packed onto square spirals and given a height, color and
//! decoration counts derived from their commit, bug and smell metrics. The
//! result is a [`PlacementPlan`] value; nothing here touches a scene.

pub mod cap;
pub mod category;
pub mod color;
pub mod compose;
pub mod config;
pub mod metrics;
pub mod plan;
pub mod quarter;
pub mod record;
pub mod spiral;

pub use cap::*;
pub use category::*;
pub use color::*;
pub use compose::*;
pub use config::*;
pub use metrics::*;
pub use plan::*;
pub use quarter::*;
pub use record::*;
pub use spiral::*;
