//! Repository datasets: loading, discovery and the analyzer that produces them.

pub mod analyze;
pub mod catalogue;
pub mod error;
pub mod model;

pub use catalogue::{discover_datasets, display_name, register_dataset, INDEX_FILE};
pub use error::{DatasetError, Result};
pub use model::{Dataset, DatasetStats};
