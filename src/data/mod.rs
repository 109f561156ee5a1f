pub mod dataset;
pub mod registry;
pub mod stats;
pub mod transform;

// Re-export key types for convenience
pub use dataset::Dataset;
pub use registry::DatasetRegistry;
pub use transform::{ColumnAction, TimeField};
