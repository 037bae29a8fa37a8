pub mod association;
pub mod config;
pub mod cooccurrence;
pub mod error;
pub mod frequency;
pub mod pipeline;
pub mod probability;
pub mod relations;
pub mod report;
pub mod similarity;

pub use config::{files_handling, Config, JsonTypes};
pub use error::{DepSimError, Result};
pub use pipeline::{Model, Pipeline};
pub use report::TargetReport;
pub use similarity::Similarity;
