pub mod config;
pub mod estimator;
pub mod history;
pub mod sampler;

pub use config::SimulationConfig;
pub use estimator::{estimate, estimate_for_state, EstimateConfig};
pub use history::{FullHistory, SegmentHistory};
