pub mod controller;
pub mod state;

pub use controller::{ChanceToBeat, ResultSink, RunEvent};
pub use state::{EstimateDisplay, NO_ESTIMATE};
