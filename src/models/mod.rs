mod run;
mod time;

pub use run::{Attempt, Progress, Run, RunState, Segment};
pub use time::{Time, TimingMethod};
