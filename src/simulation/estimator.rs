use anyhow::Result;
use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Progress, RunState};
use crate::simulation::{config::SimulationConfig, history::FullHistory, sampler::sample};

/// Immutable estimator inputs taken from the settings at estimate time.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateConfig {
    pub cutoff: Option<Duration>,
    /// Recency bias in `[0, 1]`: 0 always uses the latest time, 1 is uniform.
    pub weight: f64,
    /// Percent chance of the attempt ending at each segment, by segment index.
    pub reset_chances: Vec<f64>,
}

/// Sums one sampled duration for every segment from `start` to the end.
pub fn simulate_attempt<R: Rng + ?Sized>(
    history: &FullHistory,
    rng: &mut R,
    start: usize,
    weight: f64,
) -> Result<Duration> {
    let mut total = Duration::zero();
    for segment in history.segments().iter().skip(start) {
        total = total + *sample(segment, weight, rng)?;
    }
    Ok(total)
}

/// Probability that none of the segments from `start` onward ends the attempt.
pub fn survival_factor(reset_chances: &[f64], start: usize, segment_count: usize) -> f64 {
    (start..segment_count)
        .map(|i| {
            let chance = reset_chances.get(i).copied().unwrap_or(0.0);
            let chance = if chance.is_nan() {
                0.0
            } else {
                chance.clamp(0.0, 100.0)
            };
            1.0 - chance / 100.0
        })
        .product()
}

/// Chance in `[0, 1]` of finishing under the cutoff, or `None` when there is
/// no cutoff or a remaining segment has never been completed.
pub fn estimate(
    history: &FullHistory,
    progress: Progress,
    config: &EstimateConfig,
    simulation: &SimulationConfig,
) -> Result<Option<f64>> {
    let Some(cutoff) = config.cutoff else {
        return Ok(None);
    };

    let start = progress.next_segment;
    if !history.covers_from(start) || simulation.iterations == 0 {
        return Ok(None);
    }

    let budget = cutoff - progress.elapsed;
    let mut rng = StdRng::seed_from_u64(simulation.seed);
    let mut successes = 0usize;

    for _ in 0..simulation.iterations {
        if simulate_attempt(history, &mut rng, start, config.weight)? < budget {
            successes += 1;
        }
    }

    let sampled = successes as f64 / simulation.iterations as f64;
    let survival = survival_factor(&config.reset_chances, start, history.len());

    Ok(Some(survival * sampled))
}

/// Rebuilds the history from `state` and runs [`estimate`].
pub fn estimate_for_state(
    state: &RunState,
    config: &EstimateConfig,
    simulation: &SimulationConfig,
) -> Result<Option<f64>> {
    let history = FullHistory::from_run(&state.run, state.timing_method);
    estimate(&history, state.progress(), config, simulation)
}
