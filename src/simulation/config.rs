/// Monte Carlo parameters for the completion estimate.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Simulated attempts per estimate.
    pub iterations: usize,

    /// Seed applied at the start of every estimate. Reusing it keeps the
    /// displayed value steady while nothing relevant changes.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 20_000,
            seed: 0,
        }
    }
}
