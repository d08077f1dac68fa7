use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{
    log_error, log_info, log_warn,
    models::RunState,
    settings::ChanceSettings,
    simulation::{estimate_for_state, SimulationConfig},
};

use super::EstimateDisplay;

const ENABLE_LOGS: bool = true;

/// Host state transitions that invalidate the current estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RunEvent {
    Split,
    UndoSplit,
    Reset,
    RunManuallyModified,
}

/// Receives every published estimate.
pub trait ResultSink {
    fn publish(&mut self, display: &EstimateDisplay);
}

impl<F> ResultSink for F
where
    F: FnMut(&EstimateDisplay),
{
    fn publish(&mut self, display: &EstimateDisplay) {
        self(display)
    }
}

/// Keeps the completion estimate current. Every event and settings change
/// rebuilds the history from the given [`RunState`] and reruns the full
/// simulation with the fixed seed from [`SimulationConfig`].
pub struct ChanceToBeat {
    settings: ChanceSettings,
    simulation: SimulationConfig,
    display: EstimateDisplay,
    sinks: Vec<Box<dyn ResultSink>>,
}

impl ChanceToBeat {
    pub fn new(settings: ChanceSettings, state: &RunState) -> Self {
        Self::with_simulation(settings, SimulationConfig::default(), state)
    }

    pub fn with_simulation(
        settings: ChanceSettings,
        simulation: SimulationConfig,
        state: &RunState,
    ) -> Self {
        let mut component = Self {
            settings,
            simulation,
            display: EstimateDisplay::none(),
            sinks: Vec::new(),
        };
        component.sync_with_run(state);
        component.recompute(state);
        component
    }

    pub fn name(&self) -> &str {
        &self.settings.label
    }

    pub fn settings(&self) -> &ChanceSettings {
        &self.settings
    }

    pub fn display(&self) -> EstimateDisplay {
        self.display
    }

    /// Registers a sink and immediately hands it the current value.
    pub fn subscribe(&mut self, mut sink: Box<dyn ResultSink>) {
        sink.publish(&self.display);
        self.sinks.push(sink);
    }

    pub fn handle_event(&mut self, event: RunEvent, state: &RunState) -> EstimateDisplay {
        match event {
            RunEvent::Split | RunEvent::UndoSplit => {}
            RunEvent::Reset | RunEvent::RunManuallyModified => self.sync_with_run(state),
        }
        self.recompute(state)
    }

    /// Sets a custom cutoff; this stops following the personal best.
    pub fn set_cutoff(&mut self, cutoff: Option<Duration>, state: &RunState) -> EstimateDisplay {
        self.settings.use_personal_best = false;
        self.settings.set_cutoff(cutoff);
        self.recompute(state)
    }

    pub fn set_use_personal_best(&mut self, enabled: bool, state: &RunState) -> EstimateDisplay {
        self.settings.use_personal_best = enabled;
        self.sync_with_run(state);
        self.recompute(state)
    }

    pub fn set_weight(&mut self, weight: f64, state: &RunState) -> EstimateDisplay {
        self.settings.set_weight(weight);
        self.recompute(state)
    }

    pub fn set_reset_chance(
        &mut self,
        index: usize,
        chance: f64,
        state: &RunState,
    ) -> EstimateDisplay {
        self.settings.set_reset_chance(index, chance);
        self.recompute(state)
    }

    pub fn replace_settings(
        &mut self,
        settings: ChanceSettings,
        state: &RunState,
    ) -> EstimateDisplay {
        self.settings = settings;
        self.sync_with_run(state);
        self.recompute(state)
    }

    /// Reruns the simulation against `state` and publishes the result.
    pub fn recompute(&mut self, state: &RunState) -> EstimateDisplay {
        let config = self.settings.snapshot();

        let probability = match estimate_for_state(state, &config, &self.simulation) {
            Ok(probability) => probability,
            Err(e) => {
                log_error!("Failed to estimate completion chance: {e:#}");
                None
            }
        };

        self.display = EstimateDisplay::from_probability(probability);
        log_info!(
            "{} after split {}: {}",
            self.settings.label,
            state.current_split_index,
            self.display.text()
        );

        for sink in &mut self.sinks {
            sink.publish(&self.display);
        }

        self.display
    }

    fn sync_with_run(&mut self, state: &RunState) {
        self.settings.resize_reset_chances(state.run.len());
        if self.settings.use_personal_best {
            let pb = state.run.personal_best(state.timing_method);
            if pb.is_none() {
                log_warn!(
                    "No finished attempt in {}; {} has no cutoff",
                    state.timing_method.as_str(),
                    self.settings.label
                );
            }
            self.settings.set_cutoff(pb);
        }
    }
}
