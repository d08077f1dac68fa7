use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::simulation::EstimateConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChanceSettings {
    pub label: String,
    pub cutoff_ms: Option<i64>,
    /// Keep the cutoff in sync with the personal best of the run.
    pub use_personal_best: bool,
    pub weight: f64,
    /// Percent chance of resetting at each segment, by segment index.
    pub reset_chances: Vec<f64>,
}

impl Default for ChanceSettings {
    fn default() -> Self {
        Self {
            label: "PB Chance".into(),
            cutoff_ms: None,
            use_personal_best: true,
            weight: 0.75,
            reset_chances: Vec::new(),
        }
    }
}

impl ChanceSettings {
    pub fn cutoff(&self) -> Option<Duration> {
        self.cutoff_ms.map(Duration::milliseconds)
    }

    pub fn set_cutoff(&mut self, cutoff: Option<Duration>) {
        self.cutoff_ms = cutoff.map(|c| c.num_milliseconds());
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = clamp_or_zero(weight, 1.0);
    }

    pub fn set_reset_chance(&mut self, index: usize, chance: f64) {
        if index >= self.reset_chances.len() {
            self.reset_chances.resize(index + 1, 0.0);
        }
        self.reset_chances[index] = clamp_or_zero(chance, 100.0);
    }

    /// Matches the reset chance list to the run's segment count, keeping
    /// values by position.
    pub fn resize_reset_chances(&mut self, segment_count: usize) {
        self.reset_chances.resize(segment_count, 0.0);
    }

    /// Validated copy of the values the estimator reads.
    pub fn snapshot(&self) -> EstimateConfig {
        EstimateConfig {
            cutoff: self.cutoff(),
            weight: clamp_or_zero(self.weight, 1.0),
            reset_chances: self
                .reset_chances
                .iter()
                .map(|&c| clamp_or_zero(c, 100.0))
                .collect(),
        }
    }
}

fn clamp_or_zero(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

/// Parsers for values typed into the settings form.
pub mod parse {
    use anyhow::{anyhow, bail, Context, Result};
    use chrono::Duration;

    /// Parses `[[h:]m:]s[.fff]`. An empty string clears the cutoff.
    pub fn parse_cutoff(text: &str) -> Result<Option<Duration>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() > 3 {
            bail!("Invalid time '{text}'. Expected [[h:]m:]s[.fff]");
        }

        let (whole, seconds) = parts.split_at(parts.len() - 1);
        let seconds: f64 = seconds[0]
            .parse()
            .with_context(|| format!("Invalid seconds in '{text}'"))?;
        if !seconds.is_finite() || seconds < 0.0 {
            bail!("Invalid seconds in '{text}'");
        }

        let mut total_ms = (seconds * 1000.0).round() as i64;
        let mut scale = 60_000i64;
        for part in whole.iter().rev() {
            let value: i64 = part
                .parse()
                .with_context(|| format!("Invalid time component '{part}' in '{text}'"))?;
            if value < 0 {
                bail!("Negative time component in '{text}'");
            }
            total_ms = value
                .checked_mul(scale)
                .and_then(|ms| ms.checked_add(total_ms))
                .ok_or_else(|| anyhow!("Time '{text}' is too large"))?;
            scale *= 60;
        }

        Ok(Some(Duration::milliseconds(total_ms)))
    }

    /// Parses a reset chance percentage. An empty string means 0%.
    pub fn parse_reset_chance(text: &str) -> Result<f64> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(0.0);
        }

        let chance: f64 = text
            .parse()
            .with_context(|| format!("Invalid reset chance '{text}'"))?;
        if !(0.0..=100.0).contains(&chance) {
            bail!("Reset chance must be between 0 and 100, got {chance}");
        }
        Ok(chance)
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<ChanceSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            ChanceSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> Result<ChanceSettings> {
        let guard = self
            .data
            .read()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        Ok(guard.clone())
    }

    pub fn update<F>(&self, apply: F) -> Result<ChanceSettings>
    where
        F: FnOnce(&mut ChanceSettings),
    {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        apply(&mut *guard);
        self.persist(&guard)?;
        Ok(guard.clone())
    }

    fn persist(&self, data: &ChanceSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: ChanceSettings = serde_json::from_str(&contents)?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        *guard = data;
        Ok(())
    }
}
