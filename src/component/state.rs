use serde::{Deserialize, Serialize};

/// Placeholder shown while no estimate is available.
pub const NO_ESTIMATE: &str = "–";

/// The value published to the display.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimateDisplay {
    /// Percentage in `[0, 100]`; `None` while there is nothing to show.
    pub percentage: Option<f64>,
}

impl EstimateDisplay {
    pub fn none() -> Self {
        Self { percentage: None }
    }

    /// Builds the display value from a probability in `[0, 1]`.
    pub fn from_probability(probability: Option<f64>) -> Self {
        Self::from_percentage(probability.map(|p| p * 100.0))
    }

    pub fn from_percentage(percentage: Option<f64>) -> Self {
        let percentage = percentage.map(|value| {
            if value <= 0.0 || value.is_nan() {
                0.0
            } else if value >= 100.0 {
                100.0
            } else {
                value
            }
        });
        Self { percentage }
    }

    pub fn text(&self) -> String {
        match self.percentage {
            Some(value) => format!("{value:.2}%"),
            None => NO_ESTIMATE.to_string(),
        }
    }
}
