use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimingMethod {
    #[default]
    RealTime,
    GameTime,
}

impl TimingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingMethod::RealTime => "realTime",
            TimingMethod::GameTime => "gameTime",
        }
    }
}

/// A recorded time under both timing methods. Either side may be missing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Time {
    pub real_time_ms: Option<i64>,
    pub game_time_ms: Option<i64>,
}

impl Time {
    pub fn new(real_time_ms: Option<i64>, game_time_ms: Option<i64>) -> Self {
        Self {
            real_time_ms,
            game_time_ms,
        }
    }

    pub fn real_time(ms: i64) -> Self {
        Self::new(Some(ms), None)
    }

    pub fn get(&self, method: TimingMethod) -> Option<Duration> {
        let ms = match method {
            TimingMethod::RealTime => self.real_time_ms,
            TimingMethod::GameTime => self.game_time_ms,
        };
        ms.map(Duration::milliseconds)
    }
}
