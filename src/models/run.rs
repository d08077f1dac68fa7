use std::collections::BTreeMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::time::{Time, TimingMethod};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub name: String,
    /// Cumulative split time reached in the live attempt.
    #[serde(default)]
    pub split_time: Time,
    /// Segment durations keyed by attempt index.
    #[serde(default)]
    pub segment_history: BTreeMap<i32, Time>,
}

impl Segment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub index: i32,
    /// Final time; empty when the attempt was reset before the last split.
    #[serde(default)]
    pub time: Time,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub segments: Vec<Segment>,
    /// Oldest attempt first.
    #[serde(default)]
    pub attempt_history: Vec<Attempt>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Fastest finished attempt under `method`.
    pub fn personal_best(&self, method: TimingMethod) -> Option<Duration> {
        self.attempt_history
            .iter()
            .filter_map(|attempt| attempt.time.get(method))
            .min()
    }
}

/// Anchor of the simulation: the first segment still to be run and the time
/// already spent before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub next_segment: usize,
    pub elapsed: Duration,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            next_segment: 0,
            elapsed: Duration::zero(),
        }
    }
}

/// Read-only view of the host's live attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub run: Run,
    #[serde(default)]
    pub timing_method: TimingMethod,
    /// Number of splits made so far in the live attempt.
    #[serde(default)]
    pub current_split_index: usize,
}

impl RunState {
    pub fn new(run: Run, timing_method: TimingMethod) -> Self {
        Self {
            run,
            timing_method,
            current_split_index: 0,
        }
    }

    /// Walks back from the current split to the most recent segment that has
    /// a split time in the selected timing method. Skipped splits are passed
    /// over so their time is folded into the simulated remainder.
    pub fn progress(&self) -> Progress {
        let upper = self.current_split_index.min(self.run.len());

        (0..upper)
            .rev()
            .find_map(|index| {
                self.run.segments[index]
                    .split_time
                    .get(self.timing_method)
                    .map(|elapsed| Progress {
                        next_segment: index + 1,
                        elapsed,
                    })
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with_splits(splits: &[Option<i64>]) -> Run {
        Run {
            segments: splits
                .iter()
                .enumerate()
                .map(|(i, split)| Segment {
                    name: format!("Segment {}", i + 1),
                    split_time: Time::new(*split, None),
                    segment_history: BTreeMap::new(),
                })
                .collect(),
            attempt_history: Vec::new(),
        }
    }

    #[test]
    fn progress_before_first_split_is_origin() {
        let state = RunState::new(run_with_splits(&[None, None]), TimingMethod::RealTime);
        assert_eq!(state.progress(), Progress::default());
    }

    #[test]
    fn progress_uses_latest_split() {
        let mut state = RunState::new(
            run_with_splits(&[Some(10_000), Some(17_000), None]),
            TimingMethod::RealTime,
        );
        state.current_split_index = 2;

        let progress = state.progress();
        assert_eq!(progress.next_segment, 2);
        assert_eq!(progress.elapsed, Duration::milliseconds(17_000));
    }

    #[test]
    fn progress_passes_over_skipped_splits() {
        let mut state = RunState::new(
            run_with_splits(&[Some(10_000), None, None]),
            TimingMethod::RealTime,
        );
        state.current_split_index = 2;

        let progress = state.progress();
        assert_eq!(progress.next_segment, 1);
        assert_eq!(progress.elapsed, Duration::milliseconds(10_000));
    }

    #[test]
    fn progress_ignores_other_timing_method() {
        let run = run_with_splits(&[Some(10_000)]);
        let mut state = RunState::new(run, TimingMethod::GameTime);
        state.current_split_index = 1;
        assert_eq!(state.progress(), Progress::default());
    }

    #[test]
    fn personal_best_is_fastest_finished_attempt() {
        let mut run = run_with_splits(&[None]);
        run.attempt_history = vec![
            Attempt {
                index: 1,
                time: Time::real_time(90_000),
            },
            Attempt {
                index: 2,
                time: Time::default(),
            },
            Attempt {
                index: 3,
                time: Time::real_time(85_000),
            },
        ];

        assert_eq!(
            run.personal_best(TimingMethod::RealTime),
            Some(Duration::milliseconds(85_000))
        );
        assert_eq!(run.personal_best(TimingMethod::GameTime), None);
    }
}
