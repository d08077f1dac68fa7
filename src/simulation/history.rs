use chrono::Duration;

use crate::models::{Run, TimingMethod};

/// Observed durations of one segment, oldest attempt first.
pub type SegmentHistory = Vec<Duration>;

/// Per-segment duration history of a run, in segment order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullHistory {
    segments: Vec<SegmentHistory>,
}

impl FullHistory {
    pub fn new(segments: Vec<SegmentHistory>) -> Self {
        Self { segments }
    }

    /// Collects the history of every segment of `run` under `method`.
    ///
    /// A missing time marks a gap in that attempt. The next recorded time of
    /// the same attempt spans the gap as well, so it is dropped instead of
    /// being attributed to its own segment.
    pub fn from_run(run: &Run, method: TimingMethod) -> Self {
        if run.is_empty() {
            return Self::default();
        }

        let mut segments = vec![SegmentHistory::new(); run.len()];

        for attempt in &run.attempt_history {
            let mut after_gap = false;

            for (history, segment) in segments.iter_mut().zip(&run.segments) {
                let Some(time) = segment.segment_history.get(&attempt.index) else {
                    continue;
                };

                match time.get(method) {
                    None => after_gap = true,
                    Some(_) if after_gap => after_gap = false,
                    Some(duration) => history.push(duration),
                }
            }
        }

        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&[Duration]> {
        self.segments.get(index).map(Vec::as_slice)
    }

    pub fn segments(&self) -> &[SegmentHistory] {
        &self.segments
    }

    /// Whether every segment from `start` onward has at least one sample.
    pub fn covers_from(&self, start: usize) -> bool {
        self.segments
            .iter()
            .skip(start)
            .all(|history| !history.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attempt, Segment, Time};

    fn secs(s: i64) -> Duration {
        Duration::seconds(s)
    }

    /// `rows[attempt][segment]`: `Some(Some(ms))` recorded, `Some(None)` gap,
    /// `None` not reached.
    fn run_from(rows: &[&[Option<Option<i64>>]], segment_count: usize) -> Run {
        let mut segments: Vec<Segment> = (0..segment_count)
            .map(|i| Segment::new(format!("S{i}")))
            .collect();
        let mut attempt_history = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let index = i as i32 + 1;
            attempt_history.push(Attempt {
                index,
                time: Time::default(),
            });
            for (segment, cell) in segments.iter_mut().zip(row.iter()) {
                if let Some(ms) = cell {
                    segment.segment_history.insert(index, Time::new(*ms, None));
                }
            }
        }

        Run {
            segments,
            attempt_history,
        }
    }

    #[test]
    fn keeps_attempt_order() {
        let run = run_from(
            &[
                &[Some(Some(10_000)), Some(Some(5_000))],
                &[Some(Some(11_000)), Some(Some(7_000))],
            ],
            2,
        );

        let history = FullHistory::from_run(&run, TimingMethod::RealTime);
        assert_eq!(history.segment(0).unwrap(), &[secs(10), secs(11)]);
        assert_eq!(history.segment(1).unwrap(), &[secs(5), secs(7)]);
    }

    #[test]
    fn reset_attempts_only_contribute_reached_segments() {
        let run = run_from(
            &[
                &[Some(Some(10_000)), None, None],
                &[Some(Some(12_000)), Some(Some(6_000)), Some(Some(4_000))],
            ],
            3,
        );

        let history = FullHistory::from_run(&run, TimingMethod::RealTime);
        assert_eq!(history.segment(0).unwrap().len(), 2);
        assert_eq!(history.segment(1).unwrap(), &[secs(6)]);
        assert_eq!(history.segment(2).unwrap(), &[secs(4)]);
    }

    #[test]
    fn time_after_gap_is_not_attributed() {
        let run = run_from(
            &[&[
                Some(Some(10_000)),
                Some(None),
                Some(Some(9_000)),
                Some(Some(3_000)),
            ]],
            4,
        );

        let history = FullHistory::from_run(&run, TimingMethod::RealTime);
        assert_eq!(history.segment(0).unwrap(), &[secs(10)]);
        assert!(history.segment(1).unwrap().is_empty());
        assert!(history.segment(2).unwrap().is_empty());
        assert_eq!(history.segment(3).unwrap(), &[secs(3)]);
    }

    #[test]
    fn consecutive_gaps_skip_one_combined_time() {
        let run = run_from(
            &[&[
                Some(None),
                Some(None),
                Some(Some(20_000)),
                Some(Some(4_000)),
            ]],
            4,
        );

        let history = FullHistory::from_run(&run, TimingMethod::RealTime);
        assert!(history.segment(2).unwrap().is_empty());
        assert_eq!(history.segment(3).unwrap(), &[secs(4)]);
    }

    #[test]
    fn other_timing_method_counts_as_gap() {
        let run = run_from(&[&[Some(Some(10_000))]], 1);
        let history = FullHistory::from_run(&run, TimingMethod::GameTime);
        assert!(history.segment(0).unwrap().is_empty());
    }

    #[test]
    fn covers_from_only_checks_remaining_segments() {
        let history = FullHistory::new(vec![vec![], vec![secs(5)], vec![secs(3)]]);
        assert!(!history.covers_from(0));
        assert!(history.covers_from(1));
        assert!(history.covers_from(3));
    }

    #[test]
    fn segment_out_of_range_is_none() {
        let history = FullHistory::new(vec![vec![secs(5)]]);
        assert_eq!(history.segment(0), Some(&[secs(5)][..]));
        assert_eq!(history.segment(1), None);
    }

    #[test]
    fn run_without_segments_has_empty_history() {
        let run = run_from(&[], 0);
        let history = FullHistory::from_run(&run, TimingMethod::RealTime);
        assert!(history.is_empty());
        assert!(history.covers_from(0));
    }
}
