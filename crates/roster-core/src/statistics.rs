//! Descriptive statistics over recorded quiz scores.
//!
//! Mean, median, and mode of a score sample, plus the frequency histogram
//! (one bin per integer score 0..=10) that the report crate renders.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest score a quiz can produce.
pub const MAX_SCORE: u32 = 10;

/// Mode of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One value is strictly more frequent than every other.
    Unique(u32),
    /// Two or more values tie for the highest frequency.
    NoUniqueMode,
}

impl Mode {
    pub fn value(&self) -> Option<u32> {
        match self {
            Mode::Unique(v) => Some(*v),
            Mode::NoUniqueMode => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Unique(v) => write!(f, "{v}"),
            Mode::NoUniqueMode => write!(f, "no unique mode (values equally frequent)"),
        }
    }
}

/// Mean, median, and mode of a non-empty sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: Mode,
}

/// Arithmetic mean. `None` for an empty sample.
pub fn mean(scores: &[u32]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    Some(sum as f64 / scores.len() as f64)
}

/// Median; the average of the two middle values for an even count.
pub fn median(scores: &[u32]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
    } else {
        f64::from(sorted[mid])
    })
}

/// Mode, or [`Mode::NoUniqueMode`] when the highest frequency is shared.
pub fn mode(scores: &[u32]) -> Option<Mode> {
    if scores.is_empty() {
        return None;
    }
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for &s in scores {
        *counts.entry(s).or_default() += 1;
    }
    let max = counts.values().copied().max().unwrap_or(0);
    let mut leaders = counts.iter().filter(|&(_, &c)| c == max).map(|(&v, _)| v);
    Some(match (leaders.next(), leaders.next()) {
        (Some(v), None) => Mode::Unique(v),
        _ => Mode::NoUniqueMode,
    })
}

/// Summarize a sample. `None` when there is nothing to compute.
pub fn describe(scores: &[u32]) -> Option<ScoreSummary> {
    Some(ScoreSummary {
        count: scores.len(),
        mean: mean(scores)?,
        median: median(scores)?,
        mode: mode(scores)?,
    })
}

/// Frequency of each integer score from 0 through [`MAX_SCORE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    bins: Vec<usize>,
}

impl Histogram {
    /// Count scores per bin. Values above [`MAX_SCORE`] land in the top bin.
    pub fn from_scores(scores: &[u32]) -> Self {
        let mut bins = vec![0; MAX_SCORE as usize + 1];
        for &s in scores {
            bins[s.min(MAX_SCORE) as usize] += 1;
        }
        Self { bins }
    }

    /// `(score, frequency)` pairs for every bin, lowest score first.
    pub fn bins(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.bins.iter().enumerate().map(|(i, &c)| (i as u32, c))
    }

    pub fn count(&self, score: u32) -> usize {
        self.bins.get(score as usize).copied().unwrap_or(0)
    }

    /// Largest bin frequency.
    pub fn max_count(&self) -> usize {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }
}

/// Everything the statistics view shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub summary: ScoreSummary,
    pub histogram: Histogram,
}

impl ScoreReport {
    /// Build a report. `None` for an empty sample.
    pub fn from_scores(scores: &[u32]) -> Option<Self> {
        let summary = describe(scores)?;
        Some(Self {
            summary,
            histogram: Histogram::from_scores(scores),
        })
    }

    /// Plain-text report lines.
    pub fn to_text(&self) -> String {
        format!(
            "Mean: {:.2}\nMedian: {:.1}\nMode: {}\n",
            self.summary.mean, self.summary.median, self.summary.mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_example_sample() {
        let s = describe(&[2, 2, 2, 8, 8, 9]).unwrap();
        assert!((s.mean - 31.0 / 6.0).abs() < 1e-9);
        assert!((s.median - 5.0).abs() < f64::EPSILON);
        assert_eq!(s.mode, Mode::Unique(2));
        assert_eq!(s.count, 6);
    }

    #[test]
    fn all_distinct_has_no_unique_mode() {
        assert_eq!(mode(&[1, 2, 3]), Some(Mode::NoUniqueMode));
    }

    #[test]
    fn tie_at_max_frequency_has_no_unique_mode() {
        assert_eq!(mode(&[4, 4, 7, 7, 1]), Some(Mode::NoUniqueMode));
    }

    #[test]
    fn single_value_is_its_own_mode() {
        assert_eq!(mode(&[6]), Some(Mode::Unique(6)));
        assert_eq!(mode(&[3, 3, 3]), Some(Mode::Unique(3)));
    }

    #[test]
    fn odd_count_median_is_middle_value() {
        assert_eq!(median(&[9, 1, 5]), Some(5.0));
    }

    #[test]
    fn empty_sample_computes_nothing() {
        assert!(describe(&[]).is_none());
        assert!(mean(&[]).is_none());
        assert!(ScoreReport::from_scores(&[]).is_none());
    }

    #[test]
    fn histogram_has_eleven_bins() {
        let h = Histogram::from_scores(&[0, 10, 10, 5]);
        assert_eq!(h.bins().count(), 11);
        assert_eq!(h.count(0), 1);
        assert_eq!(h.count(10), 2);
        assert_eq!(h.count(5), 1);
        assert_eq!(h.count(11), 0);
        assert_eq!(h.max_count(), 2);
        assert_eq!(h.total(), 4);
    }

    #[test]
    fn text_report_formats_values() {
        let report = ScoreReport::from_scores(&[2, 2, 2, 8, 8, 9]).unwrap();
        assert_eq!(report.to_text(), "Mean: 5.17\nMedian: 5.0\nMode: 2\n");

        let report = ScoreReport::from_scores(&[1, 2, 3]).unwrap();
        assert!(report.to_text().contains("Mode: no unique mode"));
    }
}
