//! Quartile Aggregator Module
//! Per-category quartiles computed by linear-interpolation quantiles.

use crate::data::{Dataset, Field};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_FACTOR: f64 = 1.5;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Cannot take a quantile of an empty group{}", group_suffix(.0))]
    EmptyGroup(Option<String>),
    #[error("Quantile probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}

fn group_suffix(label: &Option<String>) -> String {
    label
        .as_deref()
        .map(|l| format!(" '{l}'"))
        .unwrap_or_default()
}

/// Q1, median and Q3 of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuartileSummary {
    pub label: String,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl QuartileSummary {
    /// Interquartile range, `q3 - q1`.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Whisker extent `[q1 - 1.5 * iqr, q3 + 1.5 * iqr]`.
    pub fn whisker(&self) -> (f64, f64) {
        self.whisker_with(WHISKER_FACTOR)
    }

    pub fn whisker_with(&self, factor: f64) -> (f64, f64) {
        let reach = factor * self.iqr();
        (self.q1 - reach, self.q3 + reach)
    }
}

/// Quantile of an ascending slice using linear interpolation.
///
/// The rank is `p * (n - 1)`; the result interpolates between the two
/// elements bracketing it.
pub fn quantile(sorted_values: &[f64], p: f64) -> Result<f64, StatsError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::InvalidProbability(p));
    }
    let n = sorted_values.len();
    if n == 0 {
        return Err(StatsError::EmptyGroup(None));
    }
    if n == 1 {
        return Ok(sorted_values[0]);
    }

    let rank = p * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        Ok(sorted_values[lower])
    } else {
        let a = sorted_values[lower];
        let b = sorted_values[upper];
        Ok(a + (b - a) * frac)
    }
}

/// Sort `values` and summarize them as quartiles.
pub fn summarize(label: &str, values: &[f64]) -> Result<QuartileSummary, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyGroup(Some(label.to_string())));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(QuartileSummary {
        label: label.to_string(),
        count: sorted.len(),
        q1: quantile(&sorted, 0.25)?,
        median: quantile(&sorted, 0.5)?,
        q3: quantile(&sorted, 0.75)?,
    })
}

/// Group the dataset by label and summarize `field` for each group.
///
/// Summaries come back in first-seen label order.
pub fn quartiles_by_label(
    dataset: &Dataset,
    field: Field,
) -> Result<Vec<QuartileSummary>, StatsError> {
    dataset
        .values_by_label(field)
        .par_iter()
        .map(|(label, values)| summarize(label, values))
        .collect()
}

/// Flattened summary row written by `--summary`.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    #[serde(flatten)]
    summary: &'a QuartileSummary,
    iqr: f64,
    whisker_low: f64,
    whisker_high: f64,
}

/// Serialize summaries, with derived IQR and whiskers, as pretty JSON.
pub fn summaries_to_json(
    summaries: &[QuartileSummary],
    whisker_factor: f64,
) -> serde_json::Result<String> {
    let rows: Vec<SummaryRow<'_>> = summaries
        .iter()
        .map(|summary| {
            let (whisker_low, whisker_high) = summary.whisker_with(whisker_factor);
            SummaryRow {
                summary,
                iqr: summary.iqr(),
                whisker_low,
                whisker_high,
            }
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use approx::assert_relative_eq;

    #[test]
    fn quantile_interpolates_between_neighbours() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&values, 0.5).unwrap(), 2.5);
        assert_relative_eq!(quantile(&values, 0.25).unwrap(), 1.75);
        assert_relative_eq!(quantile(&values, 0.75).unwrap(), 3.25);
        assert_relative_eq!(quantile(&values, 0.0).unwrap(), 1.0);
        assert_relative_eq!(quantile(&values, 1.0).unwrap(), 4.0);
    }

    #[test]
    fn quantile_of_single_value() {
        assert_eq!(quantile(&[7.0], 0.25), Ok(7.0));
    }

    #[test]
    fn quantile_rejects_empty_and_bad_probability() {
        assert_eq!(quantile(&[], 0.5), Err(StatsError::EmptyGroup(None)));
        assert_eq!(
            quantile(&[1.0], 1.5),
            Err(StatsError::InvalidProbability(1.5))
        );
        assert!(matches!(
            quantile(&[1.0], f64::NAN),
            Err(StatsError::InvalidProbability(_))
        ));
    }

    #[test]
    fn three_value_scenario() {
        let s = summarize("A", &[1.6, 1.4, 1.5]).unwrap();
        assert_relative_eq!(s.q1, 1.45, epsilon = 1e-12);
        assert_relative_eq!(s.median, 1.5, epsilon = 1e-12);
        assert_relative_eq!(s.q3, 1.55, epsilon = 1e-12);
        assert_relative_eq!(s.iqr(), 0.10, epsilon = 1e-12);
        let (lo, hi) = s.whisker();
        assert_relative_eq!(lo, 1.30, epsilon = 1e-12);
        assert_relative_eq!(hi, 1.70, epsilon = 1e-12);
    }

    #[test]
    fn whisker_is_exactly_one_and_a_half_iqr() {
        let s = QuartileSummary {
            label: "x".into(),
            count: 4,
            q1: 2.0,
            median: 3.0,
            q3: 6.0,
        };
        assert_eq!(s.whisker(), (2.0 - 6.0, 6.0 + 6.0));
    }

    #[test]
    fn empty_group_names_the_label() {
        let err = summarize("virginica", &[]).unwrap_err();
        assert_eq!(err, StatsError::EmptyGroup(Some("virginica".into())));
        assert!(err.to_string().contains("'virginica'"));
    }

    #[test]
    fn groups_follow_first_seen_order_and_are_ordered() {
        let ds = Dataset::from_records(vec![
            Record::new(5.0, 0.0, "b"),
            Record::new(1.0, 0.0, "a"),
            Record::new(3.0, 0.0, "b"),
            Record::new(4.0, 0.0, "b"),
            Record::new(2.0, 0.0, "a"),
        ]);
        let summaries = quartiles_by_label(&ds, Field::Length).unwrap();
        let labels: Vec<&str> = summaries.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);
        for s in &summaries {
            assert!(s.q1 <= s.median && s.median <= s.q3);
        }
        assert_eq!(summaries[0].count, 3);
        assert_relative_eq!(summaries[0].median, 4.0);
        assert_relative_eq!(summaries[1].median, 1.5);
    }

    #[test]
    fn summary_json_carries_derived_fields() {
        let s = summarize("A", &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let json = summaries_to_json(&[s], WHISKER_FACTOR).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["label"], "A");
        assert_eq!(value[0]["count"], 4);
        assert_eq!(value[0]["iqr"], 1.5);
        assert_eq!(value[0]["whisker_low"], 1.75 - 2.25);
    }
}
