use std::collections::BTreeMap;

use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate};

use crate::schema::Chart;

/// The series a chart actually renders: ordered normalized values plus the
/// row the first one lands in.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub values: Vec<f32>,
    pub row_start: u32,
}

/// Turns a chart's configured data into a renderable series.
///
/// Raw `values` pass through untouched with the configured `row_start`.
/// A `contributions` calendar is normalized by its maximum count (date
/// order), and `row_start` becomes the earliest date's weekday so the first
/// column lines up with the week.
pub fn resolve_series(chart: &Chart) -> Result<ChartSeries> {
    match (&chart.values, &chart.contributions) {
        (Some(values), None) => Ok(ChartSeries {
            values: values.clone(),
            row_start: chart.row_start,
        }),
        (None, Some(contributions)) => {
            let Some(earliest) = contributions.keys().next() else {
                bail!("contributions are empty");
            };
            Ok(ChartSeries {
                values: normalized_values(contributions),
                row_start: weekday_row(*earliest),
            })
        }
        _ => bail!("chart must set exactly one of values or contributions"),
    }
}

/// Per-day counts scaled into `[0, 1]` by the series maximum, in date order.
/// An all-zero calendar stays all-zero.
pub fn normalized_values(contributions: &BTreeMap<NaiveDate, u64>) -> Vec<f32> {
    let max = contributions.values().copied().max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; contributions.len()];
    }
    contributions
        .values()
        .map(|count| *count as f32 / max as f32)
        .collect()
}

/// Weekday as a row index, Sunday first. Always below 7, so it is a valid
/// `row_start` for a weekly layout.
pub fn weekday_row(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}
