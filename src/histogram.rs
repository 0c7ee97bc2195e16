use crate::allocation::AllocationRecord;
use crate::event::datetime_to_millis;
use chrono::NaiveDateTime;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Flat, renderer-facing view of one allocation record. Assignment ids are
/// carried as a `;`-joined string so the row stays a plain record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramRow {
    pub tick_index: usize,
    pub tick_start: NaiveDateTime,
    pub tick_end: NaiveDateTime,
    pub effort_secs: f64,
    pub max_effort_secs: f64,
    pub units: f64,
    pub is_overallocated: bool,
    pub is_underallocated: bool,
    pub assignments: String,
}

impl From<&AllocationRecord> for HistogramRow {
    fn from(record: &AllocationRecord) -> Self {
        let assignments = record
            .assignment_ids()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";");
        Self {
            tick_index: record.tick_index,
            tick_start: record.tick_start,
            tick_end: record.tick_end,
            effort_secs: record.effort_secs,
            max_effort_secs: record.max_effort_secs,
            units: record.units,
            is_overallocated: record.is_overallocated,
            is_underallocated: record.is_underallocated,
            assignments,
        }
    }
}

/// Builds a DataFrame with one row per tick for downstream rendering or
/// analysis. Assignment ids become a list column.
pub fn histogram_to_dataframe(records: &[AllocationRecord]) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(9);

    let tick_index: Vec<i64> = records.iter().map(|record| record.tick_index as i64).collect();
    columns.push(Series::new(PlSmallStr::from_static("tick_index"), tick_index).into_column());

    let tick_start: Vec<i64> = records
        .iter()
        .map(|record| datetime_to_millis(record.tick_start))
        .collect();
    columns.push(
        Series::new(PlSmallStr::from_static("tick_start"), tick_start)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
            .into_column(),
    );

    let tick_end: Vec<i64> = records
        .iter()
        .map(|record| datetime_to_millis(record.tick_end))
        .collect();
    columns.push(
        Series::new(PlSmallStr::from_static("tick_end"), tick_end)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
            .into_column(),
    );

    let effort: Vec<f64> = records.iter().map(|record| record.effort_secs).collect();
    columns.push(Series::new(PlSmallStr::from_static("effort_secs"), effort).into_column());

    let max_effort: Vec<f64> = records
        .iter()
        .map(|record| record.max_effort_secs)
        .collect();
    columns.push(Series::new(PlSmallStr::from_static("max_effort_secs"), max_effort).into_column());

    let units: Vec<f64> = records.iter().map(|record| record.units).collect();
    columns.push(Series::new(PlSmallStr::from_static("units"), units).into_column());

    let overallocated: Vec<bool> = records
        .iter()
        .map(|record| record.is_overallocated)
        .collect();
    columns.push(
        Series::new(PlSmallStr::from_static("is_overallocated"), overallocated).into_column(),
    );

    let underallocated: Vec<bool> = records
        .iter()
        .map(|record| record.is_underallocated)
        .collect();
    columns.push(
        Series::new(PlSmallStr::from_static("is_underallocated"), underallocated).into_column(),
    );

    let assignment_rows: Vec<Series> = records
        .iter()
        .map(|record| Series::new(PlSmallStr::from_static(""), record.assignment_ids()))
        .collect();
    let list_chunked: ListChunked = assignment_rows.into_iter().collect();
    columns.push(
        list_chunked
            .into_series()
            .with_name(PlSmallStr::from_static("assignments"))
            .into_column(),
    );

    DataFrame::new(columns)
}
