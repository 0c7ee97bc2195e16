use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Links one resource to one event. `units` is the percentage of the
/// resource's capacity this assignment consumes while active; values above
/// 100 represent over-assignment and are legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i32,
    pub event: i32,
    pub resource: i32,
    pub units: f64,
}

impl Assignment {
    pub fn new(id: i32, event: i32, resource: i32, units: f64) -> Self {
        Self {
            id,
            event,
            resource,
            units,
        }
    }

    pub fn full_time(id: i32, event: i32, resource: i32) -> Self {
        Self::new(id, event, resource, 100.0)
    }

    pub fn to_dataframe_row(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(4);

        let id_data: [i32; 1] = [self.id];
        columns.push(Series::new(PlSmallStr::from_static("id"), id_data).into_column());

        let event_data: [i32; 1] = [self.event];
        columns.push(Series::new(PlSmallStr::from_static("event"), event_data).into_column());

        let resource_data: [i32; 1] = [self.resource];
        columns.push(Series::new(PlSmallStr::from_static("resource"), resource_data).into_column());

        let units_data: [f64; 1] = [self.units];
        columns.push(Series::new(PlSmallStr::from_static("units"), units_data).into_column());

        DataFrame::new(columns)
    }

    pub fn from_dataframe_row(df: &DataFrame, row_idx: usize) -> PolarsResult<Self> {
        let id = df
            .column("id")?
            .i32()?
            .get(row_idx)
            .ok_or_else(|| PolarsError::ComputeError("assignment row missing id".into()))?;

        Ok(Self {
            id,
            event: df.column("event")?.i32()?.get(row_idx).unwrap_or(0),
            resource: df.column("resource")?.i32()?.get(row_idx).unwrap_or(0),
            units: df.column("units")?.f64()?.get(row_idx).unwrap_or(0.0),
        })
    }
}
