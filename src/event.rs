use crate::calendar::CalendarId;
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One piece of a split event, with its own resolved bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventSegment {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A scheduled piece of work. `start`/`end` of `None` means the event is not
/// scheduled; such events never count toward allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<EventSegment>,
    #[serde(default)]
    pub ignore_resource_calendar: bool,
    pub calendar: CalendarId,
}

impl Event {
    pub fn new(id: i32, name: impl Into<String>, calendar: CalendarId) -> Self {
        Self {
            id,
            name: name.into(),
            start: None,
            end: None,
            segments: Vec::new(),
            ignore_resource_calendar: false,
            calendar,
        }
    }

    pub fn scheduled(
        id: i32,
        name: impl Into<String>,
        calendar: CalendarId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        let mut event = Self::new(id, name, calendar);
        event.start = Some(start);
        event.end = Some(end);
        event
    }

    pub fn is_scheduled(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn to_dataframe_row(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(7);

        let id_data: [i32; 1] = [self.id];
        columns.push(Series::new(PlSmallStr::from_static("id"), id_data).into_column());

        let name_data: [&str; 1] = [self.name.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("name"), name_data).into_column());

        columns.push(series_from_datetime("start", self.start)?.into_column());
        columns.push(series_from_datetime("end", self.end)?.into_column());

        let segments_json = serde_json::to_string(&self.segments)
            .map_err(|err| PolarsError::ComputeError(err.to_string().into()))?;
        let segments_data: [&str; 1] = [segments_json.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("segments"), segments_data).into_column());

        let ignore_data: [bool; 1] = [self.ignore_resource_calendar];
        columns.push(
            Series::new(PlSmallStr::from_static("ignore_resource_calendar"), ignore_data)
                .into_column(),
        );

        let calendar_data: [i32; 1] = [self.calendar];
        columns.push(Series::new(PlSmallStr::from_static("calendar"), calendar_data).into_column());

        DataFrame::new(columns)
    }

    pub fn from_dataframe_row(df: &DataFrame, row_idx: usize) -> PolarsResult<Self> {
        let id = df
            .column("id")?
            .i32()?
            .get(row_idx)
            .ok_or_else(|| PolarsError::ComputeError("event row missing id".into()))?;

        let name = df
            .column("name")?
            .str()?
            .get(row_idx)
            .unwrap_or("")
            .to_string();

        let calendar = df.column("calendar")?.i32()?.get(row_idx).unwrap_or(0);

        let segments = match df.column("segments")?.str()?.get(row_idx) {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<Vec<EventSegment>>(raw)
                .map_err(|err| PolarsError::ComputeError(err.to_string().into()))?,
            _ => Vec::new(),
        };

        Ok(Self {
            id,
            name,
            start: datetime_from_chunk(df.column("start")?.datetime()?, row_idx),
            end: datetime_from_chunk(df.column("end")?.datetime()?, row_idx),
            segments,
            ignore_resource_calendar: df
                .column("ignore_resource_calendar")?
                .bool()?
                .get(row_idx)
                .unwrap_or(false),
            calendar,
        })
    }
}

pub(crate) fn series_from_datetime(
    name: &str,
    value: Option<NaiveDateTime>,
) -> PolarsResult<Series> {
    let data: [Option<i64>; 1] = [value.map(datetime_to_millis)];
    Series::new(name.into(), data).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
}

pub(crate) fn datetime_from_chunk(chunked: &DatetimeChunked, idx: usize) -> Option<NaiveDateTime> {
    chunked.get(idx).and_then(datetime_from_millis)
}

pub(crate) fn datetime_to_millis(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}

pub(crate) fn datetime_from_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|value| value.naive_utc())
}
