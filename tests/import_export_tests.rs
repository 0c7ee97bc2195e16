use chrono::{NaiveDate, NaiveDateTime};
use resource_histogram::{
    Assignment, Event, EventSegment, ProjectSnapshot, Resource, TickCalendar, TickUnit,
    WorkCalendar, compute_resource_allocation, histogram_to_dataframe, load_snapshot_from_json,
    save_histogram_to_csv, save_histogram_to_json, save_snapshot_to_json,
};

fn dt(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn sample_snapshot() -> ProjectSnapshot {
    let mut split = Event::scheduled(11, "Split job", 1, dt(3, 8), dt(5, 16));
    split.segments = vec![
        EventSegment {
            start: dt(3, 8),
            end: dt(3, 12),
        },
        EventSegment {
            start: dt(5, 8),
            end: dt(5, 12),
        },
    ];
    let mut standby = Event::scheduled(12, "Standby", 2, dt(7, 8), dt(7, 16));
    standby.ignore_resource_calendar = true;

    let mut builder = ProjectSnapshot::builder();
    builder
        .add_calendar(1, WorkCalendar::standard())
        .add_calendar(2, WorkCalendar::around_the_clock())
        .add_resource(Resource::new(1, "Crew", 1))
        .add_event(Event::scheduled(10, "Survey", 1, dt(2, 8), dt(2, 16)))
        .add_event(split)
        .add_event(standby)
        .add_event(Event::new(13, "Backlog item", 1))
        .add_assignment(Assignment::new(100, 10, 1, 50.0))
        .add_assignment(Assignment::new(101, 11, 1, 100.0))
        .add_assignment(Assignment::new(102, 12, 1, 100.0));
    builder.build().unwrap()
}

fn week() -> TickCalendar {
    TickCalendar::new(dt(2, 0), dt(9, 0), TickUnit::Day)
}

#[test]
fn snapshot_json_round_trip_preserves_the_computation() {
    let snapshot = sample_snapshot();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    save_snapshot_to_json(&snapshot, &path).unwrap();
    let loaded = load_snapshot_from_json(&path).unwrap();

    assert_eq!(loaded.resources(), snapshot.resources());
    assert_eq!(loaded.events(), snapshot.events());
    assert_eq!(loaded.assignments(), snapshot.assignments());
    assert_eq!(
        compute_resource_allocation(&loaded, 1, &week()),
        compute_resource_allocation(&snapshot, 1, &week())
    );
}

#[test]
fn histogram_json_round_trips() {
    let snapshot = sample_snapshot();
    let records = compute_resource_allocation(&snapshot, 1, &week());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("histogram.json");

    save_histogram_to_json(&records, &path).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    let reloaded: Vec<resource_histogram::AllocationRecord> =
        serde_json::from_str(&raw).unwrap();
    assert_eq!(reloaded, records);
}

#[test]
fn histogram_csv_writes_one_row_per_tick() {
    let snapshot = sample_snapshot();
    let records = compute_resource_allocation(&snapshot, 1, &week());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("histogram.csv");

    save_histogram_to_csv(&records, &path).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), records.len() + 1);
    assert!(lines[0].starts_with("tick_index,"));
    // The Monday row carries the survey assignment id.
    assert!(lines[1].contains("100"));
}

#[test]
fn histogram_dataframe_has_expected_shape() {
    let snapshot = sample_snapshot();
    let records = compute_resource_allocation(&snapshot, 1, &week());
    let df = histogram_to_dataframe(&records).unwrap();

    assert_eq!(df.height(), records.len());
    for name in [
        "tick_index",
        "tick_start",
        "tick_end",
        "effort_secs",
        "max_effort_secs",
        "units",
        "is_overallocated",
        "is_underallocated",
        "assignments",
    ] {
        assert!(df.column(name).is_ok(), "missing column {name}");
    }

    let effort = df.column("effort_secs").unwrap().f64().unwrap();
    assert_eq!(effort.get(0), Some(records[0].effort_secs));
}

#[test]
fn event_dataframe_rows_round_trip() {
    let snapshot = sample_snapshot();
    let mut df = snapshot.events()[0].to_dataframe_row().unwrap();
    for event in &snapshot.events()[1..] {
        df = df.vstack(&event.to_dataframe_row().unwrap()).unwrap();
    }

    for (row_idx, event) in snapshot.events().iter().enumerate() {
        let parsed = Event::from_dataframe_row(&df, row_idx).unwrap();
        assert_eq!(&parsed, event);
    }
}

#[test]
fn snapshot_built_from_dataframes_matches_direct_construction() {
    let direct = sample_snapshot();

    let mut events_df = direct.events()[0].to_dataframe_row().unwrap();
    for event in &direct.events()[1..] {
        events_df = events_df.vstack(&event.to_dataframe_row().unwrap()).unwrap();
    }
    let mut assignments_df = direct.assignments()[0].to_dataframe_row().unwrap();
    for assignment in &direct.assignments()[1..] {
        assignments_df = assignments_df
            .vstack(&assignment.to_dataframe_row().unwrap())
            .unwrap();
    }

    let mut builder = ProjectSnapshot::builder();
    builder
        .add_calendar(1, WorkCalendar::standard())
        .add_calendar(2, WorkCalendar::around_the_clock())
        .add_resource(Resource::new(1, "Crew", 1));
    builder.add_events_from_dataframe(&events_df).unwrap();
    builder
        .add_assignments_from_dataframe(&assignments_df)
        .unwrap();
    let imported = builder.build().unwrap();

    assert_eq!(imported.events(), direct.events());
    assert_eq!(imported.assignments(), direct.assignments());
    assert_eq!(
        compute_resource_allocation(&imported, 1, &week()),
        compute_resource_allocation(&direct, 1, &week())
    );
}
