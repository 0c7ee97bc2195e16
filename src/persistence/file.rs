use super::{PersistenceError, PersistenceResult};
use crate::allocation::AllocationRecord;
use crate::assignment::Assignment;
use crate::calendar::{CalendarId, WorkCalendar, WorkCalendarConfig};
use crate::event::Event;
use crate::histogram::HistogramRow;
use crate::resource::Resource;
use crate::snapshot::ProjectSnapshot;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct CalendarEntry {
    id: CalendarId,
    config: WorkCalendarConfig,
}

#[derive(Serialize, Deserialize)]
struct ProjectSnapshotFile {
    calendars: Vec<CalendarEntry>,
    resources: Vec<Resource>,
    events: Vec<Event>,
    assignments: Vec<Assignment>,
}

impl ProjectSnapshotFile {
    fn from_snapshot(snapshot: &ProjectSnapshot) -> Self {
        Self {
            calendars: snapshot
                .calendars()
                .iter()
                .map(|(id, calendar)| CalendarEntry {
                    id: *id,
                    config: calendar.to_config(),
                })
                .collect(),
            resources: snapshot.resources().to_vec(),
            events: snapshot.events().to_vec(),
            assignments: snapshot.assignments().to_vec(),
        }
    }

    fn into_snapshot(self) -> PersistenceResult<ProjectSnapshot> {
        let mut builder = ProjectSnapshot::builder();
        for entry in self.calendars {
            builder.add_calendar(entry.id, WorkCalendar::from_config(&entry.config));
        }
        for resource in self.resources {
            builder.add_resource(resource);
        }
        for event in self.events {
            builder.add_event(event);
        }
        for assignment in self.assignments {
            builder.add_assignment(assignment);
        }
        builder
            .build()
            .map_err(|err| PersistenceError::InvalidData(err.to_string()))
    }
}

pub fn save_snapshot_to_json<P: AsRef<Path>>(
    snapshot: &ProjectSnapshot,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &ProjectSnapshotFile::from_snapshot(snapshot))?;
    Ok(())
}

pub fn load_snapshot_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<ProjectSnapshot> {
    let file = File::open(path)?;
    let snapshot_file: ProjectSnapshotFile = serde_json::from_reader(file)?;
    snapshot_file.into_snapshot()
}

pub fn save_histogram_to_json<P: AsRef<Path>>(
    records: &[AllocationRecord],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}

pub fn save_histogram_to_csv<P: AsRef<Path>>(
    records: &[AllocationRecord],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.serialize(HistogramRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}
