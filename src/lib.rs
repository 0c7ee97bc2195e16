pub mod allocation;
pub mod assignment;
pub mod calendar;
pub(crate) mod calculations;
pub mod event;
pub mod histogram;
pub(crate) mod input_validation;
pub mod persistence;
pub mod resource;
pub mod snapshot;
pub mod tick;

pub use allocation::{
    AllocationEngine, AllocationRecord, AssignmentAllocationRecord, Generation,
    compute_all_resources, compute_resource_allocation,
};
pub use assignment::Assignment;
pub use calendar::{CalendarId, DayShifts, Shift, WorkCalendar, WorkCalendarConfig};
pub use event::{Event, EventSegment};
pub use histogram::{HistogramRow, histogram_to_dataframe};
pub use persistence::{
    PersistenceError, load_snapshot_from_json, save_histogram_to_csv, save_histogram_to_json,
    save_snapshot_to_json,
};
pub use resource::{DEFAULT_MAX_CALENDAR_RANGE_SECS, Resource};
pub use snapshot::{ProjectSnapshot, SnapshotBuilder, SnapshotValidationError};
pub use tick::{Tick, TickCalendar, TickUnit};
