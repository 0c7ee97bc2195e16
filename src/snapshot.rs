use crate::assignment::Assignment;
use crate::calendar::{CalendarId, WorkCalendar};
use crate::event::Event;
use crate::input_validation;
use crate::resource::Resource;
use polars::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// Rejected snapshot input. Reference problems (an assignment pointing at a
/// missing event) are not build errors; those assignments are excluded at
/// compute time instead.
#[derive(Debug, Clone)]
pub struct SnapshotValidationError {
    message: String,
}

impl SnapshotValidationError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for SnapshotValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SnapshotValidationError {}

/// Read-only snapshot of the scheduling data model, materialized up front so
/// the allocation computation itself runs as a pure function over consistent
/// data. All cross-references resolve through id -> index tables.
#[derive(Debug)]
pub struct ProjectSnapshot {
    resources: Vec<Resource>,
    events: Vec<Event>,
    assignments: Vec<Assignment>,
    calendars: Vec<(CalendarId, WorkCalendar)>,
    resource_index: HashMap<i32, usize>,
    event_index: HashMap<i32, usize>,
    calendar_index: HashMap<CalendarId, usize>,
}

impl ProjectSnapshot {
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn calendars(&self) -> &[(CalendarId, WorkCalendar)] {
        &self.calendars
    }

    pub fn resource(&self, id: i32) -> Option<&Resource> {
        self.resource_index.get(&id).map(|&idx| &self.resources[idx])
    }

    pub fn event(&self, id: i32) -> Option<&Event> {
        self.event_index.get(&id).map(|&idx| &self.events[idx])
    }

    pub fn calendar(&self, id: CalendarId) -> Option<&WorkCalendar> {
        self.calendar_index
            .get(&id)
            .map(|&idx| &self.calendars[idx].1)
    }

    pub(crate) fn event_position(&self, id: i32) -> Option<usize> {
        self.event_index.get(&id).copied()
    }

    pub(crate) fn calendar_position(&self, id: CalendarId) -> Option<usize> {
        self.calendar_index.get(&id).copied()
    }

    pub(crate) fn calendar_at(&self, position: usize) -> &WorkCalendar {
        &self.calendars[position].1
    }

    /// Assignments belonging to a resource, with their arena positions.
    pub(crate) fn assignments_for_resource(
        &self,
        resource_id: i32,
    ) -> impl Iterator<Item = (usize, &Assignment)> {
        self.assignments
            .iter()
            .enumerate()
            .filter(move |(_, assignment)| assignment.resource == resource_id)
    }
}

#[derive(Default)]
pub struct SnapshotBuilder {
    resources: Vec<Resource>,
    events: Vec<Event>,
    assignments: Vec<Assignment>,
    calendars: Vec<(CalendarId, WorkCalendar)>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_calendar(&mut self, id: CalendarId, calendar: WorkCalendar) -> &mut Self {
        self.calendars.push((id, calendar));
        self
    }

    pub fn add_resource(&mut self, resource: Resource) -> &mut Self {
        self.resources.push(resource);
        self
    }

    pub fn add_event(&mut self, event: Event) -> &mut Self {
        self.events.push(event);
        self
    }

    pub fn add_assignment(&mut self, assignment: Assignment) -> &mut Self {
        self.assignments.push(assignment);
        self
    }

    /// Append one event per row of `df` (the schema produced by
    /// [`Event::to_dataframe_row`]).
    pub fn add_events_from_dataframe(&mut self, df: &DataFrame) -> PolarsResult<&mut Self> {
        for row_idx in 0..df.height() {
            self.events.push(Event::from_dataframe_row(df, row_idx)?);
        }
        Ok(self)
    }

    /// Append one assignment per row of `df` (the schema produced by
    /// [`Assignment::to_dataframe_row`]).
    pub fn add_assignments_from_dataframe(&mut self, df: &DataFrame) -> PolarsResult<&mut Self> {
        for row_idx in 0..df.height() {
            self.assignments
                .push(Assignment::from_dataframe_row(df, row_idx)?);
        }
        Ok(self)
    }

    pub fn build(self) -> Result<ProjectSnapshot, SnapshotValidationError> {
        input_validation::validate_calendars(&self.calendars)?;
        input_validation::validate_resources(&self.resources, &self.calendars)?;
        input_validation::validate_events(&self.events, &self.calendars)?;
        input_validation::validate_assignments(&self.assignments)?;

        let resource_index = self
            .resources
            .iter()
            .enumerate()
            .map(|(idx, resource)| (resource.id, idx))
            .collect();
        let event_index = self
            .events
            .iter()
            .enumerate()
            .map(|(idx, event)| (event.id, idx))
            .collect();
        let calendar_index = self
            .calendars
            .iter()
            .enumerate()
            .map(|(idx, (id, _))| (*id, idx))
            .collect();

        Ok(ProjectSnapshot {
            resources: self.resources,
            events: self.events,
            assignments: self.assignments,
            calendars: self.calendars,
            resource_index,
            event_index,
            calendar_index,
        })
    }
}
