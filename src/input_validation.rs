use crate::assignment::Assignment;
use crate::calendar::{CalendarId, WorkCalendar};
use crate::event::Event;
use crate::resource::Resource;
use crate::snapshot::SnapshotValidationError;
use std::collections::HashSet;

fn calendar_exists(calendars: &[(CalendarId, WorkCalendar)], id: CalendarId) -> bool {
    calendars.iter().any(|(calendar_id, _)| *calendar_id == id)
}

pub(crate) fn validate_calendars(
    calendars: &[(CalendarId, WorkCalendar)],
) -> Result<(), SnapshotValidationError> {
    let mut seen_ids = HashSet::with_capacity(calendars.len());
    for (id, _) in calendars {
        if !seen_ids.insert(*id) {
            return Err(SnapshotValidationError::new(format!(
                "duplicate calendar id {id}"
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_resources(
    resources: &[Resource],
    calendars: &[(CalendarId, WorkCalendar)],
) -> Result<(), SnapshotValidationError> {
    let mut seen_ids = HashSet::with_capacity(resources.len());
    for resource in resources {
        if !seen_ids.insert(resource.id) {
            return Err(SnapshotValidationError::new(format!(
                "duplicate resource id {}",
                resource.id
            )));
        }
        if !calendar_exists(calendars, resource.calendar) {
            return Err(SnapshotValidationError::new(format!(
                "resource {} references unknown calendar {}",
                resource.id, resource.calendar
            )));
        }
        if resource.max_calendar_range_secs <= 0 {
            return Err(SnapshotValidationError::new(format!(
                "resource {} has non-positive max_calendar_range_secs {}",
                resource.id, resource.max_calendar_range_secs
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_events(
    events: &[Event],
    calendars: &[(CalendarId, WorkCalendar)],
) -> Result<(), SnapshotValidationError> {
    let mut seen_ids = HashSet::with_capacity(events.len());
    for event in events {
        if !seen_ids.insert(event.id) {
            return Err(SnapshotValidationError::new(format!(
                "duplicate event id {}",
                event.id
            )));
        }
        if !calendar_exists(calendars, event.calendar) {
            return Err(SnapshotValidationError::new(format!(
                "event {} references unknown calendar {}",
                event.id, event.calendar
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_assignments(
    assignments: &[Assignment],
) -> Result<(), SnapshotValidationError> {
    let mut seen_ids = HashSet::with_capacity(assignments.len());
    for assignment in assignments {
        if !seen_ids.insert(assignment.id) {
            return Err(SnapshotValidationError::new(format!(
                "duplicate assignment id {}",
                assignment.id
            )));
        }
        if !assignment.units.is_finite() || assignment.units < 0.0 {
            return Err(SnapshotValidationError::new(format!(
                "assignment {} has invalid units {}",
                assignment.id, assignment.units
            )));
        }
    }
    Ok(())
}
