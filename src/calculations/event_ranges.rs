use crate::snapshot::ProjectSnapshot;
use chrono::{Duration, NaiveDateTime, Timelike};

/// One occupancy range: a span of time during which an assignment's event
/// (or one of its segments) is scheduled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EventRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub assignment_idx: usize,
    pub event_idx: usize,
    /// Position of the event's calendar in [`EventRanges::event_calendars`].
    pub calendar_slot: usize,
}

pub(crate) struct EventRanges {
    pub ranges: Vec<EventRange>,
    /// Distinct calendar arena positions referenced by surviving events,
    /// in first-seen order.
    pub event_calendars: Vec<usize>,
    /// Whether any surviving event ignores the resource calendar; when none
    /// does, resource non-working time never needs to be walked.
    pub any_ignores_resource_calendar: bool,
}

pub(crate) struct EventRangeBuilder<'a> {
    snapshot: &'a ProjectSnapshot,
    resource_id: i32,
}

impl<'a> EventRangeBuilder<'a> {
    pub fn new(snapshot: &'a ProjectSnapshot, resource_id: i32) -> Self {
        Self {
            snapshot,
            resource_id,
        }
    }

    /// Flatten the resource's assignments into occupancy ranges. Assignments
    /// whose event is missing or unscheduled are skipped silently; segmented
    /// events emit one range per segment.
    pub fn execute(&self) -> EventRanges {
        let mut ranges = Vec::new();
        let mut event_calendars: Vec<usize> = Vec::new();
        let mut any_ignores = false;

        for (assignment_idx, assignment) in
            self.snapshot.assignments_for_resource(self.resource_id)
        {
            let Some(event_idx) = self.snapshot.event_position(assignment.event) else {
                continue;
            };
            let event = &self.snapshot.events()[event_idx];
            let (Some(start), Some(end)) = (event.start, event.end) else {
                continue;
            };
            let start = correct_boundary(start, false);
            let end = correct_boundary(end, true);
            if end <= start {
                continue;
            }
            let Some(calendar_position) = self.snapshot.calendar_position(event.calendar) else {
                continue;
            };

            let calendar_slot = match event_calendars
                .iter()
                .position(|&position| position == calendar_position)
            {
                Some(slot) => slot,
                None => {
                    event_calendars.push(calendar_position);
                    event_calendars.len() - 1
                }
            };

            if event.segments.is_empty() {
                ranges.push(EventRange {
                    start,
                    end,
                    assignment_idx,
                    event_idx,
                    calendar_slot,
                });
            } else {
                for segment in &event.segments {
                    if segment.end > segment.start {
                        ranges.push(EventRange {
                            start: segment.start,
                            end: segment.end,
                            assignment_idx,
                            event_idx,
                            calendar_slot,
                        });
                    }
                }
            }
            any_ignores |= event.ignore_resource_calendar;
        }

        EventRanges {
            ranges,
            event_calendars,
            any_ignores_resource_calendar: any_ignores,
        }
    }
}

/// 1:00 boundaries are daylight-saving artifacts of upstream date
/// resolution: starts shift back one hour, ends two.
fn correct_boundary(at: NaiveDateTime, is_end: bool) -> NaiveDateTime {
    if at.hour() == 1 {
        at - Duration::hours(if is_end { 2 } else { 1 })
    } else {
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn boundary_correction_only_touches_one_oclock() {
        assert_eq!(correct_boundary(dt(2, 1), false), dt(2, 0));
        assert_eq!(correct_boundary(dt(3, 1), true), dt(2, 23));
        assert_eq!(correct_boundary(dt(2, 8), false), dt(2, 8));
        assert_eq!(correct_boundary(dt(2, 16), true), dt(2, 16));
    }
}
