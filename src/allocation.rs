use crate::calculations::calendar_sweep::CalendarSweep;
use crate::calculations::classification;
use crate::calculations::event_ranges::EventRangeBuilder;
use crate::calculations::tick_aggregation::TickAggregator;
use crate::calendar::WorkCalendar;
use crate::snapshot::ProjectSnapshot;
use crate::tick::{Tick, TickCalendar};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Allocation of a single assignment within a single tick. Only reachable
/// through its owning [`AllocationRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentAllocationRecord {
    pub assignment: i32,
    pub effort_secs: f64,
    pub units: f64,
}

/// Allocation of one resource within one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub tick_index: usize,
    pub tick_start: NaiveDateTime,
    pub tick_end: NaiveDateTime,
    /// Assigned working seconds within the tick.
    pub effort_secs: f64,
    /// Resource-calendar working seconds within the tick.
    pub max_effort_secs: f64,
    /// Duration-weighted utilization percentage.
    pub units: f64,
    /// Per-assignment breakdown, in first-contribution order.
    pub assignments: Vec<AssignmentAllocationRecord>,
    pub is_overallocated: bool,
    pub is_underallocated: bool,
}

impl AllocationRecord {
    pub(crate) fn empty(tick: &Tick) -> Self {
        Self {
            tick_index: tick.index,
            tick_start: tick.start,
            tick_end: tick.end,
            effort_secs: 0.0,
            max_effort_secs: 0.0,
            units: 0.0,
            assignments: Vec::new(),
            is_overallocated: false,
            is_underallocated: false,
        }
    }

    pub fn assignment_ids(&self) -> Vec<i32> {
        self.assignments
            .iter()
            .map(|breakdown| breakdown.assignment)
            .collect()
    }

    pub fn effort_hours(&self) -> f64 {
        self.effort_secs / 3600.0
    }

    pub fn max_effort_hours(&self) -> f64 {
        self.max_effort_secs / 3600.0
    }
}

/// Computes the allocation histogram for one resource: one record per tick,
/// ascending, classified. Pure and synchronous over the snapshot; unknown
/// resources (or resources with an unresolvable calendar) yield no records.
pub fn compute_resource_allocation(
    snapshot: &ProjectSnapshot,
    resource_id: i32,
    tick_calendar: &TickCalendar,
) -> Vec<AllocationRecord> {
    let Some(resource) = snapshot.resource(resource_id) else {
        return Vec::new();
    };
    let Some(resource_calendar) = snapshot.calendar(resource.calendar) else {
        return Vec::new();
    };

    let ticks = tick_calendar.ticks();
    let ranges = EventRangeBuilder::new(snapshot, resource_id).execute();
    let event_calendars: Vec<&WorkCalendar> = ranges
        .event_calendars
        .iter()
        .map(|&position| snapshot.calendar_at(position))
        .collect();

    let sweep = CalendarSweep::new(
        &ticks,
        &ranges,
        resource_calendar,
        &event_calendars,
        resource.max_calendar_range_secs,
    );
    let mut aggregator = TickAggregator::new(snapshot, &ranges, &ticks);
    for segment in sweep {
        aggregator.consume(&segment);
    }
    let mut records = aggregator.finish();
    classification::classify(&mut records);
    records
}

/// Computes every resource's histogram, fanning out across resources.
/// Results come back in snapshot resource order as `(resource_id, records)`.
pub fn compute_all_resources(
    snapshot: &ProjectSnapshot,
    tick_calendar: &TickCalendar,
) -> Vec<(i32, Vec<AllocationRecord>)> {
    snapshot
        .resources()
        .par_iter()
        .map(|resource| {
            (
                resource.id,
                compute_resource_allocation(snapshot, resource.id, tick_calendar),
            )
        })
        .collect()
}

/// Token for one allocation request; a newer request for the same resource
/// supersedes every earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    resource: i32,
    value: u64,
}

impl Generation {
    pub fn resource(&self) -> i32 {
        self.resource
    }
}

/// Serializes allocation requests per resource. The underlying data model
/// offers no cancellation, so recomputation races are resolved here: results
/// whose generation went stale while computing are discarded.
#[derive(Debug, Default)]
pub struct AllocationEngine {
    generations: Mutex<HashMap<i32, u64>>,
}

impl AllocationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request for the resource, invalidating in-flight ones.
    pub fn begin(&self, resource_id: i32) -> Generation {
        let mut generations = self.generations.lock();
        let counter = generations.entry(resource_id).or_insert(0);
        *counter += 1;
        Generation {
            resource: resource_id,
            value: *counter,
        }
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generations
            .lock()
            .get(&generation.resource)
            .is_some_and(|counter| *counter == generation.value)
    }

    /// Runs the computation for a previously registered request. Returns
    /// `None` when a newer request for the same resource superseded it.
    pub fn compute(
        &self,
        snapshot: &ProjectSnapshot,
        generation: Generation,
        tick_calendar: &TickCalendar,
    ) -> Option<Vec<AllocationRecord>> {
        debug!(resource = generation.resource, "allocation started");
        let records = compute_resource_allocation(snapshot, generation.resource, tick_calendar);
        if !self.is_current(generation) {
            debug!(
                resource = generation.resource,
                "allocation superseded, discarding result"
            );
            return None;
        }
        debug!(
            resource = generation.resource,
            ticks = records.len(),
            "allocation finished"
        );
        Some(records)
    }
}
