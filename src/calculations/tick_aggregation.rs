use super::calendar_sweep::SweepSegment;
use super::event_ranges::EventRanges;
use crate::allocation::{AllocationRecord, AssignmentAllocationRecord};
use crate::snapshot::ProjectSnapshot;
use crate::tick::Tick;

/// Per-record accumulator for the duration-weighted utilization mean.
/// Carried alongside each record rather than as loop state so touching a new
/// record can never leak a previous record's sums.
#[derive(Debug, Clone, Default)]
struct RecordAccumulator {
    weighted_units_sum: f64,
    weights_sum: f64,
    first_contributor_units: Option<f64>,
}

/// Folds sweep segments into one allocation record per tick. Records for all
/// ticks exist up front, in ascending order, so the output has no gaps even
/// for ticks nothing contributes to.
pub(crate) struct TickAggregator<'a> {
    snapshot: &'a ProjectSnapshot,
    ranges: &'a EventRanges,
    records: Vec<AllocationRecord>,
    accumulators: Vec<RecordAccumulator>,
}

impl<'a> TickAggregator<'a> {
    pub fn new(snapshot: &'a ProjectSnapshot, ranges: &'a EventRanges, ticks: &[Tick]) -> Self {
        let records = ticks.iter().map(AllocationRecord::empty).collect();
        let accumulators = vec![RecordAccumulator::default(); ticks.len()];
        Self {
            snapshot,
            ranges,
            records,
            accumulators,
        }
    }

    pub fn consume(&mut self, segment: &SweepSegment) {
        let record = &mut self.records[segment.tick];
        let accumulator = &mut self.accumulators[segment.tick];
        let segment_secs = (segment.end - segment.start).num_seconds() as f64;

        if segment.resource_working {
            record.max_effort_secs += segment_secs;
        }

        let mut contributed = false;
        for &range_idx in &segment.active_ranges {
            let range = &self.ranges.ranges[range_idx];
            let event = &self.snapshot.events()[range.event_idx];

            // Allocation eligibility: the event's own calendar must be
            // working here, and either no surviving event ignores the
            // resource calendar, or this one does, or the resource calendar
            // is working here.
            let eligible = segment.event_calendar_working[range.calendar_slot]
                && (!self.ranges.any_ignores_resource_calendar
                    || event.ignore_resource_calendar
                    || segment.resource_working);
            if !eligible {
                continue;
            }

            let assignment = &self.snapshot.assignments()[range.assignment_idx];
            if accumulator.first_contributor_units.is_none() {
                accumulator.first_contributor_units = Some(assignment.units);
            }

            let overlap_start = segment.start.max(range.start);
            let overlap_end = segment.end.min(range.end);
            let overlap_secs = (overlap_end - overlap_start).num_seconds() as f64;
            if overlap_secs <= 0.0 {
                continue;
            }

            let effort = overlap_secs * assignment.units / 100.0;
            record.effort_secs += effort;
            accumulator.weighted_units_sum += overlap_secs * assignment.units;
            contributed = true;

            match record
                .assignments
                .iter_mut()
                .find(|breakdown| breakdown.assignment == assignment.id)
            {
                Some(breakdown) => breakdown.effort_secs += effort,
                None => record.assignments.push(AssignmentAllocationRecord {
                    assignment: assignment.id,
                    effort_secs: effort,
                    units: assignment.units,
                }),
            }
        }

        // The weight accrues once per sub-interval with contributions, so
        // overlapping assignments stack: two 60% assignments over the same
        // span average to 120, not 60.
        if contributed {
            accumulator.weights_sum += segment_secs;
        }
    }

    pub fn finish(mut self) -> Vec<AllocationRecord> {
        for (record, accumulator) in self.records.iter_mut().zip(&self.accumulators) {
            record.units = if accumulator.weights_sum > 0.0 {
                accumulator.weighted_units_sum / accumulator.weights_sum
            } else {
                accumulator.first_contributor_units.unwrap_or(0.0)
            };
        }
        self.records
    }
}
