use super::event_ranges::{EventRange, EventRanges};
use crate::calendar::WorkCalendar;
use crate::tick::Tick;
use chrono::{Duration, NaiveDateTime};

/// One elementary sub-interval of the horizon: no calendar boundary, tick
/// edge or event-range edge falls strictly inside it.
#[derive(Debug, Clone)]
pub(crate) struct SweepSegment {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Index of the owning tick. Sub-intervals outside every tick are never
    /// emitted: they cannot belong to any allocation record.
    pub tick: usize,
    pub resource_working: bool,
    /// Working flags parallel to [`EventRanges::event_calendars`].
    pub event_calendar_working: Vec<bool>,
    /// Indices into the builder's range list of every range active here.
    pub active_ranges: Vec<usize>,
}

/// N-way boundary sweep over the tick calendar, the event-occupancy ranges,
/// the distinct event calendars and the resource calendar. Yields segments
/// lazily in ascending order, gap-free over the tick-covered horizon,
/// aligned to the finest boundary among all inputs.
pub(crate) struct CalendarSweep<'a> {
    ticks: &'a [Tick],
    ranges: &'a [EventRange],
    range_order: Vec<usize>,
    resource_intervals: Vec<(NaiveDateTime, NaiveDateTime)>,
    event_calendar_intervals: Vec<Vec<(NaiveDateTime, NaiveDateTime)>>,
    /// When false, sub-intervals where the resource calendar is not working
    /// are skipped entirely; no surviving event can contribute there.
    walk_resource_nonworking: bool,
    boundaries: Vec<NaiveDateTime>,
    boundary_pos: usize,
    tick_pos: usize,
    resource_pos: usize,
    event_calendar_pos: Vec<usize>,
    next_range: usize,
    active: Vec<usize>,
}

impl<'a> CalendarSweep<'a> {
    pub fn new(
        ticks: &'a [Tick],
        ranges: &'a EventRanges,
        resource_calendar: &WorkCalendar,
        event_calendars: &[&WorkCalendar],
        max_calendar_range_secs: i64,
    ) -> Self {
        let (horizon_start, horizon_end) = match (ticks.first(), ticks.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => {
                return Self::empty(ticks, &ranges.ranges);
            }
        };

        // The walk never extends past the configured maximum range; a longer
        // horizon raises that maximum to match rather than failing.
        let horizon_len = horizon_end - horizon_start;
        let effective_range = Duration::seconds(max_calendar_range_secs).max(horizon_len);
        let walk_end = horizon_end.min(horizon_start + effective_range);

        let resource_intervals = resource_calendar.intervals_in(horizon_start, walk_end);
        let event_calendar_intervals: Vec<_> = event_calendars
            .iter()
            .map(|calendar| calendar.intervals_in(horizon_start, walk_end))
            .collect();

        let mut boundaries = Vec::new();
        for tick in ticks {
            boundaries.push(tick.start);
            boundaries.push(tick.end);
        }
        for range in &ranges.ranges {
            boundaries.push(range.start);
            boundaries.push(range.end);
        }
        for (interval_start, interval_end) in resource_intervals
            .iter()
            .chain(event_calendar_intervals.iter().flatten())
        {
            boundaries.push(*interval_start);
            boundaries.push(*interval_end);
        }
        boundaries.retain(|boundary| *boundary >= horizon_start && *boundary <= walk_end);
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut range_order: Vec<usize> = (0..ranges.ranges.len()).collect();
        range_order.sort_by_key(|&idx| ranges.ranges[idx].start);

        let event_calendar_pos = vec![0; event_calendar_intervals.len()];
        Self {
            ticks,
            ranges: &ranges.ranges,
            range_order,
            resource_intervals,
            event_calendar_intervals,
            walk_resource_nonworking: ranges.any_ignores_resource_calendar,
            boundaries,
            boundary_pos: 0,
            tick_pos: 0,
            resource_pos: 0,
            event_calendar_pos,
            next_range: 0,
            active: Vec::new(),
        }
    }

    fn empty(ticks: &'a [Tick], ranges: &'a [EventRange]) -> Self {
        Self {
            ticks,
            ranges,
            range_order: Vec::new(),
            resource_intervals: Vec::new(),
            event_calendar_intervals: Vec::new(),
            walk_resource_nonworking: false,
            boundaries: Vec::new(),
            boundary_pos: 0,
            tick_pos: 0,
            resource_pos: 0,
            event_calendar_pos: Vec::new(),
            next_range: 0,
            active: Vec::new(),
        }
    }
}

impl Iterator for CalendarSweep<'_> {
    type Item = SweepSegment;

    fn next(&mut self) -> Option<SweepSegment> {
        loop {
            if self.boundary_pos + 1 >= self.boundaries.len() {
                return None;
            }
            let start = self.boundaries[self.boundary_pos];
            let end = self.boundaries[self.boundary_pos + 1];
            self.boundary_pos += 1;

            while self.tick_pos < self.ticks.len() && self.ticks[self.tick_pos].end <= start {
                self.tick_pos += 1;
            }
            let tick = match self.ticks.get(self.tick_pos) {
                Some(tick) if tick.start <= start => tick.index,
                _ => continue,
            };

            self.active.retain(|&idx| self.ranges[idx].end > start);
            while self.next_range < self.range_order.len() {
                let idx = self.range_order[self.next_range];
                if self.ranges[idx].start > start {
                    break;
                }
                if self.ranges[idx].end > start {
                    self.active.push(idx);
                }
                self.next_range += 1;
            }

            let resource_working =
                cursor_contains(&self.resource_intervals, &mut self.resource_pos, start);
            if !resource_working && !self.walk_resource_nonworking {
                continue;
            }

            let mut event_calendar_working =
                Vec::with_capacity(self.event_calendar_intervals.len());
            for (slot, intervals) in self.event_calendar_intervals.iter().enumerate() {
                event_calendar_working.push(cursor_contains(
                    intervals,
                    &mut self.event_calendar_pos[slot],
                    start,
                ));
            }

            return Some(SweepSegment {
                start,
                end,
                tick,
                resource_working,
                event_calendar_working,
                active_ranges: self.active.clone(),
            });
        }
    }
}

/// Advances the cursor past intervals ending at or before `at`, then reports
/// whether the interval under the cursor covers `at`. Only valid for
/// ascending `at` across calls with the same cursor.
fn cursor_contains(
    intervals: &[(NaiveDateTime, NaiveDateTime)],
    pos: &mut usize,
    at: NaiveDateTime,
) -> bool {
    while *pos < intervals.len() && intervals[*pos].1 <= at {
        *pos += 1;
    }
    match intervals.get(*pos) {
        Some(&(interval_start, _)) => interval_start <= at,
        None => false,
    }
}
