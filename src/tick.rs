use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Bucket granularity of the output histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickUnit {
    Hour,
    Day,
    Week,
}

impl TickUnit {
    fn step(self) -> Duration {
        match self {
            TickUnit::Hour => Duration::hours(1),
            TickUnit::Day => Duration::days(1),
            TickUnit::Week => Duration::weeks(1),
        }
    }
}

/// Caller-defined bucket calendar: covers `[start, end)` with consecutive
/// ticks of the chosen unit, the last one clipped to the horizon end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCalendar {
    start: NaiveDateTime,
    end: NaiveDateTime,
    unit: TickUnit,
}

/// One output bucket. Ticks are half-open `[start, end)`, ascending,
/// gap-free and non-overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub index: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Tick {
    pub fn duration_secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

impl TickCalendar {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, unit: TickUnit) -> Self {
        if start >= end {
            panic!("TickCalendar requires start before end, got {start}..{end}");
        }
        Self { start, end, unit }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn unit(&self) -> TickUnit {
        self.unit
    }

    pub fn ticks(&self) -> Vec<Tick> {
        let mut ticks = Vec::new();
        let mut current = self.start;
        let mut index = 0;
        while current < self.end {
            let next = (current + self.unit.step()).min(self.end);
            ticks.push(Tick {
                index,
                start: current,
                end: next,
            });
            current = next;
            index += 1;
        }
        ticks
    }

    pub fn tick_count(&self) -> usize {
        self.ticks().len()
    }
}
