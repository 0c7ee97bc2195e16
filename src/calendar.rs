use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Stable identifier used to reference a calendar from resources and events.
pub type CalendarId = i32;

const SECS_PER_DAY: u32 = 86_400;

/// A working period within a single day, as seconds from midnight.
/// `end_sec` may be `86_400` so that around-the-clock calendars produce
/// seamless intervals across midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Shift {
    start_sec: u32,
    end_sec: u32,
}

impl Shift {
    pub fn new(start_sec: u32, end_sec: u32) -> Self {
        if start_sec >= end_sec || end_sec > SECS_PER_DAY {
            panic!("Shift requires 0 <= start < end <= 86400, got {start_sec}..{end_sec}");
        }
        Self { start_sec, end_sec }
    }

    pub fn between(start: NaiveTime, end: NaiveTime) -> Self {
        Self::new(
            start.num_seconds_from_midnight(),
            end.num_seconds_from_midnight(),
        )
    }

    pub fn full_day() -> Self {
        Self::new(0, SECS_PER_DAY)
    }

    pub fn start_sec(&self) -> u32 {
        self.start_sec
    }

    pub fn end_sec(&self) -> u32 {
        self.end_sec
    }

    pub fn duration_secs(&self) -> i64 {
        (self.end_sec - self.start_sec) as i64
    }
}

/// Working-time definition: working-hour shifts per weekday plus exception
/// dates on which the whole day is non-working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    shifts: HashMap<Weekday, Vec<Shift>>,
    exceptions: HashSet<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendarConfig {
    working_hours: Vec<DayShifts>,
    exceptions: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayShifts {
    pub day: Weekday,
    pub shifts: Vec<Shift>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::standard()
    }
}

impl WorkCalendar {
    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Mon-Fri, 08:00-16:00.
    pub fn standard() -> Self {
        let workday = vec![Shift::new(8 * 3600, 16 * 3600)];
        let mut shifts = HashMap::new();
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ] {
            shifts.insert(day, workday.clone());
        }
        Self {
            shifts,
            exceptions: HashSet::new(),
        }
    }

    /// Every day of the week, all day.
    pub fn around_the_clock() -> Self {
        let mut shifts = HashMap::new();
        for day in Self::ALL_WEEKDAYS {
            shifts.insert(day, vec![Shift::full_day()]);
        }
        Self {
            shifts,
            exceptions: HashSet::new(),
        }
    }

    pub fn custom<I, J>(working_hours: I, exceptions: J) -> Self
    where
        I: IntoIterator<Item = (Weekday, Vec<Shift>)>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let config = WorkCalendarConfig::new(
            working_hours
                .into_iter()
                .map(|(day, shifts)| DayShifts { day, shifts }),
            exceptions,
        );
        Self::from_config(&config)
    }

    pub fn from_config(config: &WorkCalendarConfig) -> Self {
        let mut shifts: HashMap<Weekday, Vec<Shift>> = HashMap::new();
        for day_shifts in &config.working_hours {
            if day_shifts.shifts.is_empty() {
                continue;
            }
            shifts.insert(day_shifts.day, normalize_shifts(day_shifts.shifts.clone()));
        }
        if shifts.is_empty() {
            panic!("WorkCalendar requires at least one working shift");
        }

        let exceptions = config.exceptions.iter().copied().collect();
        Self { shifts, exceptions }
    }

    pub fn to_config(&self) -> WorkCalendarConfig {
        WorkCalendarConfig::from(self)
    }

    /// Replace the shifts for one weekday; an empty list makes it non-working.
    pub fn set_day_shifts(&mut self, day: Weekday, shifts: Vec<Shift>) {
        if shifts.is_empty() {
            self.shifts.remove(&day);
        } else {
            self.shifts.insert(day, normalize_shifts(shifts));
        }
    }

    /// Mark a single date as non-working regardless of its weekday shifts.
    pub fn add_exception(&mut self, date: NaiveDate) {
        self.exceptions.insert(date);
    }

    /// Mark multiple dates as non-working at once.
    pub fn add_exceptions(&mut self, dates: &[NaiveDate]) {
        self.exceptions.extend(dates);
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.exceptions.contains(&date) && self.shifts.contains_key(&date.weekday())
    }

    pub fn is_working_at(&self, at: NaiveDateTime) -> bool {
        if !self.is_working_day(at.date()) {
            return false;
        }
        let sec = at.time().num_seconds_from_midnight();
        self.shifts[&at.date().weekday()]
            .iter()
            .any(|shift| shift.start_sec <= sec && sec < shift.end_sec)
    }

    /// Maximal working intervals intersected with `[start, end)`, ascending
    /// and non-overlapping. Adjacent shifts (including across midnight) are
    /// merged into a single interval.
    pub fn intervals_in(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        let mut intervals: Vec<(NaiveDateTime, NaiveDateTime)> = Vec::new();
        if start >= end {
            return intervals;
        }

        let mut day = start.date();
        while day <= end.date() {
            if !self.exceptions.contains(&day) {
                if let Some(shifts) = self.shifts.get(&day.weekday()) {
                    let midnight = day.and_time(NaiveTime::MIN);
                    for shift in shifts {
                        let clipped_start =
                            (midnight + Duration::seconds(shift.start_sec as i64)).max(start);
                        let clipped_end =
                            (midnight + Duration::seconds(shift.end_sec as i64)).min(end);
                        if clipped_start >= clipped_end {
                            continue;
                        }
                        match intervals.last_mut() {
                            Some(last) if last.1 == clipped_start => last.1 = clipped_end,
                            _ => intervals.push((clipped_start, clipped_end)),
                        }
                    }
                }
            }
            day = day + Duration::days(1);
        }
        intervals
    }

    /// Total working seconds intersected with `[start, end)`.
    pub fn working_secs_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> i64 {
        self.intervals_in(start, end)
            .iter()
            .map(|(interval_start, interval_end)| (*interval_end - *interval_start).num_seconds())
            .sum()
    }
}

fn normalize_shifts(mut shifts: Vec<Shift>) -> Vec<Shift> {
    shifts.sort();
    shifts.dedup();
    for pair in shifts.windows(2) {
        if pair[1].start_sec < pair[0].end_sec {
            panic!(
                "WorkCalendar shifts must not overlap: {}..{} and {}..{}",
                pair[0].start_sec, pair[0].end_sec, pair[1].start_sec, pair[1].end_sec
            );
        }
    }
    shifts
}

impl WorkCalendarConfig {
    pub fn new<I, J>(working_hours: I, exceptions: J) -> Self
    where
        I: IntoIterator<Item = DayShifts>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let mut working: Vec<DayShifts> = working_hours
            .into_iter()
            .filter(|day_shifts| !day_shifts.shifts.is_empty())
            .collect();
        if working.is_empty() {
            panic!("WorkCalendarConfig requires at least one working shift");
        }
        working.sort_by_key(|day_shifts| day_shifts.day.num_days_from_monday());
        working.dedup_by(|a, b| a.day.num_days_from_monday() == b.day.num_days_from_monday());
        for day_shifts in &mut working {
            day_shifts.shifts = normalize_shifts(day_shifts.shifts.clone());
        }

        let mut exceptions: Vec<NaiveDate> = exceptions.into_iter().collect();
        exceptions.sort();
        exceptions.dedup();

        Self {
            working_hours: working,
            exceptions,
        }
    }

    pub fn working_hours(&self) -> &[DayShifts] {
        &self.working_hours
    }

    pub fn exceptions(&self) -> &[NaiveDate] {
        &self.exceptions
    }
}

impl Default for WorkCalendarConfig {
    fn default() -> Self {
        WorkCalendarConfig::from(&WorkCalendar::default())
    }
}

impl From<&WorkCalendar> for WorkCalendarConfig {
    fn from(calendar: &WorkCalendar) -> Self {
        let mut working = Vec::new();
        for day in WorkCalendar::ALL_WEEKDAYS {
            if let Some(shifts) = calendar.shifts.get(&day) {
                working.push(DayShifts {
                    day,
                    shifts: shifts.clone(),
                });
            }
        }

        let mut exceptions: Vec<NaiveDate> = calendar.exceptions.iter().copied().collect();
        exceptions.sort();

        Self {
            working_hours: working,
            exceptions,
        }
    }
}
