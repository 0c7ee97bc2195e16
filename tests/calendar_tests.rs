use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use resource_histogram::{Shift, TickCalendar, TickUnit, WorkCalendar, WorkCalendarConfig};

fn dt(day: u32, hour: u32) -> NaiveDateTime {
    // June 2025: the 2nd is a Monday.
    NaiveDate::from_ymd_opt(2025, 6, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[test]
fn standard_calendar_works_five_eight_hour_days() {
    let cal = WorkCalendar::standard();
    let intervals = cal.intervals_in(dt(2, 0), dt(9, 0));
    assert_eq!(intervals.len(), 5);
    for (start, end) in &intervals {
        assert_eq!((*end - *start).num_seconds(), 8 * 3600);
    }
    assert_eq!(cal.working_secs_between(dt(2, 0), dt(9, 0)), 5 * 8 * 3600);
}

#[test]
fn weekend_days_are_not_working() {
    let cal = WorkCalendar::standard();
    // 2025-06-07 is a Saturday, 2025-06-08 a Sunday.
    assert!(!cal.is_working_day(dt(7, 0).date()));
    assert!(!cal.is_working_day(dt(8, 0).date()));
    assert!(cal.is_working_day(dt(9, 0).date()));
    assert!(cal.intervals_in(dt(7, 0), dt(9, 0)).is_empty());
}

#[test]
fn intervals_clip_to_the_requested_range() {
    let cal = WorkCalendar::standard();
    let intervals = cal.intervals_in(dt(2, 10), dt(2, 14));
    assert_eq!(intervals, vec![(dt(2, 10), dt(2, 14))]);

    // A range starting mid-shift and ending past it clips only the start.
    let intervals = cal.intervals_in(dt(2, 12), dt(3, 0));
    assert_eq!(intervals, vec![(dt(2, 12), dt(2, 16))]);
}

#[test]
fn exception_dates_remove_whole_days() {
    let mut cal = WorkCalendar::standard();
    cal.add_exception(dt(4, 0).date());
    assert!(!cal.is_working_day(dt(4, 0).date()));
    assert_eq!(cal.working_secs_between(dt(2, 0), dt(9, 0)), 4 * 8 * 3600);

    cal.add_exceptions(&[dt(2, 0).date(), dt(3, 0).date()]);
    assert_eq!(cal.working_secs_between(dt(2, 0), dt(9, 0)), 2 * 8 * 3600);
}

#[test]
fn around_the_clock_merges_across_midnight() {
    let cal = WorkCalendar::around_the_clock();
    let intervals = cal.intervals_in(dt(2, 0), dt(5, 0));
    assert_eq!(intervals, vec![(dt(2, 0), dt(5, 0))]);
    assert!(cal.is_working_at(dt(7, 3)));
}

#[test]
fn is_working_at_respects_shift_bounds() {
    let cal = WorkCalendar::standard();
    assert!(!cal.is_working_at(dt(2, 7)));
    assert!(cal.is_working_at(dt(2, 8)));
    assert!(cal.is_working_at(dt(2, 15)));
    // Shift end is exclusive.
    assert!(!cal.is_working_at(dt(2, 16)));
}

#[test]
fn custom_calendar_round_trips_through_config() {
    let morning = Shift::between(
        NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    );
    let afternoon = Shift::between(
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    );
    let cal = WorkCalendar::custom(
        [
            (Weekday::Mon, vec![morning, afternoon]),
            (Weekday::Sat, vec![morning]),
        ],
        [dt(9, 0).date()],
    );

    // Monday has a two-shift day with a midday gap.
    let intervals = cal.intervals_in(dt(2, 0), dt(3, 0));
    assert_eq!(intervals.len(), 2);
    assert_eq!(intervals[0], (dt(2, 6), dt(2, 10)));
    assert_eq!(intervals[1], (dt(2, 12), dt(2, 18)));

    // Saturday works, the excepted Monday does not.
    assert!(cal.is_working_day(dt(7, 0).date()));
    assert!(!cal.is_working_day(dt(9, 0).date()));

    let config: WorkCalendarConfig = cal.to_config();
    let recreated = WorkCalendar::from_config(&config);
    assert_eq!(recreated.to_config(), config);
    assert_eq!(recreated, cal);
}

#[test]
fn shift_accessors_expose_seconds() {
    let shift = Shift::new(8 * 3600, 16 * 3600);
    assert_eq!(shift.start_sec(), 8 * 3600);
    assert_eq!(shift.end_sec(), 16 * 3600);
    assert_eq!(shift.duration_secs(), 8 * 3600);
    assert_eq!(Shift::full_day().duration_secs(), 86_400);
}

#[test]
fn day_ticks_cover_the_horizon_without_gaps() {
    let ticks = TickCalendar::new(dt(2, 0), dt(7, 0), TickUnit::Day).ticks();
    assert_eq!(ticks.len(), 5);
    for (expected_index, tick) in ticks.iter().enumerate() {
        assert_eq!(tick.index, expected_index);
    }
    for pair in ticks.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(ticks.first().unwrap().start, dt(2, 0));
    assert_eq!(ticks.last().unwrap().end, dt(7, 0));
}

#[test]
fn final_week_tick_is_clipped_to_the_horizon() {
    let ticks = TickCalendar::new(dt(2, 0), dt(12, 0), TickUnit::Week).ticks();
    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[0].duration_secs(), 7 * 86_400);
    assert_eq!(ticks[1].duration_secs(), 3 * 86_400);
    assert_eq!(ticks[1].end, dt(12, 0));
}

#[test]
fn hour_ticks_match_the_horizon_length() {
    let calendar = TickCalendar::new(dt(2, 8), dt(2, 16), TickUnit::Hour);
    assert_eq!(calendar.tick_count(), 8);
    assert_eq!(calendar.start(), dt(2, 8));
    assert_eq!(calendar.end(), dt(2, 16));
    assert_eq!(calendar.unit(), TickUnit::Hour);
}
