// Date utility functions
// Wall-clock arithmetic shared by the layout pipeline and the drag engine

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const DAYS_PER_WEEK: u8 = 7;

pub fn start_of_day(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Last representable second of the calendar day (23:59:59).
pub fn end_of_day(date: NaiveDateTime) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::seconds(1)
}

/// Wall-clock instant `hour` hours after midnight of `date`. `hour == 24`
/// yields midnight of the following day.
pub fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(hour))
}

/// Minutes elapsed since midnight of the instant's own day.
pub fn minutes_since_midnight(date: NaiveDateTime) -> i64 {
    i64::from(date.hour()) * 60 + i64::from(date.minute())
}

/// Day index where 0 = Sunday, matching `first_day_of_week` settings.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn is_weekend_index(day: u8) -> bool {
    let day = day % DAYS_PER_WEEK;
    day == 0 || day == 6
}

pub fn is_weekend(date: NaiveDate) -> bool {
    is_weekend_index(weekday_index(date))
}

pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = i64::from(weekday_index(date));
    let offset = (weekday - i64::from(first_day_of_week) + 7) % 7;
    date - Duration::days(offset)
}

/// The dates shown by a week view containing `render_date`. A work week drops
/// Saturday and Sunday.
pub fn get_week_dates(render_date: NaiveDate, first_day_of_week: u8, workweek: bool) -> Vec<NaiveDate> {
    let start = get_week_start(render_date, first_day_of_week);
    (0..i64::from(DAYS_PER_WEEK))
        .map(|offset| start + Duration::days(offset))
        .filter(|date| !workweek || !is_weekend(*date))
        .collect()
}

/// Every calendar date touched by `[start, end]`, inclusive of both ends.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .collect()
}
