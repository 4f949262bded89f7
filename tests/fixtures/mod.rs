// Test fixtures - reusable test data
// Provides consistent dates, events and grids across integration tests

#![allow(dead_code)]

use calendar_layout::models::event::{Event, EventModel};
use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, Jan 15 2025
    pub fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    /// Sunday, Jan 12 2025: first day of the Sunday-based week
    pub fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 12).unwrap()
    }

    /// `day` of January 2025 at `h:m`
    pub fn jan(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    /// Wednesday Jan 15 at `h:m`
    pub fn at(h: u32, m: u32) -> NaiveDateTime {
        jan(15, h, m)
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn timed(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> EventModel {
        let event = Event::builder()
            .id(title)
            .calendar_id("work")
            .title(title)
            .start(start)
            .end(end)
            .build()
            .unwrap();
        EventModel::new(event).unwrap()
    }

    pub fn with_travel(
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        going: i64,
        coming: i64,
    ) -> EventModel {
        let event = Event::builder()
            .id(title)
            .title(title)
            .start(start)
            .end(end)
            .travel(going, coming)
            .build()
            .unwrap();
        EventModel::new(event).unwrap()
    }

    /// A[09:00-10:00], B[09:30-10:30], C[11:00-12:00] on Wednesday
    pub fn overlapping_morning() -> Vec<EventModel> {
        vec![
            timed("A", dates::at(9, 0), dates::at(10, 0)),
            timed("B", dates::at(9, 30), dates::at(10, 30)),
            timed("C", dates::at(11, 0), dates::at(12, 0)),
        ]
    }

    /// JSON array as accepted by the command line
    pub fn sample_json() -> &'static str {
        r#"[
            {"id": "1", "title": "Standup", "start": "2025-01-15T09:00:00", "end": "2025-01-15T09:15:00"},
            {"id": "2", "title": "Review", "start": "2025-01-15T09:00:00", "end": "2025-01-15T10:00:00",
             "going_duration": 15, "category": "time"},
            {"id": "3", "title": "Holiday", "start": "2025-01-16T00:00:00", "end": "2025-01-16T00:00:00",
             "category": "allday"}
        ]"#
    }
}
