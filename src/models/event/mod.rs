// Event module
// Raw calendar events and their normalized layout model

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::date::{end_of_day, start_of_day};

/// Spans longer than this are treated as multi-date events.
const MULTI_DATE_THRESHOLD_HOURS: i64 = 24;

/// Errors raised while building or normalizing events
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("event end {end} is before its start {start}")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("event {0} is required")]
    MissingField(&'static str),
}

/// Stable identity of an [`EventModel`], assigned once when the model is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EventId(u64);

impl EventId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Which panel of a week/day view an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Milestone,
    Task,
    Allday,
    #[default]
    Time,
}

/// Colors attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventColors {
    pub color: String,
    pub background_color: String,
    pub drag_background_color: String,
    pub border_color: String,
}

impl Default for EventColors {
    fn default() -> Self {
        Self {
            color: "#000".to_string(),
            background_color: "#a1b56c".to_string(),
            drag_background_color: "#a1b56c".to_string(),
            border_color: "#000".to_string(),
        }
    }
}

/// Calendar event as received from the event store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub calendar_id: String,
    #[serde(default)]
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub is_allday: bool,
    #[serde(default)]
    pub category: EventCategory,
    /// Travel time before the event, in minutes
    #[serde(default)]
    pub going_duration: i64,
    /// Travel time after the event, in minutes
    #[serde(default)]
    pub coming_duration: i64,
    #[serde(default)]
    pub colors: EventColors,
}

impl Event {
    /// Create a timed event with default colors and no travel buffers
    ///
    /// # Examples
    /// ```
    /// use calendar_layout::models::event::Event;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new("Team Meeting", start, end);
    /// assert_eq!(event.duration(), chrono::Duration::hours(1));
    /// ```
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: String::new(),
            calendar_id: String::new(),
            title: title.into(),
            start,
            end,
            is_allday: false,
            category: EventCategory::Time,
            going_duration: 0,
            coming_duration: 0,
            colors: EventColors::default(),
        }
    }

    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<String>,
    calendar_id: Option<String>,
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    all_day: bool,
    category: EventCategory,
    going_duration: i64,
    coming_duration: i64,
    colors: Option<EventColors>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn category(mut self, category: EventCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the travel buffers in minutes
    pub fn travel(mut self, going_minutes: i64, coming_minutes: i64) -> Self {
        self.going_duration = going_minutes;
        self.coming_duration = coming_minutes;
        self
    }

    pub fn colors(mut self, colors: EventColors) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn build(self) -> Result<Event, EventError> {
        let start = self.start.ok_or(EventError::MissingField("start"))?;
        let end = self.end.ok_or(EventError::MissingField("end"))?;

        Ok(Event {
            id: self.id.unwrap_or_default(),
            calendar_id: self.calendar_id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            start,
            end,
            is_allday: self.all_day,
            category: self.category,
            going_duration: self.going_duration,
            coming_duration: self.coming_duration,
            colors: self.colors.unwrap_or_default(),
        })
    }
}

/// Normalized event used by the layout pipeline.
///
/// Equality and hashing use the [`EventId`] only: two models are the same event
/// when they share an identity, even if one carries edited times.
#[derive(Debug, Clone)]
pub struct EventModel {
    cid: EventId,
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    pub colors: EventColors,
    start: NaiveDateTime,
    end: NaiveDateTime,
    is_allday: bool,
    category: EventCategory,
    going_duration: i64,
    coming_duration: i64,
    has_multi_dates: bool,
}

impl EventModel {
    /// Normalize a raw event. Events ending before they start are rejected;
    /// zero-length events are kept as-is.
    pub fn new(event: Event) -> Result<Self, EventError> {
        let is_allday = event.category == EventCategory::Allday || event.is_allday;
        let (start, end) = normalize_times(event.start, event.end, is_allday)?;

        Ok(Self {
            cid: EventId::next(),
            id: event.id,
            calendar_id: event.calendar_id,
            title: event.title,
            colors: event.colors,
            start,
            end,
            is_allday,
            category: event.category,
            going_duration: event.going_duration.max(0),
            coming_duration: event.coming_duration.max(0),
            has_multi_dates: end - start > Duration::hours(MULTI_DATE_THRESHOLD_HOURS),
        })
    }

    /// A copy of this event with new times and the same identity
    pub fn with_times(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, EventError> {
        let (start, end) = normalize_times(start, end, self.is_allday)?;

        Ok(Self {
            start,
            end,
            has_multi_dates: end - start > Duration::hours(MULTI_DATE_THRESHOLD_HOURS),
            ..self.clone()
        })
    }

    pub fn cid(&self) -> EventId {
        self.cid
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_allday(&self) -> bool {
        self.is_allday
    }

    pub fn category(&self) -> EventCategory {
        self.category
    }

    pub fn has_multi_dates(&self) -> bool {
        self.has_multi_dates
    }

    /// Timed events are the only ones laid out on the time grid
    pub fn is_time_event(&self) -> bool {
        self.category == EventCategory::Time && !self.is_allday
    }

    pub fn going_duration(&self) -> Duration {
        Duration::minutes(self.going_duration)
    }

    pub fn coming_duration(&self) -> Duration {
        Duration::minutes(self.coming_duration)
    }

    /// Start including the travel buffer before the event
    pub fn going_start(&self) -> NaiveDateTime {
        self.start - self.going_duration()
    }

    /// End including the travel buffer after the event
    pub fn coming_end(&self) -> NaiveDateTime {
        self.end + self.coming_duration()
    }
}

impl PartialEq for EventModel {
    fn eq(&self, other: &Self) -> bool {
        self.cid == other.cid
    }
}

impl Eq for EventModel {}

impl Hash for EventModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cid.hash(state);
    }
}

fn normalize_times(
    start: NaiveDateTime,
    end: NaiveDateTime,
    is_allday: bool,
) -> Result<(NaiveDateTime, NaiveDateTime), EventError> {
    if end < start {
        log::warn!("Rejecting event with end {} before start {}", end, start);
        return Err(EventError::EndBeforeStart { start, end });
    }

    if is_allday {
        Ok((start_of_day(start), end_of_day(end)))
    } else {
        Ok((start, end))
    }
}
