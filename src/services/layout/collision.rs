//! Pairwise overlap tests between events, optionally widened by travel time.

use chrono::{Duration, NaiveDateTime};

use crate::models::event::{EventId, EventModel};
use crate::models::ui::EventUIModel;

/// Intervals shorter than this are padded at the end before testing overlap.
pub const MIN_COLLISION_DURATION_MINUTES: i64 = 20;

/// The interval an event occupies for collision purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub going: Duration,
    pub coming: Duration,
}

impl CollisionInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            going: Duration::zero(),
            coming: Duration::zero(),
        }
    }

    pub fn with_travel(self, going: Duration, coming: Duration) -> Self {
        Self {
            going,
            coming,
            ..self
        }
    }

    /// Bounds after minimum-duration padding and, if requested, travel buffers
    pub fn effective(&self, use_travel_buffer: bool) -> (NaiveDateTime, NaiveDateTime) {
        let min_duration = Duration::minutes(MIN_COLLISION_DURATION_MINUTES);
        let mut start = self.start;
        let mut end = if self.end - self.start < min_duration {
            self.start + min_duration
        } else {
            self.end
        };

        if use_travel_buffer {
            start -= self.going;
            end += self.coming;
        }

        (start, end)
    }
}

/// Anything that can take part in collision grouping and packing
pub trait Collidable {
    fn event_id(&self) -> EventId;
    fn collision_interval(&self) -> CollisionInterval;
}

impl Collidable for EventModel {
    fn event_id(&self) -> EventId {
        self.cid()
    }

    fn collision_interval(&self) -> CollisionInterval {
        CollisionInterval::new(self.start(), self.end())
            .with_travel(self.going_duration(), self.coming_duration())
    }
}

impl Collidable for EventUIModel {
    fn event_id(&self) -> EventId {
        self.cid()
    }

    /// Per-day occurrences collide on their own slice, without travel time
    fn collision_interval(&self) -> CollisionInterval {
        match self.occurrence() {
            Some(occurrence) => CollisionInterval::new(occurrence.starts, occurrence.ends),
            None => self.model().collision_interval(),
        }
    }
}

/// Touching endpoints do not collide; any other overlap does.
pub fn collides(a: &CollisionInterval, b: &CollisionInterval, use_travel_buffer: bool) -> bool {
    let (a_start, a_end) = a.effective(use_travel_buffer);
    let (b_start, b_end) = b.effective(use_travel_buffer);

    !(a_end <= b_start || a_start >= b_end)
}

pub fn events_collide<A, B>(a: &A, b: &B, use_travel_buffer: bool) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    collides(
        &a.collision_interval(),
        &b.collision_interval(),
        use_travel_buffer,
    )
}
