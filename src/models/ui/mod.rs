// UI models module
// Per-render placement values wrapping a shared event model

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::event::{EventId, EventModel};

/// Placement of one event block, in percent of its day column
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RenderProps {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// Event starts before the first visible date
    pub exceed_left: bool,
    /// Event ends after the last visible date
    pub exceed_right: bool,
    /// Block is cut at the top of its column
    pub cropped_start: bool,
    /// Block is cut at the bottom of its column
    pub cropped_end: bool,
    /// Block was raised to the minimum height and should render compactly
    pub collapse: bool,
}

/// How a block's height splits between travel buffers and the event itself,
/// each as a percentage of the block
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TravelHeights {
    pub going: f64,
    pub model: f64,
    pub coming: f64,
}

/// The slice of a multi-day event that falls on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub date: NaiveDate,
    /// Position of this date among the event's dates, starting at 0
    pub index: usize,
    pub starts: NaiveDateTime,
    pub ends: NaiveDateTime,
}

/// Immutable placement value for one event (or one day of a multi-day event).
///
/// Placement changes return a new value; the wrapped model is shared and never
/// touched.
#[derive(Debug, Clone, PartialEq)]
pub struct EventUIModel {
    model: Arc<EventModel>,
    render: RenderProps,
    travel: TravelHeights,
    occurrence: Option<Occurrence>,
}

impl EventUIModel {
    pub fn new(model: Arc<EventModel>) -> Self {
        Self {
            model,
            render: RenderProps::default(),
            travel: TravelHeights::default(),
            occurrence: None,
        }
    }

    pub fn occurrence_of(model: Arc<EventModel>, occurrence: Occurrence) -> Self {
        Self {
            occurrence: Some(occurrence),
            ..Self::new(model)
        }
    }

    pub fn cid(&self) -> EventId {
        self.model.cid()
    }

    pub fn model(&self) -> &EventModel {
        &self.model
    }

    pub fn shared_model(&self) -> Arc<EventModel> {
        Arc::clone(&self.model)
    }

    pub fn starts(&self) -> NaiveDateTime {
        self.model.start()
    }

    pub fn ends(&self) -> NaiveDateTime {
        self.model.end()
    }

    pub fn duration(&self) -> Duration {
        self.model.duration()
    }

    pub fn render(&self) -> &RenderProps {
        &self.render
    }

    pub fn travel(&self) -> &TravelHeights {
        &self.travel
    }

    pub fn occurrence(&self) -> Option<&Occurrence> {
        self.occurrence.as_ref()
    }

    pub fn is_occurrence(&self) -> bool {
        self.occurrence.is_some()
    }

    pub fn with_render(&self, render: RenderProps) -> Self {
        Self {
            render,
            ..self.clone()
        }
    }

    pub fn with_travel(&self, travel: TravelHeights) -> Self {
        Self {
            travel,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::Event;

    fn model() -> Arc<EventModel> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let event = Event::new("Review", start, start + Duration::hours(1));
        Arc::new(EventModel::new(event).unwrap())
    }

    #[test]
    fn test_with_render_returns_new_value() {
        let ui = EventUIModel::new(model());
        let placed = ui.with_render(RenderProps {
            top: 10.0,
            height: 5.0,
            width: 100.0,
            ..RenderProps::default()
        });

        assert_eq!(ui.render().top, 0.0);
        assert_eq!(placed.render().top, 10.0);
        assert_eq!(placed.cid(), ui.cid());
    }

    #[test]
    fn test_occurrence_shares_model() {
        let shared = model();
        let date = shared.start().date();
        let occurrence = Occurrence {
            date,
            index: 0,
            starts: shared.start(),
            ends: shared.end(),
        };
        let ui = EventUIModel::occurrence_of(Arc::clone(&shared), occurrence);

        assert!(ui.is_occurrence());
        assert_eq!(ui.occurrence().map(|o| o.date), Some(date));
        assert_eq!(Arc::strong_count(&shared), 2);
    }
}
