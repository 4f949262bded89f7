// Layout service
// Places timed events on day columns: filter, split per day, sort, group, pack and render

pub mod collision;
pub mod grouping;
pub mod packer;
pub mod render_info;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::event::{EventCategory, EventModel};
use crate::models::grid::TimeGridData;
use crate::models::settings::LayoutSettings;
use crate::models::ui::{EventUIModel, Occurrence, RenderProps, TravelHeights};
use crate::services::grid::create_time_grid_data;
use crate::utils::date::{at_hour, date_range, get_week_dates};

use self::collision::Collidable;
use self::grouping::group;
use self::packer::{occupied_cells, pack, PlacementMatrix3D};
use self::render_info::RenderInfoCalculator;

/// Placed events of one date column
#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub matrices: PlacementMatrix3D<EventUIModel>,
}

impl DayLayout {
    /// Placed events in matrix, row, column order
    pub fn events(&self) -> impl Iterator<Item = &EventUIModel> {
        self.matrices
            .iter()
            .flat_map(|matrix| occupied_cells(matrix).map(|(_, _, ui)| ui))
    }

    pub fn is_empty(&self) -> bool {
        self.events().next().is_none()
    }
}

/// A week or day view: the grid plus one layout per column
#[derive(Debug, Clone, PartialEq)]
pub struct TimeViewLayout {
    pub grid: TimeGridData,
    pub days: Vec<DayLayout>,
}

impl TimeViewLayout {
    /// UI models per column, used to locate an event's columns while dragging
    pub fn columns(&self) -> Vec<Vec<EventUIModel>> {
        self.days
            .iter()
            .map(|day| day.events().cloned().collect())
            .collect()
    }
}

/// Flat, serializable view of one placed event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub occurrence: Option<Occurrence>,
    pub render: RenderProps,
    pub travel: TravelHeights,
}

impl From<&EventUIModel> for RenderedEvent {
    fn from(ui: &EventUIModel) -> Self {
        let model = ui.model();
        Self {
            id: model.id.clone(),
            title: model.title.clone(),
            start: model.start(),
            end: model.end(),
            occurrence: ui.occurrence().copied(),
            render: *ui.render(),
            travel: *ui.travel(),
        }
    }
}

/// Earlier collision start first, so the grouper sees events in start order.
/// Ties go to all-day and multi-date events, then longer duration, then
/// creation order.
pub fn compare_events(a: &EventUIModel, b: &EventUIModel, use_travel_buffer: bool) -> Ordering {
    let starts = |ui: &EventUIModel| ui.collision_interval().effective(use_travel_buffer).0;
    let spans = |ui: &EventUIModel| ui.model().is_allday() || ui.model().has_multi_dates();

    starts(a)
        .cmp(&starts(b))
        .then_with(|| spans(b).cmp(&spans(a)))
        .then_with(|| b.duration().cmp(&a.duration()))
        .then_with(|| a.cid().cmp(&b.cid()))
}

/// Inclusive overlap of the event with `[start, end]`
pub fn in_date_range(model: &EventModel, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    !(model.end() < start || model.start() > end)
}

/// Whether the buffered event reaches into `[window_start, window_end)`
pub fn is_between_window(model: &EventModel, window_start: NaiveDateTime, window_end: NaiveDateTime) -> bool {
    !(model.coming_end() <= window_start || model.going_start() >= window_end)
}

/// Calendar dates the event occupies. An end at exactly midnight does not
/// claim the following day.
pub fn event_dates(model: &EventModel) -> Vec<NaiveDate> {
    let first = model.start().date();
    let mut last = model.end().date();
    if last > first && model.end().time() == NaiveTime::MIN {
        last = last.pred_opt().unwrap_or(last);
    }
    date_range(first, last)
}

/// The piece of `model` shown on `date`, if any. Events spanning several
/// dates become occurrences clamped to the day.
pub fn split_for_day(model: &Arc<EventModel>, date: NaiveDate) -> Option<EventUIModel> {
    let dates = event_dates(model);
    let index = dates.iter().position(|d| *d == date)?;

    if dates.len() == 1 {
        return Some(EventUIModel::new(Arc::clone(model)));
    }

    let day_start = at_hour(date, 0);
    let day_end = day_start + Duration::days(1);
    let occurrence = Occurrence {
        date,
        index,
        starts: model.start().max(day_start),
        ends: model.end().min(day_end),
    };

    Some(EventUIModel::occurrence_of(Arc::clone(model), occurrence))
}

pub fn events_by_category(models: &[Arc<EventModel>]) -> HashMap<EventCategory, Vec<Arc<EventModel>>> {
    let mut panels: HashMap<EventCategory, Vec<Arc<EventModel>>> = HashMap::new();
    for model in models {
        let category = if model.is_time_event() {
            EventCategory::Time
        } else if model.is_allday() {
            EventCategory::Allday
        } else {
            model.category()
        };
        panels.entry(category).or_default().push(Arc::clone(model));
    }
    panels
}

/// Lay out the timed events of one date.
pub fn layout_day(
    models: &[Arc<EventModel>],
    date: NaiveDate,
    settings: &LayoutSettings,
    calculator: RenderInfoCalculator,
) -> DayLayout {
    let (window_start, window_end) = calculator.window();

    let mut day_events: Vec<EventUIModel> = models
        .iter()
        .filter(|model| model.is_time_event())
        .filter(|model| is_between_window(model, window_start, window_end))
        .filter_map(|model| split_for_day(model, date))
        .collect();
    day_events.sort_by(|a, b| compare_events(a, b, settings.use_travel_time));

    let groups = group(&day_events, settings.use_travel_time);
    let matrices = pack(&day_events, &groups, settings.use_travel_time);

    log::debug!(
        "Laid out {} events on {} in {} collision groups",
        day_events.len(),
        date,
        groups.len()
    );

    DayLayout {
        date,
        window_start,
        window_end,
        matrices: calculator.place(&matrices),
    }
}

/// Lay out `events` across `dates`, one column per date.
pub fn layout_time_view(events: &[EventModel], dates: &[NaiveDate], settings: &LayoutSettings) -> TimeViewLayout {
    let grid = create_time_grid_data(dates, settings);

    if let Err(reason) = settings.validate() {
        log::warn!("Skipping event layout, invalid settings: {}", reason);
        return TimeViewLayout {
            grid,
            days: Vec::new(),
        };
    }

    let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
        return TimeViewLayout {
            grid,
            days: Vec::new(),
        };
    };

    let visible_start = at_hour(*first, settings.hour_start);
    let visible_end = at_hour(*last, settings.hour_end);

    let models: Vec<Arc<EventModel>> = events
        .iter()
        .filter(|model| in_date_range(model, at_hour(*first, 0), at_hour(*last, 24)))
        .cloned()
        .map(Arc::new)
        .collect();

    let panels = events_by_category(&models);
    let time_events = panels.get(&EventCategory::Time).map(Vec::as_slice).unwrap_or(&[]);
    log::debug!(
        "{} of {} events in range are timed",
        time_events.len(),
        models.len()
    );

    let days = dates
        .iter()
        .map(|date| {
            let calculator = RenderInfoCalculator::new(
                at_hour(*date, settings.hour_start),
                at_hour(*date, settings.hour_end),
            )
            .with_visible_range(visible_start, visible_end)
            .with_min_height(settings.min_height_percent);

            layout_day(time_events, *date, settings, calculator)
        })
        .collect();

    TimeViewLayout { grid, days }
}

/// Lay out the week view containing `render_date`
pub fn layout_week(events: &[EventModel], render_date: NaiveDate, settings: &LayoutSettings) -> TimeViewLayout {
    let dates = get_week_dates(render_date, settings.start_day_of_week, settings.workweek);
    layout_time_view(events, &dates, settings)
}
