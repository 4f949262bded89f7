//! Converts packed matrices into percentage placements inside one day window.

use chrono::{Duration, NaiveDateTime};

use crate::models::ui::{EventUIModel, RenderProps, TravelHeights};
use crate::utils::time::{span, VerticalSpan};

use super::packer::{column_count, PlacementMatrix, PlacementMatrix3D};

pub const DEFAULT_MIN_HEIGHT_PERCENT: f64 = 1.0;

/// Computes render props for events inside `[window_start, window_end)`.
///
/// `visible_start`/`visible_end` bound the whole rendered date range and only
/// drive the exceed flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInfoCalculator {
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
    visible_start: NaiveDateTime,
    visible_end: NaiveDateTime,
    min_height_percent: f64,
}

impl RenderInfoCalculator {
    pub fn new(window_start: NaiveDateTime, window_end: NaiveDateTime) -> Self {
        Self {
            window_start,
            window_end,
            visible_start: window_start,
            visible_end: window_end,
            min_height_percent: DEFAULT_MIN_HEIGHT_PERCENT,
        }
    }

    pub fn with_visible_range(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.visible_start = start;
        self.visible_end = end;
        self
    }

    pub fn with_min_height(mut self, percent: f64) -> Self {
        self.min_height_percent = percent;
        self
    }

    pub fn window(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.window_start, self.window_end)
    }

    /// Placement for one event in lane `column_index` of a matrix whose lanes
    /// are `base_width` percent wide
    pub fn render(&self, ui: &EventUIModel, column_index: usize, base_width: f64) -> EventUIModel {
        let model = ui.model();
        let going_start = model.going_start();
        let coming_end = model.coming_end();

        let render_start = going_start.max(self.window_start);
        let render_end = coming_end.min(self.window_end).max(render_start);
        let VerticalSpan { top, height } = span(render_start, render_end, self.window_start, self.window_end);

        let collapse = height < self.min_height_percent;
        let height = height.max(self.min_height_percent);
        // a floored block still ends inside the window
        let top = if collapse { top.min(100.0 - height).max(0.0) } else { top };

        let render = RenderProps {
            top,
            left: base_width * column_index as f64,
            width: base_width,
            height,
            exceed_left: model.start() < self.visible_start,
            exceed_right: model.end() > self.visible_end,
            cropped_start: going_start < self.window_start,
            cropped_end: coming_end > self.window_end,
            collapse,
        };

        ui.with_render(render).with_travel(travel_heights(
            model.going_duration(),
            model.duration(),
            model.coming_duration(),
        ))
    }

    /// Place every occupied cell; empty cells stay empty.
    pub fn place_matrix(&self, matrix: &PlacementMatrix<EventUIModel>) -> PlacementMatrix<EventUIModel> {
        let columns = column_count(matrix);
        if columns == 0 {
            return Vec::new();
        }
        let base_width = 100.0 / columns as f64;

        matrix
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(column_index, cell)| cell.as_ref().map(|ui| self.render(ui, column_index, base_width)))
                    .collect()
            })
            .collect()
    }

    pub fn place(&self, matrices: &PlacementMatrix3D<EventUIModel>) -> PlacementMatrix3D<EventUIModel> {
        matrices.iter().map(|matrix| self.place_matrix(matrix)).collect()
    }
}

/// Share of a block taken by each part, in percent of the block
pub fn travel_heights(going: Duration, model: Duration, coming: Duration) -> TravelHeights {
    let total = (going + model + coming).num_milliseconds() as f64;
    if total <= 0.0 {
        return TravelHeights {
            going: 0.0,
            model: 100.0,
            coming: 0.0,
        };
    }

    TravelHeights {
        going: going.num_milliseconds() as f64 * 100.0 / total,
        model: model.num_milliseconds() as f64 * 100.0 / total,
        coming: coming.num_milliseconds() as f64 * 100.0 / total,
    }
}
