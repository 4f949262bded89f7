//! Moving an event across rows (time) and columns (days).

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::models::grid::{GridPosition, TimeGridData};
use crate::models::ui::EventUIModel;
use crate::utils::date::minutes_since_midnight;

use super::{DragGuide, DragKind, DragPreview, EventChange};

/// Time shift between the press position and `current`. A missing press
/// position means no shift.
pub fn move_delta(init: Option<GridPosition>, current: GridPosition, grid: &TimeGridData) -> Duration {
    let Some(init) = init else {
        return Duration::zero();
    };

    let row_diff = current.row_index as i64 - init.row_index as i64;
    let column_diff = current.column_index as i64 - init.column_index as i64;

    grid.row_duration() * row_diff as i32 + Duration::days(column_diff)
}

/// Row holding `time`, counted from the first row; may fall outside the grid
pub(super) fn row_index_by_time(time: NaiveDateTime, grid: &TimeGridData) -> i64 {
    let first_minute = grid
        .start_time()
        .map(|start| i64::from(start.hour()) * 60 + i64::from(start.minute()))
        .unwrap_or(0);
    let slot = grid.row_duration().num_minutes().max(1);

    (minutes_since_midnight(time) - first_minute).div_euclid(slot)
}

/// Guide for the event shifted by `delta`, drawn in the hovered column.
///
/// A shifted block starting on an earlier date is anchored to the top of the
/// column; one ending on a later date extends over the full grid height.
fn guide(snapshot: &EventUIModel, delta: Duration, current: GridPosition, grid: &TimeGridData) -> Option<DragGuide> {
    let column = grid.columns.get(current.column_index)?;
    let last_row = grid.rows.len().checked_sub(1)? as i64;
    let row_height = grid.row_height();
    let max_height = row_height * grid.rows.len() as f64;

    let model = snapshot.model();
    let next_start = model.going_start() + delta;
    let next_end = model.coming_end() + delta;

    let start_index = row_index_by_time(next_start, grid).clamp(0, last_row);
    let end_index = row_index_by_time(next_end, grid).min(last_row);

    let starts_before = next_start.date() < column.date;
    let ends_after = next_end.date() > column.date;

    let index_diff = end_index - if starts_before { 0 } else { start_index };
    let top = if starts_before {
        0.0
    } else {
        grid.rows[start_index as usize].top
    };
    let height = if ends_after {
        max_height
    } else {
        index_diff.max(1) as f64 * row_height
    };

    Some(DragGuide {
        top,
        left: column.left,
        width: column.width,
        height,
    })
}

pub fn preview(
    snapshot: &EventUIModel,
    init: Option<GridPosition>,
    current: GridPosition,
    grid: &TimeGridData,
) -> Option<DragPreview> {
    let delta = move_delta(init, current, grid);
    let guide = guide(snapshot, delta, current, grid)?;
    log::trace!("Move preview for {:?}: delta {}", snapshot.cid(), delta);

    Some(DragPreview {
        kind: DragKind::Move,
        guide,
        start: snapshot.starts() + delta,
        end: snapshot.starts() + delta + snapshot.duration(),
    })
}

/// New times when dropped at `current`; `None` when the event did not move.
pub fn commit(
    snapshot: &EventUIModel,
    init: Option<GridPosition>,
    current: GridPosition,
    grid: &TimeGridData,
) -> Option<EventChange> {
    let delta = move_delta(init, current, grid);
    if delta.is_zero() {
        return None;
    }

    let start = snapshot.starts() + delta;
    Some(EventChange::for_model(snapshot.model(), start, start + snapshot.duration()))
}
