//! Resizing an event by dragging its bottom edge.

use chrono::{Duration, NaiveDateTime};

use crate::models::grid::{GridPosition, TimeGridData};
use crate::models::ui::EventUIModel;

use super::move_event::row_index_by_time;
use super::{DragContext, DragGuide, DragKind, DragPreview, EventChange};

/// First and last grid column holding the event, i.e. its start and end day
pub fn event_columns(snapshot: &EventUIModel, columns: &[Vec<EventUIModel>]) -> Option<(usize, usize)> {
    let holds = |column: &Vec<EventUIModel>| column.iter().any(|ui| ui.cid() == snapshot.cid());

    let first = columns.iter().position(holds)?;
    let last = columns.iter().rposition(holds)?;
    Some((first, last))
}

/// End instant for a drop on `current`, kept at least one row after the start
pub fn resized_end(snapshot: &EventUIModel, current: GridPosition, grid: &TimeGridData) -> Option<NaiveDateTime> {
    let column = grid.columns.get(current.column_index)?;
    let row = grid.rows.get(current.row_index)?;

    let mut end = column.date.and_time(row.end_time);
    if row.end_time <= row.start_time {
        end += Duration::days(1);
    }

    Some(end.max(snapshot.starts() + grid.row_duration()))
}

/// Guide from the row holding the event's start down to the hovered row.
/// Drawn only for a single-day event while the pointer stays in its column.
pub fn preview(snapshot: &EventUIModel, current: GridPosition, context: &DragContext<'_>) -> Option<DragPreview> {
    let (start_column, end_column) = event_columns(snapshot, context.columns)?;
    if start_column != end_column || end_column != current.column_index {
        return None;
    }

    let grid = context.grid;
    let row = grid.rows.get(current.row_index)?;
    let last_row = grid.rows.len().checked_sub(1)? as i64;
    let start_row = row_index_by_time(snapshot.starts(), grid).clamp(0, last_row) as usize;
    let top = grid.rows[start_row].top;

    let render = snapshot.render();
    let height = grid.row_height().max(row.top - top);
    let end = resized_end(snapshot, current, grid)?;

    log::trace!(
        "Resize preview for {:?}: row {} height {:.2}",
        snapshot.cid(),
        current.row_index,
        height
    );

    Some(DragPreview {
        kind: DragKind::Resize,
        guide: DragGuide {
            top,
            left: render.left,
            width: render.width,
            height,
        },
        start: snapshot.starts(),
        end,
    })
}

/// New end time when dropped over the column holding the event's end.
pub fn commit(snapshot: &EventUIModel, current: GridPosition, context: &DragContext<'_>) -> Option<EventChange> {
    let (_, end_column) = event_columns(snapshot, context.columns)?;
    if current.column_index != end_column {
        log::debug!(
            "Resize of {:?} dropped on column {} instead of {}",
            snapshot.cid(),
            current.column_index,
            end_column
        );
        return None;
    }

    let end = resized_end(snapshot, current, context.grid)?;
    if end == snapshot.ends() {
        return None;
    }

    Some(EventChange::for_model(snapshot.model(), snapshot.starts(), end))
}
