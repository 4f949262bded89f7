//! Drag selections over empty time grid cells.

use chrono::{Duration, NaiveDateTime};

use crate::models::grid::{ColumnSelection, GridPosition, GridSelectionData, TimeGridData};

/// Normalize a selection so it reads forward from start to end, columns first
pub fn sort_selection(init: GridPosition, current: GridPosition) -> GridSelectionData {
    let reversed = init.column_index > current.column_index
        || (init.column_index == current.column_index && init.row_index > current.row_index);
    let (start, end) = if reversed { (current, init) } else { (init, current) };

    GridSelectionData {
        start_row_index: start.row_index,
        end_row_index: end.row_index,
        start_column_index: start.column_index,
        end_column_index: end.column_index,
    }
}

/// Rows of `column_index` covered by the selection. The first column runs from
/// the start row downwards, middle columns are fully covered and the last
/// column runs from the top to the end row.
pub fn column_selection(
    selection: &GridSelectionData,
    column_index: usize,
    row_count: usize,
) -> Option<ColumnSelection> {
    if row_count == 0
        || column_index < selection.start_column_index
        || column_index > selection.end_column_index
    {
        return None;
    }

    let last_row = row_count - 1;
    let is_starting_column = column_index == selection.start_column_index;
    let is_ending_column = column_index == selection.end_column_index;
    let is_selecting_multiple_columns = selection.start_column_index != selection.end_column_index;

    let start_row_index = if is_starting_column {
        selection.start_row_index
    } else {
        0
    };
    let end_row_index = if is_ending_column {
        selection.end_row_index
    } else {
        last_row
    };

    Some(ColumnSelection {
        start_row_index: start_row_index.min(last_row),
        end_row_index: end_row_index.min(last_row),
        is_starting_column,
        is_selecting_multiple_columns,
    })
}

/// Start and end instants a selection covers on `grid`
pub fn selection_time_range(
    selection: &GridSelectionData,
    grid: &TimeGridData,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start_column = grid.columns.get(selection.start_column_index)?;
    let end_column = grid.columns.get(selection.end_column_index)?;
    let start_row = grid.rows.get(selection.start_row_index)?;
    let end_row = grid.rows.get(selection.end_row_index)?;

    let start = start_column.date.and_time(start_row.start_time);
    let mut end = end_column.date.and_time(end_row.end_time);
    if end_row.end_time <= end_row.start_time {
        end += Duration::days(1);
    }

    Some((start, end))
}
