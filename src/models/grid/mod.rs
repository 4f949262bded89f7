// Grid module
// Time grid geometry, pointer coordinates and selections

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

/// Cell index inside a time grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridPosition {
    pub column_index: usize,
    pub row_index: usize,
}

impl GridPosition {
    pub fn new(column_index: usize, row_index: usize) -> Self {
        Self {
            column_index,
            row_index,
        }
    }
}

/// Pointer coordinates in the same space as [`ContainerBounds`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen rectangle of the time grid container
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ContainerBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// One horizontal time slice, `top`/`height` in percent of the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGridRow {
    pub top: f64,
    pub height: f64,
    pub start_time: NaiveTime,
    /// Slice end; the last slice of a full day ends at 00:00 of the next day
    pub end_time: NaiveTime,
}

/// One day column, `left`/`width` in percent of the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridColumn {
    pub date: NaiveDate,
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeGridData {
    pub rows: Vec<TimeGridRow>,
    pub columns: Vec<GridColumn>,
}

impl TimeGridData {
    /// Height of one slice in percent; grids have uniform rows
    pub fn row_height(&self) -> f64 {
        self.rows.first().map(|row| row.height).unwrap_or(0.0)
    }

    /// Duration of one slice
    pub fn row_duration(&self) -> Duration {
        self.rows
            .first()
            .map(|row| {
                let span = row.end_time - row.start_time;
                if span <= Duration::zero() {
                    span + Duration::days(1)
                } else {
                    span
                }
            })
            .unwrap_or_else(Duration::zero)
    }

    /// Hour of the first row, used to index rows by time
    pub fn start_time(&self) -> Option<NaiveTime> {
        self.rows.first().map(|row| row.start_time)
    }
}

/// A rectangular selection of grid cells, normalized so the start precedes
/// the end in reading order (columns first, then rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSelectionData {
    pub start_row_index: usize,
    pub end_row_index: usize,
    pub start_column_index: usize,
    pub end_column_index: usize,
}

/// The part of a [`GridSelectionData`] that falls inside one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSelection {
    pub start_row_index: usize,
    pub end_row_index: usize,
    pub is_starting_column: bool,
    pub is_selecting_multiple_columns: bool,
}
