//! Pointer pixel coordinates to grid cells.

use crate::models::grid::{ContainerBounds, GridPosition, PointerPosition, TimeGridData};
use crate::utils::date::is_weekend_index;

use super::{column_lefts, column_widths};

/// Anything able to map a pointer to a grid cell. `None` means the pointer is
/// outside the grid.
#[cfg_attr(test, mockall::automock)]
pub trait GridPositionSource {
    fn grid_position(&self, pointer: PointerPosition) -> Option<GridPosition>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridPositionConfig {
    pub row_count: usize,
    pub column_count: usize,
    pub container: ContainerBounds,
    pub narrow_weekend: bool,
    /// 0 = Sunday
    pub start_day_of_week: u8,
}

/// Maps pointer coordinates onto a grid of `row_count` uniform rows and
/// day columns whose widths follow the narrow-weekend rule.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPositionFinder {
    row_count: usize,
    container: ContainerBounds,
    /// Column left edges in percent of the container width
    lefts: Vec<f64>,
}

impl GridPositionFinder {
    pub fn new(config: GridPositionConfig) -> Self {
        let weekends: Vec<bool> = (0..config.column_count)
            .map(|index| is_weekend_index(((usize::from(config.start_day_of_week) + index) % 7) as u8))
            .collect();
        let widths = column_widths(&weekends, config.narrow_weekend);

        Self {
            row_count: config.row_count,
            container: config.container,
            lefts: column_lefts(&widths),
        }
    }

    /// Finder agreeing exactly with an already built grid
    pub fn for_grid(grid: &TimeGridData, container: ContainerBounds) -> Self {
        Self {
            row_count: grid.rows.len(),
            container,
            lefts: grid.columns.iter().map(|column| column.left).collect(),
        }
    }

    pub fn container(&self) -> ContainerBounds {
        self.container
    }

    pub fn find(&self, pointer: PointerPosition) -> Option<GridPosition> {
        if self.container.is_empty() || self.row_count == 0 || self.lefts.is_empty() {
            return None;
        }

        let x = pointer.x - self.container.left;
        let y = pointer.y - self.container.top;
        if !(0.0..=self.container.width).contains(&x) || !(0.0..=self.container.height).contains(&y) {
            return None;
        }

        let x_percent = x * 100.0 / self.container.width;
        let column_index = self.lefts.iter().rposition(|left| *left <= x_percent)?;

        let row = (y * self.row_count as f64 / self.container.height).floor() as usize;
        let row_index = row.min(self.row_count - 1);

        Some(GridPosition::new(column_index, row_index))
    }
}

impl GridPositionSource for GridPositionFinder {
    fn grid_position(&self, pointer: PointerPosition) -> Option<GridPosition> {
        self.find(pointer)
    }
}
