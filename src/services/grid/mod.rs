// Time grid service
// Builds rows and day columns for week and day time grids

pub mod position;
pub mod selection;

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::models::grid::{GridColumn, TimeGridData, TimeGridRow};
use crate::models::settings::LayoutSettings;
use crate::utils::date::{get_week_dates, is_weekend};

/// Relative width of a weekend column when narrow weekends apply
pub const NARROW_WEEKEND_WEIGHT: f64 = 0.5;

/// Narrow weekends only shrink columns when more than five days are shown
pub fn narrow_weekend_applies(narrow_weekend: bool, column_count: usize) -> bool {
    narrow_weekend && column_count > 5
}

/// Column widths in percent; `weekends[i]` marks column `i` as a weekend day.
/// The widths sum to 100 for any non-empty input.
pub fn column_widths(weekends: &[bool], narrow_weekend: bool) -> Vec<f64> {
    let narrow = narrow_weekend_applies(narrow_weekend, weekends.len());
    let weights: Vec<f64> = weekends
        .iter()
        .map(|&weekend| if narrow && weekend { NARROW_WEEKEND_WEIGHT } else { 1.0 })
        .collect();
    let total: f64 = weights.iter().sum();

    if total <= 0.0 {
        return Vec::new();
    }

    weights.iter().map(|weight| weight * 100.0 / total).collect()
}

/// Running sum of widths: the left edge of each column
pub fn column_lefts(widths: &[f64]) -> Vec<f64> {
    widths
        .iter()
        .scan(0.0, |left, width| {
            let current = *left;
            *left += width;
            Some(current)
        })
        .collect()
}

fn create_rows(settings: &LayoutSettings) -> Vec<TimeGridRow> {
    let steps = settings.row_count();
    if steps == 0 {
        return Vec::new();
    }

    let base_height = 100.0 / steps as f64;
    let slot = i64::from(settings.slot_minutes);
    let first_minute = i64::from(settings.hour_start) * 60;

    (0..steps)
        .map(|index| {
            let start_minute = first_minute + index as i64 * slot;
            TimeGridRow {
                top: base_height * index as f64,
                height: base_height,
                start_time: NaiveTime::MIN + Duration::minutes(start_minute),
                end_time: NaiveTime::MIN + Duration::minutes(start_minute + slot),
            }
        })
        .collect()
}

fn create_columns(dates: &[NaiveDate], narrow_weekend: bool) -> Vec<GridColumn> {
    let weekends: Vec<bool> = dates.iter().map(|date| is_weekend(*date)).collect();
    let widths = column_widths(&weekends, narrow_weekend);
    let lefts = column_lefts(&widths);

    dates
        .iter()
        .zip(widths.iter().zip(lefts.iter()))
        .map(|(date, (width, left))| GridColumn {
            date: *date,
            left: *left,
            width: *width,
        })
        .collect()
}

/// Grid for an explicit list of dates
pub fn create_time_grid_data(dates: &[NaiveDate], settings: &LayoutSettings) -> TimeGridData {
    TimeGridData {
        rows: create_rows(settings),
        columns: create_columns(dates, settings.effective_narrow_weekend()),
    }
}

/// Grid for the week view containing `render_date`
pub fn create_week_grid(render_date: NaiveDate, settings: &LayoutSettings) -> TimeGridData {
    let dates = get_week_dates(render_date, settings.start_day_of_week, settings.workweek);
    create_time_grid_data(&dates, settings)
}

/// Grid for a single-day view
pub fn create_day_grid(date: NaiveDate, settings: &LayoutSettings) -> TimeGridData {
    create_time_grid_data(&[date], settings)
}
