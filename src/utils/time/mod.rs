//! Conversion between wall-clock instants and vertical percentages of a time
//! window.
//!
//! Callers guarantee `end > start`; an empty window is not handled here.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Vertical extent of a block inside a window, both values in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct VerticalSpan {
    pub top: f64,
    pub height: f64,
}

/// Position of `time` inside `[start, end]` as a percentage in `0..=100`.
pub fn percent(time: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    debug_assert!(end > start, "time window must not be empty");

    let clamped = time.clamp(start, end);
    let elapsed = (clamped - start).num_milliseconds() as f64;
    let total = (end - start).num_milliseconds() as f64;

    (elapsed * 100.0 / total).clamp(0.0, 100.0)
}

pub fn span(
    from: NaiveDateTime,
    to: NaiveDateTime,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> VerticalSpan {
    let top = percent(from, start, end);
    let bottom = percent(to, start, end);

    VerticalSpan {
        top,
        height: bottom - top,
    }
}
