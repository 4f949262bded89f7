// Property-based tests for the layout pipeline and grid geometry
// Random events and pointers checked against the layout invariants

use std::collections::HashSet;
use std::sync::Arc;

use calendar_layout::models::event::{Event, EventModel};
use calendar_layout::models::grid::{ContainerBounds, GridPosition, PointerPosition};
use calendar_layout::models::ui::EventUIModel;
use calendar_layout::services::drag::move_event;
use calendar_layout::services::grid::position::{GridPositionConfig, GridPositionFinder};
use calendar_layout::services::grid::{column_widths, create_week_grid};
use calendar_layout::services::layout::collision::events_collide;
use calendar_layout::services::layout::grouping::group;
use calendar_layout::services::layout::packer::{occupied_cells, pack};
use calendar_layout::models::settings::LayoutSettings;
use calendar_layout::utils::time::percent;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn model(start_minute: i64, duration_minutes: i64) -> EventModel {
    let start = base() + Duration::minutes(start_minute);
    let event = Event::new("generated", start, start + Duration::minutes(duration_minutes));
    EventModel::new(event).unwrap()
}

/// Events sorted ascending by start
fn sorted_events(spans: Vec<(i64, i64)>) -> Vec<EventModel> {
    let mut events: Vec<EventModel> = spans.into_iter().map(|(s, d)| model(s, d)).collect();
    events.sort_by_key(|e| e.start());
    events
}

fn spans() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..1380, 0i64..240), 0..25)
}

proptest! {
    /// Property: a lone pair is grouped together exactly when it collides
    #[test]
    fn prop_pair_grouping_matches_collision(a in (0i64..1380, 0i64..240), b in (0i64..1380, 0i64..240)) {
        let events = sorted_events(vec![a, b]);
        let groups = group(&events, false);
        let collide = events_collide(&events[0], &events[1], false);

        prop_assert_eq!(groups.len(), if collide { 1 } else { 2 });
    }

    /// Property: colliding events always share a group
    #[test]
    fn prop_colliding_events_share_group(spans in spans()) {
        let events = sorted_events(spans);
        let groups = group(&events, false);

        let group_index = |event: &EventModel| {
            groups.iter().position(|g| g.contains(&event.cid())).unwrap()
        };

        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                if events_collide(a, b, false) {
                    prop_assert_eq!(group_index(a), group_index(b));
                }
            }
        }
    }

    /// Property: every event is packed into exactly one cell
    #[test]
    fn prop_packing_places_each_event_once(spans in spans(), use_travel in any::<bool>()) {
        let events = sorted_events(spans);
        let groups = group(&events, use_travel);
        let matrices = pack(&events, &groups, use_travel);

        let mut seen = HashSet::new();
        let mut cells = HashSet::new();
        for (m, matrix) in matrices.iter().enumerate() {
            for (row, column, event) in occupied_cells(matrix) {
                prop_assert!(seen.insert(event.cid()), "event placed twice");
                prop_assert!(cells.insert((m, row, column)));
            }
        }
        prop_assert_eq!(seen.len(), events.len());
    }

    /// Property: percent is 0 at the start, 100 at the end and never decreases
    #[test]
    fn prop_percent_bounds_and_monotonic(
        window in 1i64..10_000,
        a in -5_000i64..15_000,
        b in -5_000i64..15_000,
    ) {
        let start = base();
        let end = start + Duration::minutes(window);

        prop_assert_eq!(percent(start, start, end), 0.0);
        prop_assert_eq!(percent(end, start, end), 100.0);

        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = percent(start + Duration::minutes(lo), start, end);
        let p_hi = percent(start + Duration::minutes(hi), start, end);
        prop_assert!(p_lo <= p_hi);
        prop_assert!((0.0..=100.0).contains(&p_lo));
    }

    /// Property: column widths always sum to 100
    #[test]
    fn prop_column_widths_sum_to_100(
        weekends in prop::collection::vec(any::<bool>(), 1..10),
        narrow in any::<bool>(),
    ) {
        let total: f64 = column_widths(&weekends, narrow).iter().sum();
        prop_assert!((total - 100.0).abs() < 1e-9);
    }

    /// Property: pointers inside the container always map to a valid cell
    #[test]
    fn prop_inside_pointer_maps_to_cell(
        x in 0.0f64..=700.0,
        y in 0.0f64..=960.0,
        columns in 1usize..=7,
        narrow in any::<bool>(),
        start_day in 0u8..7,
    ) {
        let finder = GridPositionFinder::new(GridPositionConfig {
            row_count: 48,
            column_count: columns,
            container: ContainerBounds::new(0.0, 0.0, 700.0, 960.0),
            narrow_weekend: narrow,
            start_day_of_week: start_day,
        });

        let position = finder.find(PointerPosition::new(x, y));
        prop_assert!(position.is_some());
        let position = position.unwrap();
        prop_assert!(position.column_index < columns);
        prop_assert!(position.row_index < 48);
    }

    /// Property: dropping a moved event where it was picked up changes nothing
    #[test]
    fn prop_zero_delta_move_is_idempotent(
        start in 0i64..1380,
        duration in 0i64..240,
        column in 0usize..7,
        row in 0usize..48,
    ) {
        let grid = create_week_grid(base().date(), &LayoutSettings::default());
        let ui = EventUIModel::new(Arc::new(model(start, duration)));
        let position = GridPosition::new(column, row);

        prop_assert!(move_event::commit(&ui, Some(position), position, &grid).is_none());
        let preview = move_event::preview(&ui, Some(position), position, &grid).unwrap();
        prop_assert_eq!(preview.start, ui.starts());
        prop_assert_eq!(preview.end, ui.ends());
    }
}
