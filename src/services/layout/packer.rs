//! First-fit column assignment within a collision group.

use std::collections::HashMap;

use crate::models::event::EventId;

use super::collision::{events_collide, Collidable};
use super::grouping::CollisionGroup;

/// Rows of cells; `matrix[row][column]` is an event or an empty slot.
pub type PlacementMatrix<T> = Vec<Vec<Option<T>>>;
/// One matrix per collision group
pub type PlacementMatrix3D<T> = Vec<PlacementMatrix<T>>;

/// Index of the last row holding an event in `column`
pub fn last_row_in_column<T>(matrix: &PlacementMatrix<T>, column: usize) -> Option<usize> {
    matrix
        .iter()
        .rposition(|row| matches!(row.get(column), Some(Some(_))))
}

/// Number of columns the group needs; the widest row decides.
pub fn column_count<T>(matrix: &PlacementMatrix<T>) -> usize {
    matrix.iter().map(Vec::len).max().unwrap_or(0)
}

/// Occupied cells as `(row, column, event)`, in row order
pub fn occupied_cells<T>(matrix: &PlacementMatrix<T>) -> impl Iterator<Item = (usize, usize, &T)> {
    matrix.iter().enumerate().flat_map(|(row_index, row)| {
        row.iter()
            .enumerate()
            .filter_map(move |(column_index, cell)| cell.as_ref().map(|event| (row_index, column_index, event)))
    })
}

/// Build one placement matrix per group.
///
/// Each event goes into the leftmost column whose last occupant it does not
/// collide with, one row below that occupant; an empty column takes it at row 0.
/// Ids missing from `events` are skipped.
pub fn pack<T>(events: &[T], groups: &[CollisionGroup], use_travel_buffer: bool) -> PlacementMatrix3D<T>
where
    T: Collidable + Clone,
{
    let by_id: HashMap<EventId, &T> = events.iter().map(|event| (event.event_id(), event)).collect();

    groups
        .iter()
        .map(|group| {
            let mut matrix: PlacementMatrix<T> = vec![Vec::new()];

            for id in group {
                let Some(event) = by_id.get(id).copied() else {
                    log::warn!("Collision group references unknown event {:?}", id);
                    continue;
                };

                let mut column = 0;
                loop {
                    let target_row = match last_row_in_column(&matrix, column) {
                        None => Some(0),
                        Some(row) => match &matrix[row][column] {
                            Some(occupant) if events_collide(event, occupant, use_travel_buffer) => None,
                            _ => Some(row + 1),
                        },
                    };

                    if let Some(row) = target_row {
                        place(&mut matrix, row, column, event.clone());
                        break;
                    }
                    column += 1;
                }
            }

            matrix
        })
        .collect()
}

fn place<T>(matrix: &mut PlacementMatrix<T>, row: usize, column: usize, event: T) {
    if matrix.len() <= row {
        matrix.resize_with(row + 1, Vec::new);
    }

    let cells = &mut matrix[row];
    if cells.len() <= column {
        cells.resize_with(column + 1, || None);
    }
    cells[column] = Some(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{Event, EventModel};
    use crate::services::layout::grouping::group;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn model(start: (u32, u32), end: (u32, u32)) -> EventModel {
        EventModel::new(Event::new("", at(start.0, start.1), at(end.0, end.1))).unwrap()
    }

    fn ids(matrix: &PlacementMatrix<EventModel>) -> Vec<Vec<Option<EventId>>> {
        matrix
            .iter()
            .map(|row| row.iter().map(|cell| cell.as_ref().map(|e| e.cid())).collect())
            .collect()
    }

    #[test]
    fn test_overlap_uses_two_columns() {
        let a = model((9, 0), (10, 0));
        let b = model((9, 30), (10, 30));
        let c = model((11, 0), (12, 0));
        let events = vec![a.clone(), b.clone(), c.clone()];
        let matrices = pack(&events, &group(&events, false), false);

        assert_eq!(matrices.len(), 2);
        assert_eq!(ids(&matrices[0]), vec![vec![Some(a.cid()), Some(b.cid())]]);
        assert_eq!(ids(&matrices[1]), vec![vec![Some(c.cid())]]);
        assert_eq!(column_count(&matrices[0]), 2);
    }

    #[test]
    fn test_reuses_column_below_finished_event() {
        let a = model((9, 0), (10, 0));
        let b = model((9, 30), (11, 0));
        let c = model((10, 0), (10, 30));
        let events = vec![a.clone(), b.clone(), c.clone()];
        let matrices = pack(&events, &group(&events, false), false);

        assert_eq!(matrices.len(), 1);
        assert_eq!(
            ids(&matrices[0]),
            vec![
                vec![Some(a.cid()), Some(b.cid())],
                vec![Some(c.cid())],
            ]
        );
    }

    #[test]
    fn test_gap_left_in_earlier_row() {
        // c lands in column 1 below b while column 0 of row 1 stays empty
        let a = model((9, 0), (12, 0));
        let b = model((9, 0), (9, 30));
        let c = model((10, 0), (11, 0));
        let events = vec![a.clone(), b.clone(), c.clone()];
        let matrices = pack(&events, &group(&events, false), false);

        assert_eq!(
            ids(&matrices[0]),
            vec![
                vec![Some(a.cid()), Some(b.cid())],
                vec![None, Some(c.cid())],
            ]
        );
        assert_eq!(last_row_in_column(&matrices[0], 0), Some(0));
        assert_eq!(last_row_in_column(&matrices[0], 1), Some(1));
        assert_eq!(last_row_in_column(&matrices[0], 2), None);
    }

    #[test]
    fn test_every_grouped_event_is_placed_once() {
        let events: Vec<EventModel> = (0..6)
            .map(|i| model((9 + i / 2, (i % 2) * 30), (11 + i / 2, 0)))
            .collect();
        let groups = group(&events, false);
        let matrices = pack(&events, &groups, false);

        let placed: usize = matrices.iter().map(|m| occupied_cells(m).count()).sum();
        assert_eq!(placed, events.len());
    }

    #[test]
    fn test_unknown_id_is_skipped() {
        let a = model((9, 0), (10, 0));
        let stray = model((9, 0), (10, 0));
        let matrices = pack(&[a.clone()], &[vec![a.cid(), stray.cid()]], false);
        assert_eq!(ids(&matrices[0]), vec![vec![Some(a.cid())]]);
    }
}
