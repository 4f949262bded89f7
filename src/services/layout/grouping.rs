//! Partition of sorted events into clusters connected by overlap.

use crate::models::event::EventId;

use super::collision::{events_collide, Collidable};

/// Identities of events transitively connected by pairwise collisions
pub type CollisionGroup = Vec<EventId>;

/// Group events (sorted ascending by start) in one linear pass.
///
/// Each event joins the group of the most recently processed event it collides
/// with. An event bridging two earlier groups therefore lands in the later one;
/// the earlier groups are not merged.
pub fn group<T: Collidable>(events: &[T], use_travel_buffer: bool) -> Vec<CollisionGroup> {
    let mut groups: Vec<CollisionGroup> = Vec::new();
    let mut group_of: Vec<usize> = Vec::with_capacity(events.len());

    for (index, event) in events.iter().enumerate() {
        let found = events[..index]
            .iter()
            .rposition(|previous| events_collide(event, previous, use_travel_buffer))
            .map(|previous_index| group_of[previous_index]);

        match found {
            Some(group_index) => {
                groups[group_index].push(event.event_id());
                group_of.push(group_index);
            }
            None => {
                groups.push(vec![event.event_id()]);
                group_of.push(groups.len() - 1);
            }
        }
    }

    log::trace!(
        "Grouped {} events into {} collision groups",
        events.len(),
        groups.len()
    );

    groups
}
