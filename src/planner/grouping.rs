//! Time-windowed, capacity-bounded clustering of passenger events.
//!
//! This is the only grouping routine in the crate. Demand estimation counts
//! its groups and assignment hands each group to a driver, so both always agree.

use chrono::{NaiveDateTime, TimeDelta};
use std::collections::BTreeMap;

use crate::config::PlannerConfig;
use crate::passenger::{DateKey, Direction, PassengerEvent};
use crate::planner::types::Group;

type PartitionKey = (DateKey, String, Direction);

/// Clusters events into vehicle loads.
///
/// Events are partitioned by date, location and direction. Inside a partition
/// they are visited in ascending time order (ties keep input order), and each
/// joins the first open group, by creation order, whose anchor lies within
/// the configured window. A group stops accepting members at `capacity`; an
/// event no open group can take anchors a new one. Groups never re-anchor.
///
/// Partitions come out in ascending `(date, location, direction)` order and
/// groups within a partition in creation order.
pub fn cluster(events: Vec<PassengerEvent>, config: &PlannerConfig) -> Vec<Group> {
    let mut partitions: BTreeMap<PartitionKey, Vec<PassengerEvent>> = BTreeMap::new();
    for event in events {
        partitions
            .entry((event.date, event.location.clone(), event.direction))
            .or_default()
            .push(event);
    }

    let window = config.window();
    let mut groups = Vec::new();

    for ((date, location, direction), mut partition) in partitions {
        partition.sort_by_key(|e| e.at);
        let before = groups.len();
        cluster_partition(partition, config.capacity, window, &mut groups);
        tracing::trace!(
            %date,
            location = %location,
            %direction,
            groups = groups.len() - before,
            "Partition clustered"
        );
    }

    groups
}

fn cluster_partition(
    events: Vec<PassengerEvent>,
    capacity: usize,
    window: TimeDelta,
    groups: &mut Vec<Group>,
) {
    let start = groups.len();

    for event in events {
        let slot = groups[start..]
            .iter()
            .position(|g| g.len() < capacity && gap(event.at, g.anchor) <= window);

        match slot {
            Some(i) => groups[start + i].members.push(event),
            None => groups.push(Group::anchored_at(event)),
        }
    }
}

fn gap(a: NaiveDateTime, b: NaiveDateTime) -> TimeDelta {
    if a >= b { a - b } else { b - a }
}
