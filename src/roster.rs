//! Searchable, sortable passenger list with driver labels.

use clap::ValueEnum;
use serde::Serialize;
use std::cmp::Ordering;

use crate::passenger::Passenger;
use crate::planner::{DriverAssignment, DriverId, UNASSIGNED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Name,
    Arrival,
    Departure,
    ArrivalLocation,
    DepartureLocation,
    Driver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A passenger with the driver that covers them, if any.
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry<'a> {
    pub passenger: &'a Passenger,
    pub driver: Option<DriverId>,
}

impl RosterEntry<'_> {
    pub fn driver_label(&self) -> String {
        self.driver
            .map(|d| d.to_string())
            .unwrap_or_else(|| UNASSIGNED.to_string())
    }

    fn matches(&self, needle: &str) -> bool {
        let p = self.passenger;
        let contains = |s: &str| s.to_lowercase().contains(needle);

        contains(p.name.as_str())
            || p.arrival.location.as_deref().is_some_and(contains)
            || p.departure.location.as_deref().is_some_and(contains)
    }
}

/// Pairs every passenger with its driver label, in input order.
pub fn roster<'a>(passengers: &'a [Passenger], assignment: &DriverAssignment) -> Vec<RosterEntry<'a>> {
    passengers
        .iter()
        .map(|passenger| RosterEntry {
            passenger,
            driver: assignment.driver_for(&passenger.id),
        })
        .collect()
}

/// Keeps entries whose name or either location contains `term`,
/// ignoring case. An empty term keeps everything.
pub fn search<'a>(entries: Vec<RosterEntry<'a>>, term: &str) -> Vec<RosterEntry<'a>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return entries;
    }
    entries.into_iter().filter(|e| e.matches(&needle)).collect()
}

/// Stable sort; unknown values come first when ascending.
pub fn sort(entries: &mut [RosterEntry<'_>], key: SortKey, order: SortOrder) {
    entries.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

fn compare(a: &RosterEntry<'_>, b: &RosterEntry<'_>, key: SortKey) -> Ordering {
    let (pa, pb) = (a.passenger, b.passenger);
    match key {
        SortKey::Name => pa.name.to_lowercase().cmp(&pb.name.to_lowercase()),
        SortKey::Arrival => pa.arrival.time.cmp(&pb.arrival.time),
        SortKey::Departure => pa.departure.time.cmp(&pb.departure.time),
        SortKey::ArrivalLocation => pa.arrival.location.cmp(&pb.arrival.location),
        SortKey::DepartureLocation => pa.departure.location.cmp(&pb.departure.location),
        SortKey::Driver => a.driver.cmp(&b.driver),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::passenger::Leg;
    use crate::planner::assign;

    fn passengers() -> Vec<Passenger> {
        vec![
            Passenger::new(
                "p1",
                "Grace Hopper",
                Leg::parse("2024-06-01 11:00", "Central Station"),
                Leg::default(),
            ),
            Passenger::new(
                "p2",
                "ada lovelace",
                Leg::parse("2024-06-01 09:00", "Airport A"),
                Leg::parse("2024-06-02 09:00", "Airport B"),
            ),
            Passenger::new("p3", "Alan Turing", Leg::default(), Leg::default()),
        ]
    }

    fn ids(entries: &[RosterEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.passenger.id.clone()).collect()
    }

    #[test]
    fn test_roster_labels() {
        let passengers = passengers();
        let assignment = assign(&passengers, &PlannerConfig::default());
        let entries = roster(&passengers, &assignment);

        let labels: Vec<_> = entries.iter().map(|e| e.driver_label()).collect();
        assert_eq!(labels, vec!["Driver-2", "Driver-1", "Unassigned"]);
    }

    #[test]
    fn test_search_name_and_locations() {
        let passengers = passengers();
        let assignment = DriverAssignment::default();

        let hits = search(roster(&passengers, &assignment), "ADA");
        assert_eq!(ids(&hits), vec!["p2"]);

        let hits = search(roster(&passengers, &assignment), "airport b");
        assert_eq!(ids(&hits), vec!["p2"]);

        let hits = search(roster(&passengers, &assignment), "station");
        assert_eq!(ids(&hits), vec!["p1"]);

        let hits = search(roster(&passengers, &assignment), "  ");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let passengers = passengers();
        let mut entries = roster(&passengers, &DriverAssignment::default());

        sort(&mut entries, SortKey::Name, SortOrder::Ascending);
        assert_eq!(ids(&entries), vec!["p2", "p3", "p1"]);

        sort(&mut entries, SortKey::Name, SortOrder::Descending);
        assert_eq!(ids(&entries), vec!["p1", "p3", "p2"]);
    }

    #[test]
    fn test_sort_by_arrival_unknown_first() {
        let passengers = passengers();
        let mut entries = roster(&passengers, &DriverAssignment::default());

        sort(&mut entries, SortKey::Arrival, SortOrder::Ascending);
        assert_eq!(ids(&entries), vec!["p3", "p2", "p1"]);
    }

    #[test]
    fn test_sort_by_driver() {
        let passengers = passengers();
        let assignment = assign(&passengers, &PlannerConfig::default());
        let mut entries = roster(&passengers, &assignment);

        sort(&mut entries, SortKey::Driver, SortOrder::Descending);
        assert_eq!(ids(&entries), vec!["p1", "p2", "p3"]);
    }
}
