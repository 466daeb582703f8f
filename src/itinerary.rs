//! Day-by-day transport itinerary for export.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::passenger::{DateKey, Direction, Passenger};
use crate::planner::{DaySummary, DriverAssignment, UNASSIGNED};

/// A single pickup or dropoff on the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub passenger_id: String,
    pub name: String,
    pub location: String,
    pub time: NaiveDateTime,
    pub driver: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryDay {
    pub date: DateKey,
    pub drivers_needed: usize,
    pub pickups: Vec<Stop>,
    pub dropoffs: Vec<Stop>,
}

/// Complete schedule, serialized as the export document.
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    pub generated_at: DateTime<Utc>,
    pub days: Vec<ItineraryDay>,
}

/// Lays out every summarized day's pickups and dropoffs in time order,
/// each tagged with the driver covering it.
pub fn build_itinerary(
    passengers: &[Passenger],
    days: &[DaySummary],
    assignment: &DriverAssignment,
) -> Itinerary {
    let days = days
        .iter()
        .map(|day| ItineraryDay {
            date: day.date,
            drivers_needed: day.drivers_needed,
            pickups: stops(passengers, day.date, Direction::Arrival, assignment),
            dropoffs: stops(passengers, day.date, Direction::Departure, assignment),
        })
        .collect();

    Itinerary {
        generated_at: Utc::now(),
        days,
    }
}

fn stops(
    passengers: &[Passenger],
    date: DateKey,
    direction: Direction,
    assignment: &DriverAssignment,
) -> Vec<Stop> {
    let mut stops: Vec<Stop> = passengers
        .iter()
        .filter_map(|p| {
            let event = p.event(direction).filter(|e| e.date == date)?;
            let driver = assignment
                .driver_for_event(&p.id, direction)
                .map(|d| d.to_string())
                .unwrap_or_else(|| UNASSIGNED.to_string());

            Some(Stop {
                passenger_id: p.id.clone(),
                name: p.name.clone(),
                location: event.location,
                time: event.at,
                driver,
            })
        })
        .collect();

    stops.sort_by_key(|s| s.time);
    stops
}
