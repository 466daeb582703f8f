use chrono::TimeDelta;
use std::collections::BTreeSet;

use crate::config::PlannerConfig;
use crate::passenger::{DateKey, Direction, Passenger};
use crate::planner::demand::drivers_needed;
use crate::planner::types::DaySummary;

/// Builds one [`DaySummary`] per day that has at least one resolved event,
/// in ascending date order.
#[tracing::instrument(skip_all, fields(passengers = passengers.len()))]
pub fn summarize(passengers: &[Passenger], config: &PlannerConfig) -> Vec<DaySummary> {
    let dates: BTreeSet<DateKey> = passengers
        .iter()
        .flat_map(|p| [p.arrival.date(), p.departure.date()])
        .flatten()
        .collect();

    dates
        .into_iter()
        .map(|date| summarize_day(passengers, date, config))
        .collect()
}

fn summarize_day(passengers: &[Passenger], date: DateKey, config: &PlannerConfig) -> DaySummary {
    let pickups = passengers
        .iter()
        .filter(|p| p.arrival.date() == Some(date))
        .count();
    let dropoffs = passengers
        .iter()
        .filter(|p| p.departure.date() == Some(date))
        .count();

    let drivers_for_pickups = drivers_needed(passengers, date, Direction::Arrival, config);
    let drivers_for_dropoffs = drivers_needed(passengers, date, Direction::Departure, config);

    let separate_drivers = needs_separate_drivers(passengers, date, config.overlap_gap());
    let drivers = if separate_drivers {
        drivers_for_pickups + drivers_for_dropoffs
    } else {
        drivers_for_pickups.max(drivers_for_dropoffs)
    };

    tracing::debug!(
        %date,
        pickups,
        dropoffs,
        drivers_for_pickups,
        drivers_for_dropoffs,
        separate_drivers,
        drivers_needed = drivers,
        "Day summarized"
    );

    DaySummary {
        date,
        pickups,
        dropoffs,
        total_passengers: pickups + dropoffs,
        drivers_for_pickups,
        drivers_for_dropoffs,
        separate_drivers,
        drivers_needed: drivers,
    }
}

/// True when some guest both arrives and leaves on `date` with the departure
/// no more than `gap` after the arrival. Drivers cannot then be shared
/// between the pickup and dropoff runs.
pub fn needs_separate_drivers(passengers: &[Passenger], date: DateKey, gap: TimeDelta) -> bool {
    passengers.iter().any(|p| {
        match (p.arrival.resolved(), p.departure.resolved()) {
            (Some((arrive, _)), Some((leave, _))) => {
                DateKey::of(arrive) == date && DateKey::of(leave) == date && leave - arrive <= gap
            }
            _ => false,
        }
    })
}
