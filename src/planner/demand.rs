use crate::config::PlannerConfig;
use crate::passenger::{DateKey, Direction, Passenger, events_for};
use crate::planner::grouping::cluster;

/// Number of drivers needed to cover every resolved `direction` event on `date`.
///
/// Groups never exceed vehicle capacity, so each group takes exactly one driver.
pub fn drivers_needed(
    passengers: &[Passenger],
    date: DateKey,
    direction: Direction,
    config: &PlannerConfig,
) -> usize {
    let events = events_for(passengers, direction)
        .into_iter()
        .filter(|e| e.date == date)
        .collect();

    cluster(events, config).len()
}
