use serde::Serialize;

use crate::config::PlannerConfig;
use crate::passenger::{Direction, Passenger, events_for};
use crate::planner::grouping::cluster;
use crate::planner::types::{DriverId, DriverRun, PassengerLabel, UNASSIGNED};

/// Concrete driver runs for one planning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriverAssignment {
    runs: Vec<DriverRun>,
}

impl DriverAssignment {
    pub fn runs(&self) -> &[DriverRun] {
        &self.runs
    }

    pub fn driver_count(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// First driver, in numbering order, covering any leg of the passenger.
    pub fn driver_for(&self, passenger_id: &str) -> Option<DriverId> {
        self.runs
            .iter()
            .find(|run| run.group.contains(passenger_id))
            .map(|run| run.driver)
    }

    /// Driver covering one specific leg of the passenger.
    pub fn driver_for_event(&self, passenger_id: &str, direction: Direction) -> Option<DriverId> {
        self.runs
            .iter()
            .filter(|run| run.group.direction == direction)
            .find(|run| run.group.contains(passenger_id))
            .map(|run| run.driver)
    }

    pub fn label_for(&self, passenger_id: &str) -> String {
        self.driver_for(passenger_id)
            .map(|d| d.to_string())
            .unwrap_or_else(|| UNASSIGNED.to_string())
    }

    /// Per-passenger driver labels, in input order.
    pub fn labels(&self, passengers: &[Passenger]) -> Vec<PassengerLabel> {
        passengers
            .iter()
            .map(|p| PassengerLabel {
                passenger_id: p.id.clone(),
                name: p.name.clone(),
                assigned_driver: self.label_for(&p.id),
            })
            .collect()
    }
}

/// Hands every arrival group, then every departure group, to a fresh driver.
///
/// Numbering restarts at `Driver-1` on every call, so repeated calls on the
/// same passengers give identical results.
#[tracing::instrument(skip_all, fields(passengers = passengers.len()))]
pub fn assign(passengers: &[Passenger], config: &PlannerConfig) -> DriverAssignment {
    let runs: Vec<DriverRun> = Direction::ALL
        .into_iter()
        .flat_map(|direction| cluster(events_for(passengers, direction), config))
        .enumerate()
        .map(|(i, group)| DriverRun {
            driver: DriverId(i as u32 + 1),
            group,
        })
        .collect();

    tracing::debug!(drivers = runs.len(), "Drivers assigned");
    DriverAssignment { runs }
}
