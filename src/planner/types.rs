//! Data types produced by the planning pipeline.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

use crate::passenger::{DateKey, Direction, PassengerEvent};

/// Label reported for a passenger no driver run covers.
pub const UNASSIGNED: &str = "Unassigned";

/// One vehicle load: guests of the same day, place and direction whose times
/// fall within the window of the first guest placed (the anchor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub date: DateKey,
    pub location: String,
    pub direction: Direction,
    pub anchor: NaiveDateTime,
    pub members: Vec<PassengerEvent>,
}

impl Group {
    pub(crate) fn anchored_at(event: PassengerEvent) -> Self {
        Self {
            date: event.date,
            location: event.location.clone(),
            direction: event.direction,
            anchor: event.at,
            members: vec![event],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, passenger_id: &str) -> bool {
        self.members.iter().any(|m| m.passenger_id == passenger_id)
    }
}

/// Driver identifier, numbered from 1 within a single assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct DriverId(pub(crate) u32);

impl DriverId {
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Driver-{}", self.0)
    }
}

impl From<DriverId> for String {
    fn from(id: DriverId) -> Self {
        id.to_string()
    }
}

/// A driver and the group it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverRun {
    pub driver: DriverId,
    pub group: Group,
}

/// Passenger to driver projection row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassengerLabel {
    pub passenger_id: String,
    pub name: String,
    pub assigned_driver: String,
}

/// Transport demand for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: DateKey,
    pub pickups: usize,
    pub dropoffs: usize,
    pub total_passengers: usize,
    pub drivers_for_pickups: usize,
    pub drivers_for_dropoffs: usize,
    /// Someone arrives and leaves close enough together that the two runs
    /// cannot share drivers.
    pub separate_drivers: bool,
    pub drivers_needed: usize,
}

/// Headline figures across the whole plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanOverview {
    pub days: usize,
    pub first_date: Option<DateKey>,
    pub last_date: Option<DateKey>,
    pub peak_drivers: usize,
    pub average_passengers_per_day: u64,
    pub busiest_days: Vec<DateKey>,
    pub drivers_assigned: usize,
}
