//! Vehicle grouping, driver demand and driver assignment.
//!
//! [`grouping::cluster`] is the single clustering primitive. [`demand`]
//! counts its groups per day and direction, [`summary`] rolls those counts up
//! per day, and [`assignment`] hands each group to a numbered driver.

pub mod assignment;
pub mod demand;
pub mod grouping;
pub mod overview;
pub mod summary;
pub mod types;

pub use assignment::{DriverAssignment, assign};
pub use demand::drivers_needed;
pub use grouping::cluster;
pub use overview::overview;
pub use summary::summarize;
pub use types::{DaySummary, DriverId, DriverRun, Group, PassengerLabel, PlanOverview, UNASSIGNED};
