use crate::planner::assignment::DriverAssignment;
use crate::planner::types::{DaySummary, PlanOverview};

/// How many of the busiest days the overview lists.
const BUSIEST_DAYS: usize = 2;

/// Rolls day summaries and an assignment up into headline figures.
pub fn overview(days: &[DaySummary], assignment: &DriverAssignment) -> PlanOverview {
    let totals: Vec<f64> = days.iter().map(|d| d.total_passengers as f64).collect();

    let mut by_load: Vec<&DaySummary> = days.iter().collect();
    by_load.sort_by(|a, b| {
        b.total_passengers
            .cmp(&a.total_passengers)
            .then(a.date.cmp(&b.date))
    });

    PlanOverview {
        days: days.len(),
        first_date: days.iter().map(|d| d.date).min(),
        last_date: days.iter().map(|d| d.date).max(),
        peak_drivers: days.iter().map(|d| d.drivers_needed).max().unwrap_or(0),
        average_passengers_per_day: mean(&totals).round() as u64,
        busiest_days: by_load.iter().take(BUSIEST_DAYS).map(|d| d.date).collect(),
        drivers_assigned: assignment.driver_count(),
    }
}

/// Arithmetic mean; 0.0 for empty input.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
