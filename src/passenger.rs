//! Passenger records and the resolved travel events derived from them.
//!
//! Raw guest data arrives as text: a timestamp and a place for each leg, either of which
//! may be the `"not found"` marker, blank, or unreadable. Everything is resolved here, once,
//! so the planner only ever sees typed instants and [`DateKey`]s.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker written by ingestion collaborators for an unknown time or place.
pub const NOT_FOUND: &str = "not found";

/// Capitalized marker emitted by the ticket extraction service.
const NOT_FOUND_EXTRACTED: &str = "Not found";

/// Accepted wall-clock layouts, tried in order after RFC 3339.
static TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%Y, %I:%M %p",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y, %H:%M",
    "%m/%d/%Y, %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Returns `true` for values that carry no usable information.
pub fn is_unresolved(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw == NOT_FOUND || raw == NOT_FOUND_EXTRACTED
}

/// Parses a collaborator-formatted timestamp into a local wall-clock instant.
///
/// Offsets in RFC 3339 input are dropped; the local time as written is kept. Returns `None`
/// for the not-found marker and for anything unparsable.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if is_unresolved(raw) {
        return None;
    }
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Calendar day used to bucket events into daily plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn of(at: NaiveDateTime) -> Self {
        Self(at.date())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Which leg of a passenger's trip an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Guest arrives and needs a pickup.
    Arrival,
    /// Guest leaves and needs a dropoff.
    Departure,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Arrival, Direction::Departure];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Arrival => f.write_str("pickup"),
            Direction::Departure => f.write_str("dropoff"),
        }
    }
}

/// One leg of a trip. Either half may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub time: Option<NaiveDateTime>,
    pub location: Option<String>,
}

impl Leg {
    pub fn new(time: NaiveDateTime, location: impl Into<String>) -> Self {
        Self {
            time: Some(time),
            location: Some(location.into()),
        }
    }

    /// Builds a leg from raw collaborator text.
    pub fn parse(raw_time: &str, raw_location: &str) -> Self {
        let location = if is_unresolved(raw_location) {
            None
        } else {
            Some(raw_location.trim().to_string())
        };

        Self {
            time: parse_timestamp(raw_time),
            location,
        }
    }

    /// Time and place, when both are known.
    pub fn resolved(&self) -> Option<(NaiveDateTime, &str)> {
        match (self.time, self.location.as_deref()) {
            (Some(time), Some(location)) => Some((time, location)),
            _ => None,
        }
    }

    /// Day of a fully resolved leg.
    pub fn date(&self) -> Option<DateKey> {
        self.resolved().map(|(time, _)| DateKey::of(time))
    }
}

/// A guest as delivered by ingestion. Never modified by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub id: String,
    pub name: String,
    pub arrival: Leg,
    pub departure: Leg,
}

impl Passenger {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arrival: Leg, departure: Leg) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arrival,
            departure,
        }
    }

    pub fn leg(&self, direction: Direction) -> &Leg {
        match direction {
            Direction::Arrival => &self.arrival,
            Direction::Departure => &self.departure,
        }
    }

    /// The resolved event for one direction, if that leg is fully known.
    pub fn event(&self, direction: Direction) -> Option<PassengerEvent> {
        let (at, location) = self.leg(direction).resolved()?;
        Some(PassengerEvent {
            passenger_id: self.id.clone(),
            direction,
            at,
            date: DateKey::of(at),
            location: location.to_string(),
        })
    }

    /// All resolved events of this passenger, arrival first.
    pub fn events(&self) -> impl Iterator<Item = PassengerEvent> + '_ {
        Direction::ALL.into_iter().filter_map(|d| self.event(d))
    }
}

/// A single pickup or dropoff with a known time and place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassengerEvent {
    pub passenger_id: String,
    pub direction: Direction,
    pub at: NaiveDateTime,
    pub date: DateKey,
    pub location: String,
}

/// Collects resolved events of one direction, in passenger order.
pub fn events_for(passengers: &[Passenger], direction: Direction) -> Vec<PassengerEvent> {
    let events: Vec<_> = passengers.iter().filter_map(|p| p.event(direction)).collect();

    let excluded = passengers.len() - events.len();
    if excluded > 0 {
        tracing::debug!(%direction, excluded, "Skipping unresolved passenger legs");
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_parse_locale_timestamp() {
        assert_eq!(
            parse_timestamp("06/01/2024, 09:30 AM"),
            Some(at("2024-06-01 09:30"))
        );
        assert_eq!(
            parse_timestamp("06/01/2024, 02:15 PM"),
            Some(at("2024-06-01 14:15"))
        );
        assert_eq!(
            parse_timestamp("06/01/2024, 14:15"),
            Some(at("2024-06-01 14:15"))
        );
    }

    #[test]
    fn test_parse_iso_timestamps() {
        assert_eq!(parse_timestamp("2024-06-01 09:30"), Some(at("2024-06-01 09:30")));
        assert_eq!(parse_timestamp("2024-06-01T09:30:00"), Some(at("2024-06-01 09:30")));
        assert_eq!(
            parse_timestamp("2024-06-01T09:30:00+02:00"),
            Some(at("2024-06-01 09:30"))
        );
    }

    #[test]
    fn test_unresolved_timestamps() {
        assert_eq!(parse_timestamp(NOT_FOUND), None);
        assert_eq!(parse_timestamp("Not found"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("next tuesday"), None);
    }

    #[test]
    fn test_sentinel_is_case_sensitive() {
        assert!(is_unresolved("not found"));
        assert!(is_unresolved("Not found"));
        assert!(!is_unresolved("NOT FOUND"));
    }

    #[test]
    fn test_leg_requires_time_and_place() {
        let leg = Leg::parse("2024-06-01 09:30", "not found");
        assert_eq!(leg.time, Some(at("2024-06-01 09:30")));
        assert!(leg.resolved().is_none());
        assert!(leg.date().is_none());

        let leg = Leg::parse("garbage", "Airport A");
        assert_eq!(leg.location.as_deref(), Some("Airport A"));
        assert!(leg.resolved().is_none());
    }

    #[test]
    fn test_events_skip_unresolved_legs() {
        let p = Passenger::new(
            "p1",
            "Ada",
            Leg::new(at("2024-06-01 09:30"), "Airport A"),
            Leg::default(),
        );

        let events: Vec<_> = p.events().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].direction, Direction::Arrival);
        assert_eq!(events[0].date.to_string(), "2024-06-01");
        assert!(p.event(Direction::Departure).is_none());
    }

    #[test]
    fn test_date_key_ignores_time_of_day() {
        assert_eq!(
            DateKey::of(at("2024-06-01 00:05")),
            DateKey::of(at("2024-06-01 23:55"))
        );
        assert_ne!(
            DateKey::of(at("2024-06-01 23:55")),
            DateKey::of(at("2024-06-02 00:05"))
        );
    }
}
