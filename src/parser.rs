//! Guest list ingestion.
//!
//! Two inputs are understood: guest-list spreadsheets exported as CSV, and the
//! JSON a ticket extraction service returns for scanned travel documents.
//! Both turn into [`Passenger`] records with ids `passenger-N`, numbered from
//! `offset + 1` so several sources can be appended to one list.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::passenger::{Leg, Passenger, is_unresolved};

const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct GuestRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    arrival_date: String,
    #[serde(default)]
    arrival_location: String,
    #[serde(default)]
    departure_date: String,
    #[serde(default)]
    departure_location: String,
}

/// One passenger as reported by the ticket extraction service. The source
/// city and time describe arrival at the event, the destination ones the
/// trip home. Missing and `null` fields are both unresolved.
#[derive(Debug, Deserialize)]
struct TicketInfo {
    #[serde(default)]
    person_name: Option<String>,
    #[serde(default)]
    person_source_city: Option<String>,
    #[serde(default)]
    person_source_time: Option<String>,
    #[serde(default)]
    person_destination_time: Option<String>,
    #[serde(default)]
    person_destination_city: Option<String>,
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TicketPayload {
    Many(Vec<TicketInfo>),
    One(TicketInfo),
}

fn passenger_id(offset: usize, index: usize) -> String {
    format!("passenger-{}", offset + index + 1)
}

fn display_name(raw: &str) -> String {
    if is_unresolved(raw) {
        UNKNOWN_NAME.to_string()
    } else {
        raw.trim().to_string()
    }
}

/// Parses a guest-list CSV with the headers `name`, `arrival_date`,
/// `arrival_location`, `departure_date` and `departure_location`.
///
/// Any column may be missing, blank or cut short on a ragged row; affected
/// legs are left unresolved.
///
/// # Errors
///
/// Returns an error if the bytes are not readable as CSV.
pub fn parse_guest_csv(bytes: &[u8], offset: usize) -> Result<Vec<Passenger>> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let mut passengers = Vec::new();
    for (index, row) in rdr.deserialize::<GuestRow>().enumerate() {
        let row = row.with_context(|| format!("reading guest row {}", index + 1))?;
        passengers.push(Passenger::new(
            passenger_id(offset, index),
            display_name(&row.name),
            Leg::parse(&row.arrival_date, &row.arrival_location),
            Leg::parse(&row.departure_date, &row.departure_location),
        ));
    }

    tracing::debug!(count = passengers.len(), "Guest CSV parsed");
    Ok(passengers)
}

/// Parses ticket extraction output: a JSON array of passengers, or a single
/// object. Markdown code fences and zero-width characters around the JSON are
/// tolerated.
///
/// # Errors
///
/// Returns an error if the cleaned text is not valid ticket JSON.
pub fn parse_ticket_json(text: &str, offset: usize) -> Result<Vec<Passenger>> {
    let cleaned = clean_extracted_json(text);
    let payload: TicketPayload =
        serde_json::from_str(&cleaned).context("parsing ticket extraction output")?;

    let tickets = match payload {
        TicketPayload::Many(tickets) => tickets,
        TicketPayload::One(ticket) => vec![ticket],
    };

    let passengers: Vec<_> = tickets
        .into_iter()
        .enumerate()
        .map(|(index, t)| {
            Passenger::new(
                passenger_id(offset, index),
                display_name(field(&t.person_name)),
                Leg::parse(field(&t.person_source_time), field(&t.person_source_city)),
                Leg::parse(
                    field(&t.person_destination_time),
                    field(&t.person_destination_city),
                ),
            )
        })
        .collect();

    tracing::debug!(count = passengers.len(), "Ticket JSON parsed");
    Ok(passengers)
}

fn clean_extracted_json(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .chars()
        .filter(|c| !matches!(*c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        .collect::<String>()
        .trim()
        .to_string()
}
