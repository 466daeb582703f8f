//! Loading guest lists from local files or URLs.

use anyhow::{Context, Result};
use std::path::Path;

use crate::fetch::{BasicClient, HttpClient, auth::ApiKey, fetch_bytes};
use crate::parser::{parse_guest_csv, parse_ticket_json};
use crate::passenger::Passenger;

/// Environment variable holding a bearer token for HTTP guest lists.
pub const TOKEN_VAR: &str = "GUEST_LIST_TOKEN";

/// How a source's contents are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    GuestCsv,
    TicketJson,
}

impl SourceFormat {
    /// `.json` sources hold ticket extraction output; everything else is CSV.
    pub fn detect(source: &str) -> Self {
        let path = source.split(['?', '#']).next().unwrap_or(source);
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::TicketJson,
            _ => SourceFormat::GuestCsv,
        }
    }
}

/// Reads a guest list from a local file path or fetches it over HTTP.
#[tracing::instrument]
pub async fn read_source(source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        match std::env::var(TOKEN_VAR) {
            Ok(token) => fetch_with(&ApiKey::bearer(BasicClient::new(), &token)?, source).await,
            Err(_) => fetch_with(&BasicClient::new(), source).await,
        }
    } else {
        std::fs::read(source).with_context(|| format!("reading guest list '{source}'"))
    }
}

async fn fetch_with<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    fetch_bytes(client, url)
        .await
        .with_context(|| format!("fetching guest list '{url}'"))
}

/// Parses raw source bytes, numbering passengers after `offset`.
pub fn parse_source(bytes: &[u8], format: SourceFormat, offset: usize) -> Result<Vec<Passenger>> {
    match format {
        SourceFormat::GuestCsv => parse_guest_csv(bytes, offset),
        SourceFormat::TicketJson => {
            let text = std::str::from_utf8(bytes).context("ticket JSON is not UTF-8")?;
            parse_ticket_json(text, offset)
        }
    }
}

/// Reads every source in order and appends their passengers into one list.
pub async fn load_passengers(sources: &[String]) -> Result<Vec<Passenger>> {
    let mut passengers = Vec::new();

    for source in sources {
        let bytes = read_source(source).await?;
        let batch = parse_source(&bytes, SourceFormat::detect(source), passengers.len())
            .with_context(|| format!("parsing guest list '{source}'"))?;

        tracing::info!(source = %source, added = batch.len(), "Guest list loaded");
        passengers.extend(batch);
    }

    Ok(passengers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(SourceFormat::detect("guests.csv"), SourceFormat::GuestCsv);
        assert_eq!(SourceFormat::detect("tickets.JSON"), SourceFormat::TicketJson);
        assert_eq!(
            SourceFormat::detect("https://example.com/tickets.json?dl=1"),
            SourceFormat::TicketJson
        );
        assert_eq!(SourceFormat::detect("export"), SourceFormat::GuestCsv);
    }

    #[test]
    fn test_parse_source_rejects_non_utf8_json() {
        assert!(parse_source(&[0xFF, 0xFE], SourceFormat::TicketJson, 0).is_err());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_passengers(&["/nonexistent/guests.csv".to_string()]).await;
        assert!(result.is_err());
    }
}
