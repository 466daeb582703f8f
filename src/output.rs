//! Output formatting and persistence for planning results.
//!
//! Supports pretty-printing, JSON logging, CSV tables and the itinerary
//! export file.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::itinerary::Itinerary;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl Debug) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `rows` to a CSV file at `path`, replacing any existing file.
///
/// The header row is derived from the row type's field names.
pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing CSV");

    let file = File::create(path).with_context(|| format!("creating '{path}'"))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the itinerary as JSON to `path`, gzip-compressed when `gzip` is set
/// (a `.gz` suffix is appended). Returns the path actually written.
pub fn write_itinerary(path: &str, itinerary: &Itinerary, gzip: bool) -> Result<String> {
    let body = serde_json::to_vec_pretty(itinerary)?;

    let (bytes, target) = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&body)?;
        (encoder.finish()?, format!("{path}.gz"))
    } else {
        (body, path.to_string())
    };

    if let Some(parent) = Path::new(&target).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&target, &bytes).with_context(|| format!("writing '{target}'"))?;

    info!(path = %target, bytes = bytes.len(), days = itinerary.days.len(), "Itinerary written");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::PassengerLabel;
    use chrono::Utc;
    use flate2::read::GzDecoder;
    use std::env;
    use std::fs;
    use std::io::Read;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn labels() -> Vec<PassengerLabel> {
        vec![
            PassengerLabel {
                passenger_id: "passenger-1".to_string(),
                name: "Ada".to_string(),
                assigned_driver: "Driver-1".to_string(),
            },
            PassengerLabel {
                passenger_id: "passenger-2".to_string(),
                name: "Alan".to_string(),
                assigned_driver: "Unassigned".to_string(),
            },
        ]
    }

    fn empty_itinerary() -> Itinerary {
        Itinerary {
            generated_at: Utc::now(),
            days: vec![],
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&labels());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&labels()).unwrap();
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let path = temp_path("shuttle_planner_test_labels.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &labels()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "passenger_id,name,assigned_driver");
        assert_eq!(lines[2], "passenger-2,Alan,Unassigned");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_replaces_existing_file() {
        let path = temp_path("shuttle_planner_test_replace.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &labels()).unwrap();
        write_csv(&path, &labels()[..1]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_itinerary_plain() {
        let path = temp_path("shuttle_planner_test_itinerary.json");
        let _ = fs::remove_file(&path);

        let written = write_itinerary(&path, &empty_itinerary(), false).unwrap();
        assert_eq!(written, path);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["days"].as_array().unwrap().is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_itinerary_gzip() {
        let path = temp_path("shuttle_planner_test_itinerary_gz.json");
        let written = write_itinerary(&path, &empty_itinerary(), true).unwrap();
        assert!(written.ends_with(".json.gz"));

        let mut decoded = String::new();
        GzDecoder::new(File::open(&written).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert!(decoded.contains("generated_at"));

        fs::remove_file(&written).unwrap();
    }
}
