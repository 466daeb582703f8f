//! CLI entry point for the shuttle planner.
//!
//! Provides subcommands for the day-by-day driver summary, the concrete
//! driver assignment, a searchable passenger roster and the itinerary export.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use shuttle_planner::config::PlannerConfig;
use shuttle_planner::itinerary::build_itinerary;
use shuttle_planner::output::{print_json, print_pretty, write_csv, write_itinerary};
use shuttle_planner::passenger::Passenger;
use shuttle_planner::planner::{assign, overview, summarize};
use shuttle_planner::publish::{itinerary_key, upload_json_file};
use shuttle_planner::roster::{SortKey, SortOrder, roster, search, sort};
use shuttle_planner::sources::load_passengers;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "shuttle_planner")]
#[command(about = "Plan guest shuttles: group travelers and estimate drivers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PlanArgs {
    /// Guest list files or URLs (CSV, or ticket extraction JSON)
    #[arg(value_name = "FILE_OR_URL", required = true)]
    sources: Vec<String>,

    /// JSON file with planner settings
    #[arg(short, long)]
    config: Option<String>,

    /// Seats per vehicle
    #[arg(long)]
    capacity: Option<usize>,

    /// Grouping window after a group's first traveler, in minutes
    #[arg(long)]
    window_minutes: Option<i64>,

    /// Arrival-to-departure gap that forces separate drivers, in minutes
    #[arg(long)]
    overlap_minutes: Option<i64>,
}

impl PlanArgs {
    fn planner_config(&self) -> Result<PlannerConfig> {
        let base = match &self.config {
            Some(path) => PlannerConfig::load(path)?,
            None => PlannerConfig::default(),
        };
        let config =
            base.with_overrides(self.capacity, self.window_minutes, self.overlap_minutes);
        config.validate()?;
        Ok(config)
    }

    async fn load(&self) -> Result<(Vec<Passenger>, PlannerConfig)> {
        let config = self.planner_config()?;
        let passengers = load_passengers(&self.sources).await?;
        info!(
            passengers = passengers.len(),
            capacity = config.capacity,
            window_minutes = config.window_minutes,
            "Guest list ready"
        );
        Ok((passengers, config))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Per-day pickups, dropoffs and drivers needed
    Summary {
        #[command(flatten)]
        plan: PlanArgs,

        /// CSV file to write the day summary to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Assign a driver to every vehicle load
    Assign {
        #[command(flatten)]
        plan: PlanArgs,

        /// CSV file to write passenger driver labels to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List passengers with their drivers
    Roster {
        #[command(flatten)]
        plan: PlanArgs,

        /// Only show passengers whose name or locations contain this text
        #[arg(short, long)]
        search: Option<String>,

        /// Column to sort by
        #[arg(long, value_enum, default_value_t = SortKey::Name)]
        sort_by: SortKey,

        /// Sort descending
        #[arg(long, default_value_t = false)]
        desc: bool,
    },
    /// Export the day-by-day itinerary as JSON
    Export {
        #[command(flatten)]
        plan: PlanArgs,

        /// File to write the itinerary to
        #[arg(short, long, default_value = "itinerary.json")]
        output: String,

        /// Gzip compress the itinerary file and its S3 upload
        #[arg(long, default_value_t = false)]
        gzip: bool,

        /// Optional: S3 bucket to upload the itinerary to (e.g., "my-bucket")
        #[arg(long)]
        s3_bucket: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/shuttle_planner.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("shuttle_planner.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { plan, output } => {
            let (passengers, config) = plan.load().await?;
            let days = summarize(&passengers, &config);
            let assignment = assign(&passengers, &config);

            for day in &days {
                info!(
                    date = %day.date,
                    pickups = day.pickups,
                    dropoffs = day.dropoffs,
                    total = day.total_passengers,
                    separate_drivers = day.separate_drivers,
                    drivers_needed = day.drivers_needed,
                    "Day"
                );
            }

            let headline = overview(&days, &assignment);
            print_json(&headline)?;

            if let Some(path) = output {
                write_csv(&path, &days)?;
                info!(path = %path, days = days.len(), "Day summary written");
            }
        }
        Commands::Assign { plan, output } => {
            let (passengers, config) = plan.load().await?;
            let assignment = assign(&passengers, &config);
            let labels = assignment.labels(&passengers);

            print_pretty(&assignment);
            info!(
                drivers = assignment.driver_count(),
                passengers = passengers.len(),
                "Drivers assigned based on location and time"
            );

            match output {
                Some(path) => {
                    write_csv(&path, &labels)?;
                    info!(path = %path, "Driver labels written");
                }
                None => print_json(&labels)?,
            }
        }
        Commands::Roster {
            plan,
            search: term,
            sort_by,
            desc,
        } => {
            let (passengers, config) = plan.load().await?;
            let assignment = assign(&passengers, &config);

            let mut entries = search(
                roster(&passengers, &assignment),
                term.as_deref().unwrap_or(""),
            );
            let order = if desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            sort(&mut entries, sort_by, order);

            if entries.is_empty() {
                info!("No results found");
            }
            for entry in &entries {
                let p = entry.passenger;
                info!(
                    id = %p.id,
                    name = %p.name,
                    arrival = ?p.arrival.time,
                    arrival_location = p.arrival.location.as_deref().unwrap_or("-"),
                    departure = ?p.departure.time,
                    departure_location = p.departure.location.as_deref().unwrap_or("-"),
                    driver = %entry.driver_label(),
                    "Passenger"
                );
            }
        }
        Commands::Export {
            plan,
            output,
            gzip,
            s3_bucket,
        } => {
            let (passengers, config) = plan.load().await?;
            let days = summarize(&passengers, &config);
            let assignment = assign(&passengers, &config);
            let itinerary = build_itinerary(&passengers, &days, &assignment);

            let written = write_itinerary(&output, &itinerary, gzip)?;
            info!(path = %written, days = itinerary.days.len(), "Transportation schedule exported");

            if let Some(bucket) = s3_bucket {
                let aws = aws_config::load_from_env().await;
                let s3 = aws_sdk_s3::Client::new(&aws);
                let headline = overview(&days, &assignment);
                let key = itinerary_key(headline.first_date, headline.last_date, gzip);
                upload_json_file(&s3, &bucket, &key, &written, gzip).await?;
            }
        }
    }

    Ok(())
}
