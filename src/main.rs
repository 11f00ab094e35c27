use chrono::{DateTime, FixedOffset, NaiveDateTime};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::*;
use flightdesk::{Collection, Config, SyncContext};
use flightdesk_client::{
    BookingCreate, BookingQuery, BookingUpdate, FlightCreate, FlightQuery, FlightUpdate, Record,
    QUERY_DATETIME_FORMAT,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "flightdesk")]
#[command(about = "Query and edit flights and bookings on the remote record stores", long_about = None)]
struct Args {
    /// Directory containing flightdesk.toml and an optional .env
    #[arg(short, long, default_value = ".")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flight record store operations
    #[command(subcommand)]
    Flights(FlightCommand),

    /// Booking record store operations
    #[command(subcommand)]
    Bookings(BookingCommand),

    /// Write the effective configuration to flightdesk.toml
    Init,
}

#[derive(Subcommand, Debug)]
enum FlightCommand {
    /// Query flights (filters are optional)
    List(FlightFilter),
    /// Load every flight
    All,
    /// Create a flight
    Create(FlightFields),
    /// Update a flight
    Update {
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        fields: FlightFields,
    },
    /// Delete a flight
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Download flights.csv into the export directory
    Export,
    /// Upload a CSV file of flights
    Import {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(ClapArgs, Debug)]
struct FlightFilter {
    #[arg(long)]
    number: Option<String>,
    #[arg(long)]
    from_city: Option<String>,
    #[arg(long)]
    to_city: Option<String>,
    /// Earliest departure, e.g. 2025-03-01T08:00
    #[arg(long, value_parser = parse_query_time)]
    departure_min: Option<NaiveDateTime>,
    #[arg(long, value_parser = parse_query_time)]
    departure_max: Option<NaiveDateTime>,
    #[arg(long, value_parser = parse_query_time)]
    arrival_min: Option<NaiveDateTime>,
    #[arg(long, value_parser = parse_query_time)]
    arrival_max: Option<NaiveDateTime>,
    #[arg(long)]
    passenger_count_min: Option<i32>,
    #[arg(long)]
    passenger_count_max: Option<i32>,
    #[arg(long)]
    ticket_price_min: Option<f64>,
    #[arg(long)]
    ticket_price_max: Option<f64>,
}

impl From<FlightFilter> for FlightQuery {
    fn from(f: FlightFilter) -> Self {
        FlightQuery {
            number: f.number,
            from_city: f.from_city,
            to_city: f.to_city,
            departure_min: f.departure_min,
            departure_max: f.departure_max,
            arrival_min: f.arrival_min,
            arrival_max: f.arrival_max,
            passenger_count_min: f.passenger_count_min,
            passenger_count_max: f.passenger_count_max,
            ticket_price_min: f.ticket_price_min,
            ticket_price_max: f.ticket_price_max,
        }
    }
}

#[derive(ClapArgs, Debug)]
struct FlightFields {
    #[arg(long)]
    number: String,
    #[arg(long)]
    from_city: String,
    #[arg(long)]
    to_city: String,
    /// RFC 3339, e.g. 2025-03-01T10:00:00+03:00
    #[arg(long, value_parser = parse_instant)]
    departure: DateTime<FixedOffset>,
    #[arg(long, value_parser = parse_instant)]
    arrival: DateTime<FixedOffset>,
    /// Required on create, optional on update
    #[arg(long)]
    passenger_count: Option<i32>,
    #[arg(long)]
    ticket_price: f64,
}

#[derive(Subcommand, Debug)]
enum BookingCommand {
    /// Query bookings (filters are optional)
    List {
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        flight_id: Option<i64>,
        #[arg(long)]
        passenger_count: Option<i32>,
    },
    /// Load every booking and the statistics
    All,
    /// Book seats on a flight
    Create {
        #[arg(long)]
        flight_id: i64,
        #[arg(long)]
        passenger_count: i32,
    },
    /// Change the passenger count of a booking
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        passenger_count: i32,
    },
    /// Cancel a booking
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Show booking statistics
    Stats,
    /// Download bookings.csv into the export directory
    Export,
    /// Upload a CSV file of bookings
    Import {
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn parse_instant(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("expected RFC 3339 time: {}", e))
}

fn parse_query_time(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, QUERY_DATETIME_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM: {}", e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flightdesk=info,flightdesk_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load(&args.config_dir)?;

    if let Command::Init = args.command {
        config.save(&args.config_dir)?;
        eprintln!("{} {}", "✓ Configuration written to".green(), args.config_dir.display());
        return Ok(());
    }

    let context = SyncContext::from_config(&config)?;
    match args.command {
        Command::Flights(command) => run_flights(&context, command).await,
        Command::Bookings(command) => run_bookings(&context, command).await,
        Command::Init => Ok(()),
    }
}

async fn run_flights(context: &SyncContext, command: FlightCommand) -> anyhow::Result<()> {
    let sync = &context.flights;

    match command {
        FlightCommand::List(filter) => {
            sync.fetch_flights(Some(&filter.into())).await;
            print_records(sync.flights())?;
        }
        FlightCommand::All => {
            sync.fetch_all().await;
            print_records(sync.flights())?;
        }
        FlightCommand::Create(fields) => {
            let Some(passenger_count) = fields.passenger_count else {
                anyhow::bail!("--passenger-count is required when creating a flight");
            };
            let flight = FlightCreate {
                number: fields.number,
                from_city: fields.from_city,
                to_city: fields.to_city,
                departure: fields.departure,
                arrival: fields.arrival,
                passenger_count,
                ticket_price: fields.ticket_price,
            };
            if let Some(created) = sync.create_flight(&flight).await {
                print_json(&created)?;
            }
        }
        FlightCommand::Update { id, fields } => {
            let flight = FlightUpdate {
                id,
                number: fields.number,
                from_city: fields.from_city,
                to_city: fields.to_city,
                departure: fields.departure,
                arrival: fields.arrival,
                ticket_price: fields.ticket_price,
                passenger_count: fields.passenger_count,
            };
            if let Some(updated) = sync.update_flight(&flight).await {
                print_json(&updated)?;
            }
        }
        FlightCommand::Delete { id } => sync.delete_flight(id).await,
        FlightCommand::Export => {
            if let Some(path) = sync.export_csv().await {
                eprintln!("{} {}", "✓ Export written to".green(), path.display());
            }
        }
        FlightCommand::Import { file } => {
            if sync.import_csv(&file).await {
                eprintln!("{} {}", "✓ Imported".green(), file.display());
                print_records(sync.flights())?;
            }
        }
    }

    check_error(sync.flights())
}

async fn run_bookings(context: &SyncContext, command: BookingCommand) -> anyhow::Result<()> {
    let sync = &context.bookings;

    match command {
        BookingCommand::List {
            id,
            flight_id,
            passenger_count,
        } => {
            let query = BookingQuery {
                id,
                flight_id,
                passenger_count,
            };
            sync.fetch_bookings(Some(&query)).await;
            print_records(sync.bookings())?;
        }
        BookingCommand::All => {
            sync.fetch_all().await;
            print_records(sync.bookings())?;
            print_statistics(context)?;
        }
        BookingCommand::Create {
            flight_id,
            passenger_count,
        } => {
            let booking = BookingCreate {
                flight_id,
                passenger_count,
            };
            if let Some(created) = sync.create_booking(&booking).await {
                print_json(&created)?;
            }
        }
        BookingCommand::Update { id, passenger_count } => {
            let booking = BookingUpdate { id, passenger_count };
            if let Some(updated) = sync.update_booking(&booking).await {
                print_json(&updated)?;
            }
        }
        BookingCommand::Delete { id } => sync.delete_booking(id).await,
        BookingCommand::Stats => {
            sync.fetch_statistics().await;
            print_statistics(context)?;
        }
        BookingCommand::Export => {
            if let Some(path) = sync.export_csv().await {
                eprintln!("{} {}", "✓ Export written to".green(), path.display());
            }
        }
        BookingCommand::Import { file } => {
            if sync.import_csv(&file).await {
                eprintln!("{} {}", "✓ Imported".green(), file.display());
                print_records(sync.bookings())?;
            }
        }
    }

    check_error(sync.bookings())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_records<T: Record + Serialize>(collection: &Collection<T>) -> anyhow::Result<()> {
    let records = collection.records();
    eprintln!(
        "{} {} {}(s)",
        "Loaded".cyan().bold(),
        records.len(),
        collection.kind()
    );
    print_json(&records)
}

fn print_statistics(context: &SyncContext) -> anyhow::Result<()> {
    match context.bookings.statistics() {
        Some(statistics) => print_json(&statistics),
        None => Ok(()),
    }
}

fn check_error<T: Record>(collection: &Collection<T>) -> anyhow::Result<()> {
    match collection.error() {
        Some(message) => {
            eprintln!("{} {}", "Error:".red().bold(), message);
            anyhow::bail!("{} operation failed", collection.kind())
        }
        None => Ok(()),
    }
}
