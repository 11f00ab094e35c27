//! Flightdesk
//!
//! Client-side synchronization layer for the flight management and ticket
//! booking services. Each record kind gets a synchronization module that owns
//! an observable collection, a loading flag and an error slot, and applies
//! local changes only after the remote store confirmed them.
//!
//! ```rust,no_run
//! use flightdesk::{Config, SyncContext};
//! use flightdesk_client::BookingCreate;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let context = SyncContext::from_config(&Config::default())?;
//!
//!     context.bookings.fetch_all().await;
//!     let booking = BookingCreate { flight_id: 5, passenger_count: 2 };
//!     if context.bookings.create_booking(&booking).await.is_none() {
//!         eprintln!("{:?}", context.bookings.bookings().error());
//!     }
//!     println!("{:?}", context.bookings.statistics());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod sync;

pub use config::Config;
pub use error::{SyncError, SyncResult};
pub use sync::{BookingSync, Collection, CollectionState, CsvExporter, FlightSync, Statistics};

use flightdesk_client::RecordStoreBuilder;

/// Both synchronization modules, created once and handed to every consumer.
pub struct SyncContext {
    pub flights: FlightSync,
    pub bookings: BookingSync,
}

impl SyncContext {
    pub fn from_config(config: &Config) -> SyncResult<Self> {
        let exporter = match &config.export_dir {
            Some(dir) => CsvExporter::new(dir),
            None => CsvExporter::default(),
        };

        let flights = store_builder(&config.flight_url, config.timeout_ms).build_flight_store()?;
        let bookings =
            store_builder(&config.booking_url, config.timeout_ms).build_booking_store()?;

        Ok(Self {
            flights: FlightSync::new(flights, exporter.clone()),
            bookings: BookingSync::new(bookings, exporter),
        })
    }
}

fn store_builder(url: &str, timeout_ms: Option<u64>) -> RecordStoreBuilder {
    let builder = RecordStoreBuilder::new(url);
    match timeout_ms {
        Some(ms) => builder.timeout_ms(ms),
        None => builder,
    }
}
