//! Flightdesk record store client
//!
//! Typed HTTP access to the flight management and ticket booking services.
//! Every operation is a single request; request bodies are built from typed
//! form builders that list exactly the fields they send.
//!
//! # Example
//!
//! ```rust,no_run
//! use flightdesk_client::{FlightQuery, RecordStoreBuilder, DEFAULT_FLIGHT_URL};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), flightdesk_client::ClientError> {
//!     let flights = RecordStoreBuilder::new(DEFAULT_FLIGHT_URL)
//!         .timeout_ms(10_000)
//!         .build_flight_store()?;
//!
//!     let query = FlightQuery {
//!         from_city: Some("NYC".to_string()),
//!         ..Default::default()
//!     };
//!     for flight in flights.query(&query).await? {
//!         println!("{} {} -> {}", flight.number, flight.from_city, flight.to_city);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod protocol;

pub use client::{
    BookingStore, FlightStore, HttpClient, RecordStoreBuilder, BOOKINGS_CSV, DEFAULT_BOOKING_URL,
    DEFAULT_FLIGHT_URL, FLIGHTS_CSV,
};
pub use protocol::{
    Booking, BookingCreate, BookingQuery, BookingStatistics, BookingStatus, BookingUpdate,
    ClientError, DeleteRequest, Flight, FlightCreate, FlightQuery, FlightUpdate, FormRequest,
    Record, QUERY_DATETIME_FORMAT,
};
