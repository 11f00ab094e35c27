mod booking;
mod builder;
mod flight;
mod http_client;

pub use booking::{BookingStore, BOOKINGS_CSV};
pub use builder::{RecordStoreBuilder, DEFAULT_BOOKING_URL, DEFAULT_FLIGHT_URL};
pub use flight::{FlightStore, FLIGHTS_CSV};
pub use http_client::HttpClient;
