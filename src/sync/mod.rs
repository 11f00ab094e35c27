//! Synchronization modules
//!
//! One module per record kind keeps an observable local collection consistent
//! with its remote record store:
//!
//! - [`FlightSync`] for flights
//! - [`BookingSync`] for bookings, which also mirrors booking statistics
//!
//! Both follow the same rules: one store call per operation, local mutation
//! strictly after the call succeeded, and failures collapsed into a single
//! human readable message in the module's error slot.

pub mod bookings;
pub mod collection;
pub mod export;
pub mod flights;
pub mod statistics;

pub use bookings::BookingSync;
pub use collection::{Collection, CollectionState, QueryGuard};
pub use export::CsvExporter;
pub use flights::FlightSync;
pub use statistics::Statistics;
