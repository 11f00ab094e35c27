mod error;
mod form;
mod types;

pub use error::ClientError;
pub use form::{
    BookingCreate, BookingQuery, BookingUpdate, DeleteRequest, FlightCreate, FlightQuery,
    FlightUpdate, FormRequest, QUERY_DATETIME_FORMAT,
};
pub use types::{Booking, BookingStatistics, BookingStatus, Flight, Record};
