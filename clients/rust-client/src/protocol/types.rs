use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Anything held in a synchronized collection, keyed by its server-assigned id.
pub trait Record: Clone + Send + Sync + 'static {
    /// `None` until the store has assigned an identity.
    fn id(&self) -> Option<i64>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(default)]
    pub id: Option<i64>,
    pub number: String,
    pub from_city: String,
    pub to_city: String,
    pub departure: DateTime<FixedOffset>,
    pub arrival: DateTime<FixedOffset>,
    /// Seats still available on the flight.
    pub passenger_count: i32,
    pub ticket_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Record for Flight {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default)]
    pub id: Option<i64>,
    /// Reference to a flight; the booking does not own it.
    pub flight_id: i64,
    pub passenger_count: i32,
    /// Server-assigned; older servers omit it, which reads as `PENDING`.
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Record for Booking {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

/// Server-computed aggregate over all bookings. Replaced wholesale on refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingStatistics {
    #[serde(alias = "bookingCount")]
    pub total_bookings: u64,
    pub pending_bookings: u64,
    pub confirmed_bookings: u64,
    pub cancelled_bookings: u64,
    pub completed_bookings: u64,
    #[serde(alias = "totalPassengerCount")]
    pub total_passengers: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_passenger_count: Option<f64>,
}

impl BookingStatistics {
    /// Booking count for a single status.
    pub fn count(&self, status: BookingStatus) -> u64 {
        match status {
            BookingStatus::Pending => self.pending_bookings,
            BookingStatus::Confirmed => self.confirmed_bookings,
            BookingStatus::Cancelled => self.cancelled_bookings,
            BookingStatus::Completed => self.completed_bookings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flight_from_server_json() {
        let flight: Flight = serde_json::from_value(json!({
            "id": 7,
            "number": "SU100",
            "fromCity": "NYC",
            "toCity": "LA",
            "departure": "2025-03-01T10:00:00+03:00",
            "arrival": "2025-03-01T14:30:00+03:00",
            "passengerCount": 120,
            "ticketPrice": 199.99,
            "createdAt": "2025-02-01T09:15:30.123456",
            "updatedAt": "2025-02-01T09:15:30"
        }))
        .unwrap();

        assert_eq!(flight.id(), Some(7));
        assert_eq!(flight.from_city, "NYC");
        assert_eq!(flight.departure.offset().local_minus_utc(), 3 * 3600);
        assert!(flight.created_at.is_some());
    }

    #[test]
    fn test_booking_without_status_reads_as_pending() {
        let booking: Booking = serde_json::from_value(json!({
            "id": 10,
            "flightId": 5,
            "passengerCount": 2
        }))
        .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.created_at.is_none());
    }

    #[test]
    fn test_booking_status_wire_names() {
        let booking: Booking = serde_json::from_value(json!({
            "id": 1,
            "flightId": 5,
            "passengerCount": 2,
            "status": "CANCELLED"
        }))
        .unwrap();
        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert_eq!(serde_json::to_value(BookingStatus::Completed).unwrap(), json!("COMPLETED"));
    }

    #[test]
    fn test_null_id_is_none() {
        let booking: Booking = serde_json::from_value(json!({
            "id": null,
            "flightId": 5,
            "passengerCount": 1,
            "status": "PENDING"
        }))
        .unwrap();
        assert_eq!(booking.id(), None);
    }

    #[test]
    fn test_statistics_partial_payload() {
        let stats: BookingStatistics = serde_json::from_value(json!({
            "totalBookings": 4,
            "confirmedBookings": 3,
            "totalPassengers": 9
        }))
        .unwrap();

        assert_eq!(stats.total_bookings, 4);
        assert_eq!(stats.count(BookingStatus::Confirmed), 3);
        assert_eq!(stats.count(BookingStatus::Pending), 0);
        assert!(stats.average_passenger_count.is_none());
    }

    #[test]
    fn test_statistics_from_booking_service_payload() {
        let stats: BookingStatistics = serde_json::from_value(json!({
            "averagePassengerCount": 2.25,
            "totalPassengerCount": 9,
            "bookingCount": 4
        }))
        .unwrap();

        assert_eq!(stats.total_bookings, 4);
        assert_eq!(stats.total_passengers, 9);
        assert_eq!(stats.average_passenger_count, Some(2.25));
        assert_eq!(stats.count(BookingStatus::Pending), 0);
    }
}
