//! Typed form bodies for every record store operation.
//!
//! Each request type lists exactly the fields it sends. Query types only
//! send "truthy" values: empty strings and zero numbers are left out so the
//! store treats them as unset filters.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};

/// Format of the range bounds accepted by the flight query endpoint.
pub const QUERY_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A request that is submitted as `application/x-www-form-urlencoded` fields.
pub trait FormRequest {
    fn form_fields(&self) -> Vec<(&'static str, String)>;
}

fn instant(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Default)]
struct Fields(Vec<(&'static str, String)>);

impl Fields {
    fn put(mut self, name: &'static str, value: impl ToString) -> Self {
        self.0.push((name, value.to_string()));
        self
    }

    fn text(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.put(name, v),
            _ => self,
        }
    }

    fn int(self, name: &'static str, value: Option<i64>) -> Self {
        match value {
            Some(v) if v != 0 => self.put(name, v),
            _ => self,
        }
    }

    fn price(self, name: &'static str, value: Option<f64>) -> Self {
        match value {
            Some(v) if v != 0.0 => self.put(name, v),
            _ => self,
        }
    }

    fn moment(self, name: &'static str, value: Option<&NaiveDateTime>) -> Self {
        match value {
            Some(v) => self.put(name, v.format(QUERY_DATETIME_FORMAT)),
            None => self,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightCreate {
    pub number: String,
    pub from_city: String,
    pub to_city: String,
    pub departure: DateTime<FixedOffset>,
    pub arrival: DateTime<FixedOffset>,
    pub passenger_count: i32,
    pub ticket_price: f64,
}

impl FormRequest for FlightCreate {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .put("number", &self.number)
            .put("fromCity", &self.from_city)
            .put("toCity", &self.to_city)
            .put("departure", instant(&self.departure))
            .put("arrival", instant(&self.arrival))
            .put("passengerCount", self.passenger_count)
            .put("ticketPrice", self.ticket_price)
            .0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightUpdate {
    pub id: i64,
    pub number: String,
    pub from_city: String,
    pub to_city: String,
    pub departure: DateTime<FixedOffset>,
    pub arrival: DateTime<FixedOffset>,
    pub ticket_price: f64,
    /// Capacity change; sent only when set.
    pub passenger_count: Option<i32>,
}

impl FormRequest for FlightUpdate {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        let fields = Fields::default()
            .put("id", self.id)
            .put("number", &self.number)
            .put("fromCity", &self.from_city)
            .put("toCity", &self.to_city)
            .put("departure", instant(&self.departure))
            .put("arrival", instant(&self.arrival))
            .put("ticketPrice", self.ticket_price);

        match self.passenger_count {
            Some(count) => fields.put("passengerCount", count).0,
            None => fields.0,
        }
    }
}

/// Filter for the flight query endpoint. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightQuery {
    pub number: Option<String>,
    pub from_city: Option<String>,
    pub to_city: Option<String>,
    pub departure_min: Option<NaiveDateTime>,
    pub departure_max: Option<NaiveDateTime>,
    pub arrival_min: Option<NaiveDateTime>,
    pub arrival_max: Option<NaiveDateTime>,
    pub passenger_count_min: Option<i32>,
    pub passenger_count_max: Option<i32>,
    pub ticket_price_min: Option<f64>,
    pub ticket_price_max: Option<f64>,
}

impl FormRequest for FlightQuery {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .text("number", self.number.as_deref())
            .text("fromCity", self.from_city.as_deref())
            .text("toCity", self.to_city.as_deref())
            .moment("departureMin", self.departure_min.as_ref())
            .moment("departureMax", self.departure_max.as_ref())
            .moment("arrivalMin", self.arrival_min.as_ref())
            .moment("arrivalMax", self.arrival_max.as_ref())
            .int("passengerCountMin", self.passenger_count_min.map(i64::from))
            .int("passengerCountMax", self.passenger_count_max.map(i64::from))
            .price("ticketPriceMin", self.ticket_price_min)
            .price("ticketPriceMax", self.ticket_price_max)
            .0
    }
}

/// New booking. Id and status are assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingCreate {
    pub flight_id: i64,
    pub passenger_count: i32,
}

impl FormRequest for BookingCreate {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .put("flightId", self.flight_id)
            .put("passengerCount", self.passenger_count)
            .0
    }
}

/// Only the passenger count of a booking can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingUpdate {
    pub id: i64,
    pub passenger_count: i32,
}

impl FormRequest for BookingUpdate {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .put("id", self.id)
            .put("passengerCount", self.passenger_count)
            .0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingQuery {
    pub id: Option<i64>,
    pub flight_id: Option<i64>,
    pub passenger_count: Option<i32>,
}

impl FormRequest for BookingQuery {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .int("id", self.id)
            .int("flightId", self.flight_id)
            .int("passengerCount", self.passenger_count.map(i64::from))
            .0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: i64,
}

impl FormRequest for DeleteRequest {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default().put("id", self.id).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn names(fields: &[(&'static str, String)]) -> Vec<&'static str> {
        fields.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_flight_create_sends_every_field() {
        let create = FlightCreate {
            number: "SU100".to_string(),
            from_city: "NYC".to_string(),
            to_city: "LA".to_string(),
            departure: at("2025-03-01T10:00:00+03:00"),
            arrival: at("2025-03-01T14:30:00Z"),
            passenger_count: 150,
            ticket_price: 249.5,
        };

        let fields = create.form_fields();
        assert_eq!(
            names(&fields),
            vec!["number", "fromCity", "toCity", "departure", "arrival", "passengerCount", "ticketPrice"]
        );
        assert_eq!(fields[3].1, "2025-03-01T10:00:00+03:00");
        assert_eq!(fields[4].1, "2025-03-01T14:30:00Z");
        assert_eq!(fields[5].1, "150");
        assert_eq!(fields[6].1, "249.5");
    }

    #[test]
    fn test_flight_update_optional_capacity() {
        let mut update = FlightUpdate {
            id: 3,
            number: "SU100".to_string(),
            from_city: "NYC".to_string(),
            to_city: "LA".to_string(),
            departure: at("2025-03-01T10:00:00Z"),
            arrival: at("2025-03-01T12:00:00Z"),
            ticket_price: 100.0,
            passenger_count: None,
        };
        assert!(!names(&update.form_fields()).contains(&"passengerCount"));
        assert_eq!(update.form_fields()[0], ("id", "3".to_string()));

        update.passenger_count = Some(80);
        assert!(update.form_fields().contains(&("passengerCount", "80".to_string())));
    }

    #[test]
    fn test_empty_query_sends_nothing() {
        assert!(FlightQuery::default().form_fields().is_empty());
        assert!(BookingQuery::default().form_fields().is_empty());
    }

    #[test]
    fn test_query_skips_falsy_values() {
        let query = FlightQuery {
            number: Some(String::new()),
            from_city: Some("NYC".to_string()),
            passenger_count_min: Some(0),
            passenger_count_max: Some(200),
            ticket_price_min: Some(0.0),
            departure_min: NaiveDate::from_ymd_opt(2025, 3, 1)
                .and_then(|d| d.and_hms_opt(8, 30, 0)),
            ..Default::default()
        };

        assert_eq!(
            query.form_fields(),
            vec![
                ("fromCity", "NYC".to_string()),
                ("departureMin", "2025-03-01T08:30".to_string()),
                ("passengerCountMax", "200".to_string()),
            ]
        );
    }

    #[test]
    fn test_booking_requests_send_only_their_fields() {
        let create = BookingCreate { flight_id: 5, passenger_count: 2 };
        assert_eq!(
            create.form_fields(),
            vec![("flightId", "5".to_string()), ("passengerCount", "2".to_string())]
        );

        let update = BookingUpdate { id: 10, passenger_count: 4 };
        assert_eq!(
            update.form_fields(),
            vec![("id", "10".to_string()), ("passengerCount", "4".to_string())]
        );

        let query = BookingQuery { id: None, flight_id: Some(5), passenger_count: Some(0) };
        assert_eq!(query.form_fields(), vec![("flightId", "5".to_string())]);

        assert_eq!(DeleteRequest { id: 3 }.form_fields(), vec![("id", "3".to_string())]);
    }
}
