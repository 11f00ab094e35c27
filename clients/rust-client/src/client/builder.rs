use super::{BookingStore, FlightStore, HttpClient};
use crate::protocol::ClientError;
use std::time::Duration;

pub const DEFAULT_FLIGHT_URL: &str = "http://localhost:8081/api/flight";
pub const DEFAULT_BOOKING_URL: &str = "http://localhost:8082/api/booking";

/// Builds a transport for one record store endpoint.
pub struct RecordStoreBuilder {
    base_url: String,
    timeout_ms: Option<u64>,
    pool_idle_timeout_secs: Option<u64>,
    pool_max_idle_per_host: Option<usize>,
}

impl RecordStoreBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_ms: None,
            pool_idle_timeout_secs: None,
            pool_max_idle_per_host: None,
        }
    }

    /// Whole-request timeout enforced by the transport. Unset by default.
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    pub fn pool_idle_timeout_secs(mut self, secs: u64) -> Self {
        self.pool_idle_timeout_secs = Some(secs);
        self
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = Some(max);
        self
    }

    pub fn build(self) -> Result<HttpClient, ClientError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::InvalidRequest(format!(
                "Record store URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(secs) = self.pool_idle_timeout_secs {
            builder = builder.pool_idle_timeout(Duration::from_secs(secs));
        }
        if let Some(max) = self.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(max);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpClient::with_client(&self.base_url, client))
    }

    pub fn build_flight_store(self) -> Result<FlightStore, ClientError> {
        Ok(FlightStore::new(self.build()?))
    }

    pub fn build_booking_store(self) -> Result<BookingStore, ClientError> {
        Ok(BookingStore::new(self.build()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chained() {
        let store = RecordStoreBuilder::new(DEFAULT_FLIGHT_URL)
            .timeout_ms(5000)
            .pool_idle_timeout_secs(30)
            .pool_max_idle_per_host(8)
            .build_flight_store()
            .unwrap();
        assert_eq!(store.http().base_url(), DEFAULT_FLIGHT_URL);
    }

    #[test]
    fn test_builder_rejects_non_http_url() {
        let result = RecordStoreBuilder::new("localhost:8082/api/booking").build();
        assert!(matches!(result, Err(ClientError::InvalidRequest(_))));
    }
}
