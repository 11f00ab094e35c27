use super::HttpClient;
use crate::protocol::{
    Booking, BookingCreate, BookingQuery, BookingStatistics, BookingUpdate, ClientError,
    DeleteRequest, FormRequest,
};

pub const BOOKINGS_CSV: &str = "bookings.csv";

/// Typed operations of the booking record store (`.../api/booking`).
#[derive(Clone, Debug)]
pub struct BookingStore {
    http: HttpClient,
}

impl BookingStore {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub async fn query(&self, query: &BookingQuery) -> Result<Vec<Booking>, ClientError> {
        self.http.post_form("query", &query.form_fields()).await
    }

    pub async fn create(&self, booking: &BookingCreate) -> Result<Booking, ClientError> {
        self.http.post_form("create", &booking.form_fields()).await
    }

    pub async fn update(&self, booking: &BookingUpdate) -> Result<Booking, ClientError> {
        self.http.post_form("update", &booking.form_fields()).await
    }

    /// Cancels the reservation on the server side.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.http
            .post_form_discard("delete", &DeleteRequest { id }.form_fields())
            .await
    }

    pub async fn statistics(&self) -> Result<BookingStatistics, ClientError> {
        self.http.post_empty("statistics").await
    }

    pub async fn export_csv(&self) -> Result<Vec<u8>, ClientError> {
        self.http.get_bytes("export-csv").await
    }

    pub async fn import_csv(&self, file_name: &str, data: Vec<u8>) -> Result<(), ClientError> {
        self.http
            .post_file("import-csv", "file", file_name, "application/csv", data)
            .await
    }
}
