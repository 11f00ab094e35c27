use super::HttpClient;
use crate::protocol::{
    ClientError, DeleteRequest, Flight, FlightCreate, FlightQuery, FlightUpdate, FormRequest,
};

pub const FLIGHTS_CSV: &str = "flights.csv";

/// Typed operations of the flight record store (`.../api/flight`).
#[derive(Clone, Debug)]
pub struct FlightStore {
    http: HttpClient,
}

impl FlightStore {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub async fn query(&self, query: &FlightQuery) -> Result<Vec<Flight>, ClientError> {
        self.http.post_form("query", &query.form_fields()).await
    }

    pub async fn create(&self, flight: &FlightCreate) -> Result<Flight, ClientError> {
        self.http.post_form("create", &flight.form_fields()).await
    }

    pub async fn update(&self, flight: &FlightUpdate) -> Result<Flight, ClientError> {
        self.http.post_form("update", &flight.form_fields()).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.http
            .post_form_discard("delete", &DeleteRequest { id }.form_fields())
            .await
    }

    pub async fn all(&self) -> Result<Vec<Flight>, ClientError> {
        self.http.get_json("all").await
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
