use super::collection::Collection;
use super::export::CsvExporter;
use crate::error::SyncResult;
use flightdesk_client::{Flight, FlightCreate, FlightQuery, FlightStore, FlightUpdate, FLIGHTS_CSV};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Keeps the local flight collection in step with the flight record store.
///
/// Every operation issues exactly one store call (import adds a follow-up
/// query) and touches local state only after that call succeeded. Failures
/// land in the collection's error slot.
pub struct FlightSync {
    store: FlightStore,
    flights: Collection<Flight>,
    exporter: CsvExporter,
}

impl FlightSync {
    pub fn new(store: FlightStore, exporter: CsvExporter) -> Self {
        Self {
            store,
            flights: Collection::new("flight"),
            exporter,
        }
    }

    pub fn flights(&self) -> &Collection<Flight> {
        &self.flights
    }

    pub fn store(&self) -> &FlightStore {
        &self.store
    }

    /// Runs a filtered query and replaces the whole collection with the
    /// result. `loading` is raised for the duration of the call.
    pub async fn fetch_flights(&self, query: Option<&FlightQuery>) {
        let _loading = self.flights.begin_query();
        let all = FlightQuery::default();

        match self.store.query(query.unwrap_or(&all)).await {
            Ok(flights) => {
                let count = self.flights.replace_all(flights);
                debug!("Loaded {} flights", count);
            }
            Err(e) => self.flights.fail("Failed to load flights", e),
        }
    }

    /// Appends the created flight at the tail. `None` on failure.
    pub async fn create_flight(&self, flight: &FlightCreate) -> Option<Flight> {
        match self.try_create(flight).await {
            Ok(created) => Some(created),
            Err(e) => {
                self.flights.fail("Failed to create flight", e);
                None
            }
        }
    }

    async fn try_create(&self, flight: &FlightCreate) -> SyncResult<Flight> {
        let created = self.store.create(flight).await?;
        self.flights.append(created.clone())?;
        info!("Created flight {} ({:?})", created.number, created.id);
        Ok(created)
    }

    /// Replaces the local flight with the same id in place. A response for a
    /// flight that is not held locally is returned but not inserted.
    pub async fn update_flight(&self, flight: &FlightUpdate) -> Option<Flight> {
        match self.try_update(flight).await {
            Ok(updated) => Some(updated),
            Err(e) => {
                self.flights.fail("Failed to update flight", e);
                None
            }
        }
    }

    async fn try_update(&self, flight: &FlightUpdate) -> SyncResult<Flight> {
        let updated = self.store.update(flight).await?;
        if self.flights.replace(flight.id, updated.clone())? {
            info!("Updated flight {}", flight.id);
        }
        Ok(updated)
    }

    pub async fn delete_flight(&self, id: i64) {
        match self.store.delete(id).await {
            Ok(()) => {
                let removed = self.flights.remove(id);
                info!("Deleted flight {} ({} local record(s) removed)", id, removed);
            }
            Err(e) => self.flights.fail("Failed to delete flight", e),
        }
    }

    /// Downloads the CSV export and saves it as `flights.csv`.
    pub async fn export_csv(&self) -> Option<PathBuf> {
        match self.try_export().await {
            Ok(path) => Some(path),
            Err(e) => {
                self.flights.fail("Failed to export flights", e);
                None
            }
        }
    }

    async fn try_export(&self) -> SyncResult<PathBuf> {
        let data = self.store.export_csv().await?;
        self.exporter.save(FLIGHTS_CSV, &data)
    }

    /// Uploads a CSV file, then reloads the collection from the store rather
    /// than reconciling locally.
    pub async fn import_csv(&self, file: &Path) -> bool {
        match self.try_import(file).await {
            Ok(()) => {
                self.fetch_flights(None).await;
                true
            }
            Err(e) => {
                self.flights.fail("Failed to import flights", e);
                false
            }
        }
    }

    async fn try_import(&self, file: &Path) -> SyncResult<()> {
        let data = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(FLIGHTS_CSV);

        self.store.import_csv(file_name, data).await?;
        info!("Imported flights from {}", file.display());
        Ok(())
    }

    /// Loads every flight through the dedicated endpoint. Does not take part
    /// in the `loading` bracket.
    pub async fn fetch_all(&self) {
        match self.store.all().await {
            Ok(flights) => {
                let count = self.flights.replace_all(flights);
                debug!("Loaded all {} flights", count);
            }
            Err(e) => self.flights.fail("Failed to load all flights", e),
        }
    }
}
