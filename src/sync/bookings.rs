use super::collection::Collection;
use super::export::CsvExporter;
use super::statistics::Statistics;
use crate::error::SyncResult;
use flightdesk_client::{
    Booking, BookingCreate, BookingQuery, BookingStore, BookingUpdate, BOOKINGS_CSV,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Keeps the local booking collection and the booking statistics in step with
/// the booking record store.
///
/// Same shape as [`FlightSync`](super::FlightSync). Every successful mutation
/// (create, update, delete, import) ends with one statistics refresh.
pub struct BookingSync {
    pub(super) store: BookingStore,
    pub(super) bookings: Collection<Booking>,
    pub(super) statistics: Statistics,
    exporter: CsvExporter,
}

impl BookingSync {
    pub fn new(store: BookingStore, exporter: CsvExporter) -> Self {
        Self {
            store,
            bookings: Collection::new("booking"),
            statistics: Statistics::new(),
            exporter,
        }
    }

    pub fn bookings(&self) -> &Collection<Booking> {
        &self.bookings
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    pub async fn fetch_bookings(&self, query: Option<&BookingQuery>) {
        let _loading = self.bookings.begin_query();
        let all = BookingQuery::default();

        match self.store.query(query.unwrap_or(&all)).await {
            Ok(bookings) => {
                let count = self.bookings.replace_all(bookings);
                debug!("Loaded {} bookings", count);
            }
            Err(e) => self.bookings.fail("Failed to load bookings", e),
        }
    }

    /// Sends only flight id and passenger count; id and status come back
    /// from the store.
    pub async fn create_booking(&self, booking: &BookingCreate) -> Option<Booking> {
        match self.try_create(booking).await {
            Ok(created) => {
                self.fetch_statistics().await;
                Some(created)
            }
            Err(e) => {
                self.bookings.fail("Failed to create booking", e);
                None
            }
        }
    }

    async fn try_create(&self, booking: &BookingCreate) -> SyncResult<Booking> {
        let created = self.store.create(booking).await?;
        self.bookings.append(created.clone())?;
        info!(
            "Created booking {:?} on flight {} for {} passenger(s)",
            created.id, created.flight_id, created.passenger_count
        );
        Ok(created)
    }

    /// Only the passenger count is sent; flight and status are fixed.
    pub async fn update_booking(&self, booking: &BookingUpdate) -> Option<Booking> {
        match self.try_update(booking).await {
            Ok(updated) => {
                self.fetch_statistics().await;
                Some(updated)
            }
            Err(e) => {
                self.bookings.fail("Failed to update booking", e);
                None
            }
        }
    }

    async fn try_update(&self, booking: &BookingUpdate) -> SyncResult<Booking> {
        let updated = self.store.update(booking).await?;
        if self.bookings.replace(booking.id, updated.clone())? {
            info!("Updated booking {}", booking.id);
        }
        Ok(updated)
    }

    pub async fn delete_booking(&self, id: i64) {
        match self.store.delete(id).await {
            Ok(()) => {
                let removed = self.bookings.remove(id);
                info!("Cancelled booking {} ({} local record(s) removed)", id, removed);
                self.fetch_statistics().await;
            }
            Err(e) => self.bookings.fail("Failed to cancel booking", e),
        }
    }

    pub async fn export_csv(&self) -> Option<PathBuf> {
        match self.try_export().await {
            Ok(path) => Some(path),
            Err(e) => {
                self.bookings.fail("Failed to export bookings", e);
                None
            }
        }
    }

    async fn try_export(&self) -> SyncResult<PathBuf> {
        let data = self.store.export_csv().await?;
        self.exporter.save(BOOKINGS_CSV, &data)
    }

    /// Uploads a CSV file, then reloads bookings and statistics.
    pub async fn import_csv(&self, file: &Path) -> bool {
        match self.try_import(file).await {
            Ok(()) => {
                self.fetch_bookings(None).await;
                self.fetch_statistics().await;
                true
            }
            Err(e) => {
                self.bookings.fail("Failed to import bookings", e);
                false
            }
        }
    }

    async fn try_import(&self, file: &Path) -> SyncResult<()> {
        let data = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(BOOKINGS_CSV);

        self.store.import_csv(file_name, data).await?;
        info!("Imported bookings from {}", file.display());
        Ok(())
    }

    /// Unfiltered query followed by a statistics refresh. Statistics are
    /// refreshed whether or not the query succeeded.
    pub async fn fetch_all(&self) {
        self.fetch_bookings(None).await;
        self.fetch_statistics().await;
    }
}
