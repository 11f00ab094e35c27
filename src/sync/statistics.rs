use super::bookings::BookingSync;
use flightdesk_client::BookingStatistics;
use tokio::sync::watch;
use tracing::debug;

/// Latest booking statistics snapshot mirrored from the store. There is no
/// partial update: a refresh swaps the whole snapshot.
pub struct Statistics {
    state: watch::Sender<Option<BookingStatistics>>,
}

impl Statistics {
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(None),
        }
    }

    pub fn get(&self) -> Option<BookingStatistics> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<BookingStatistics>> {
        self.state.subscribe()
    }

    pub(super) fn replace(&self, statistics: BookingStatistics) {
        self.state.send_replace(Some(statistics));
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingSync {
    /// Refreshes the statistics snapshot. Independent of the query bracket;
    /// a failure is reported through the booking error slot.
    pub async fn fetch_statistics(&self) {
        match self.store.statistics().await {
            Ok(statistics) => {
                debug!(
                    "Booking statistics: {} bookings, {} passengers",
                    statistics.total_bookings, statistics.total_passengers
                );
                self.statistics.replace(statistics);
            }
            Err(e) => self.bookings.fail("Failed to load booking statistics", e),
        }
    }

    pub fn statistics(&self) -> Option<BookingStatistics> {
        self.statistics.get()
    }

    pub fn subscribe_statistics(&self) -> watch::Receiver<Option<BookingStatistics>> {
        self.statistics.subscribe()
    }
}
