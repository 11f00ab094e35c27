use flightdesk_client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to save file: {0}")]
    Persist(String),

    #[error("Server returned a {0} without id")]
    MissingId(&'static str),
}

pub type SyncResult<T> = Result<T, SyncError>;

impl From<tempfile::PersistError> for SyncError {
    fn from(err: tempfile::PersistError) -> Self {
        SyncError::Persist(err.error.to_string())
    }
}
