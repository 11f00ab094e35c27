use crate::error::SyncResult;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Saves downloaded CSV payloads under a fixed file name in one directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The user's download directory, or the working directory when there is none.
    pub fn default_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `data` to `{dir}/{file_name}`. The target only appears once the
    /// whole payload is on disk, replacing any earlier export.
    pub fn save(&self, file_name: &str, data: &[u8]) -> SyncResult<PathBuf> {
        let target = self.dir.join(file_name);

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target)?;

        info!("Saved {} bytes to {}", data.len(), target.display());
        Ok(target)
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}
