//! Address reference data (provinces, cities, barangays).
//!
//! Served verbatim from JSON files in the configured data directory.

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// One of the reference data sets and the file backing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressDataset {
    Provinces,
    Cities,
    Barangays,
}

impl AddressDataset {
    pub fn file_name(self) -> &'static str {
        match self {
            AddressDataset::Provinces => "province.json",
            AddressDataset::Cities => "city.json",
            AddressDataset::Barangays => "barangay.json",
        }
    }
}

/// Reads reference data files from a directory on every request, so edits
/// on disk show up without a restart.
#[derive(Debug, Clone)]
pub struct AddressData {
    dir: PathBuf,
}

impl AddressData {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Raw file contents for `dataset`.
    pub async fn load(&self, dataset: AddressDataset) -> Result<Vec<u8>, AppError> {
        let path = self.dir.join(dataset.file_name());
        tokio::fs::read(&path).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to read address data");
            AppError::ReferenceDataUnavailable(dataset.file_name().into())
        })
    }
}
