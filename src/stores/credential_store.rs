use crate::core::error::StoreError;
use crate::models::user::{CredentialRow, UserRecord, CREDENTIAL_COLUMNS};
use crate::utils::csv_source::read_rows;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Credential source backed by a CSV file
///
/// The active rows are loaded once and memoized until `invalidate` is called.
/// Edits to the file are not picked up before then.
pub struct CredentialStore {
    path: PathBuf,
    active_marker: String,
    cache: RwLock<Option<Arc<[UserRecord]>>>,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>, active_marker: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            active_marker: active_marker.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the active user records in file order
    pub fn load_active_users(&self) -> Result<Arc<[UserRecord]>, StoreError> {
        if let Some(users) = self.cache.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(Arc::clone(users));
        }

        let rows: Vec<CredentialRow> = read_rows(&self.path, &CREDENTIAL_COLUMNS)
            .map_err(StoreError::Unavailable)?;
        let total = rows.len();

        let active: Arc<[UserRecord]> = rows
            .into_iter()
            .map(|row| UserRecord::from_row(row, &self.active_marker))
            .filter(|user| user.is_active)
            .collect();

        info!(
            path = %self.path.display(),
            rows = total,
            active_users = active.len(),
            "Credential store loaded"
        );

        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&active));

        Ok(active)
    }

    /// Drop the memoized snapshot so the next load re-reads the file
    pub fn invalidate(&self) {
        self.cache.write().unwrap_or_else(PoisonError::into_inner).take();
        debug!(path = %self.path.display(), "Credential cache invalidated");
    }

    pub fn is_cached(&self) -> bool {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}
