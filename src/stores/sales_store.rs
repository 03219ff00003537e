use crate::core::error::StoreError;
use crate::models::sale::{SaleRecord, SALES_COLUMNS};
use crate::utils::csv_source::read_rows;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Read-only sales data set, memoized like the credential store
pub struct SalesStore {
    path: PathBuf,
    cache: RwLock<Option<Arc<[SaleRecord]>>>,
}

impl SalesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_sales(&self) -> Result<Arc<[SaleRecord]>, StoreError> {
        if let Some(sales) = self.cache.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(Arc::clone(sales));
        }

        let rows: Vec<SaleRecord> = read_rows(&self.path, &SALES_COLUMNS).map_err(StoreError::Unavailable)?;
        let sales: Arc<[SaleRecord]> = rows.into();

        info!(path = %self.path.display(), rows = sales.len(), "Sales data loaded");

        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&sales));

        Ok(sales)
    }

    pub fn invalidate(&self) {
        self.cache.write().unwrap_or_else(PoisonError::into_inner).take();
        debug!(path = %self.path.display(), "Sales cache invalidated");
    }

    pub fn is_cached(&self) -> bool {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}
