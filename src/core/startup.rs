use tracing::info;

use crate::core::error::StoreError;
use crate::core::state::AppState;

/// Counts reported after warming the caches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmupSummary {
    pub active_users: usize,
    pub sales_rows: usize,
}

/// Load both CSV sources into their caches.
///
/// Used at boot and by the reload endpoint. Stale snapshots are dropped
/// before reading, so a failure leaves the store empty rather than stale.
pub fn warm_caches(state: &AppState) -> Result<WarmupSummary, StoreError> {
    state.credentials.invalidate();
    state.sales.invalidate();

    let users = state.credentials.load_active_users()?;
    let sales = state.sales.load_sales()?;

    let summary = WarmupSummary {
        active_users: users.len(),
        sales_rows: sales.len(),
    };

    info!(
        active_users = summary.active_users,
        sales_rows = summary.sales_rows,
        "Caches populated from CSV sources"
    );

    Ok(summary)
}
