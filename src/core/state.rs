// Application state (AppState)

use crate::core::config::Config;
use crate::metrics::collector::Metrics;
use crate::stores::{credential_store::CredentialStore, sales_store::SalesStore, session_store::SessionStore};
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// Active user records for login
    pub credentials: Arc<CredentialStore>,

    /// Sales rows behind the dashboard
    pub sales: Arc<SalesStore>,

    /// Per-client login sessions
    pub sessions: Arc<SessionStore>,

    /// Login and gate counters
    pub metrics: Arc<Metrics>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        let credentials = Arc::new(CredentialStore::new(
            config.data.credentials_path.clone(),
            config.data.active_marker.clone(),
        ));

        Self {
            credentials,
            sales: Arc::new(SalesStore::new(config.data.sales_path.clone())),
            sessions: Arc::new(SessionStore::new()),
            metrics: Arc::new(Metrics::new()),
            config,
        }
    }
}
