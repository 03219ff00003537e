// Page gate: runs before every protected view

use crate::auth::authenticator::{authenticate, is_authorized_for_dashboard};
use crate::core::error::DashboardError;
use crate::models::user::UserRecord;
use crate::stores::credential_store::CredentialStore;
use crate::stores::session_store::Session;
use tracing::warn;

/// How the gate decides authorization for an existing session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateMode {
    /// Re-resolve the session's credentials against the current store snapshot
    Rederive,
    /// Trust the record captured at login, re-checking only its role fields
    CapturedRecord,
}

/// Check that `session` may see the dashboard and return the user it resolves to.
///
/// The session is only read. Under `GateMode::Rederive` a session whose
/// credentials no longer match an active record is rejected with
/// `NotAuthorized`; it stays logged in until an explicit logout.
pub fn require_dashboard_access(
    session: &Session,
    credentials: &CredentialStore,
    mode: GateMode,
) -> Result<UserRecord, DashboardError> {
    let captured = match session.user() {
        Some(user) => user.clone(),
        None => return Err(DashboardError::SessionRequired),
    };

    let current = match mode {
        GateMode::CapturedRecord => captured,
        GateMode::Rederive => {
            let active = credentials.load_active_users()?;
            match authenticate(&captured.username, &captured.password, &active) {
                Some(user) => user.clone(),
                None => {
                    warn!(username = %captured.username, "Session credentials no longer match an active record");
                    return Err(DashboardError::NotAuthorized);
                }
            }
        }
    };

    if !is_authorized_for_dashboard(&current) {
        warn!(
            username = %current.username,
            user_type = %current.user_type,
            menu_type = %current.menu_type,
            "Dashboard access denied"
        );
        return Err(DashboardError::NotAuthorized);
    }

    Ok(current)
}
