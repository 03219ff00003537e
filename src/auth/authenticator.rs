use crate::models::user::{UserRecord, DASHBOARD_ROLE};
use crate::utils::auth::constant_time_eq;

/// Result of one login attempt, interpreted by the caller for navigation
#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
    /// Credentials matched and the record may open the dashboard
    Granted(UserRecord),
    /// No active record matched the username/password pair
    InvalidCredentials,
    /// Credentials matched but the record lacks dashboard access
    NotAuthorized,
}

/// Find the first active record matching the submitted credentials.
///
/// Usernames compare case-insensitively, passwords compare exactly. The
/// snapshot is only read; lower-casing happens on per-call comparison keys.
/// Duplicate usernames resolve to the first match in store order. A record
/// with a blank stored username or password never matches.
pub fn authenticate<'a>(username: &str, password: &str, active_users: &'a [UserRecord]) -> Option<&'a UserRecord> {
    let wanted = username.to_lowercase();

    active_users
        .iter()
        .filter(|user| has_credentials(user))
        .find(|user| user.username.to_lowercase() == wanted && constant_time_eq(password, &user.password))
}

fn has_credentials(user: &UserRecord) -> bool {
    !user.username.is_empty() && !user.password.is_empty()
}

/// Dashboard access needs both `user_type` and `menu_type` set to "A"
pub fn is_authorized_for_dashboard(record: &UserRecord) -> bool {
    record.user_type == DASHBOARD_ROLE && record.menu_type == DASHBOARD_ROLE
}

/// Authenticate and then authorize in one step
pub fn login(username: &str, password: &str, active_users: &[UserRecord]) -> LoginOutcome {
    match authenticate(username, password, active_users) {
        None => LoginOutcome::InvalidCredentials,
        Some(user) if is_authorized_for_dashboard(user) => LoginOutcome::Granted(user.clone()),
        Some(_) => LoginOutcome::NotAuthorized,
    }
}
