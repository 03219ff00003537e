use serde::{Deserialize, Serialize};

/// Role code required on both `user_type` and `menu_type` for dashboard access
pub const DASHBOARD_ROLE: &str = "A";

/// One row of the credential store
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    /// Login name, matched case-insensitively
    pub username: String,
    /// Plain-text password, matched exactly
    #[serde(skip_serializing)]
    pub password: String,
    /// Whether the row carried the active marker
    pub is_active: bool,
    /// Role classifier (single-character code)
    pub user_type: String,
    /// Secondary access classifier (single-character code)
    pub menu_type: String,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        is_active: bool,
        user_type: impl Into<String>,
        menu_type: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            is_active,
            user_type: user_type.into(),
            menu_type: menu_type.into(),
        }
    }

    pub(crate) fn from_row(row: CredentialRow, active_marker: &str) -> Self {
        Self {
            is_active: row.is_active == active_marker,
            username: row.username,
            password: row.password,
            user_type: row.user_type,
            menu_type: row.menu_type,
        }
    }
}

/// Raw credential CSV row, keyed by the trimmed header names
#[derive(Debug, Deserialize)]
pub(crate) struct CredentialRow {
    #[serde(rename = "User_Name")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "is_active", default)]
    pub is_active: String,
    #[serde(rename = "user_type", default)]
    pub user_type: String,
    #[serde(rename = "Menu_type", default)]
    pub menu_type: String,
}

/// Columns the credential source must provide
pub const CREDENTIAL_COLUMNS: [&str; 5] = ["User_Name", "Password", "is_active", "user_type", "Menu_type"];
