use crate::models::user::UserRecord;
use dashmap::DashMap;
use rand::RngCore;

/// Observable login state of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Per-client login state
///
/// `authenticated_user` is present exactly when `logged_in` is true.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub logged_in: bool,
    pub authenticated_user: Option<UserRecord>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.logged_in {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// Record a successful login
    pub fn establish(&mut self, user: UserRecord) {
        self.logged_in = true;
        self.authenticated_user = Some(user);
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
        self.authenticated_user = None;
    }

    /// The logged-in user, if any
    pub fn user(&self) -> Option<&UserRecord> {
        if self.logged_in {
            self.authenticated_user.as_ref()
        } else {
            None
        }
    }
}

/// Process-local sessions keyed by an opaque cookie token
///
/// Nothing here expires; sessions live until logout or process exit.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Generate a fresh 256-bit token, hex encoded
    pub fn new_token() -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Session for `token`, or an anonymous one when the token is unknown
    pub fn get(&self, token: Option<&str>) -> Session {
        token
            .and_then(|t| self.sessions.get(t).map(|entry| entry.value().clone()))
            .unwrap_or_default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.sessions.contains_key(token)
    }

    pub fn put(&self, token: &str, session: Session) {
        self.sessions.insert(token.to_string(), session);
    }

    /// Reset the session behind `token` to anonymous.
    /// Returns the session that was removed, if any.
    pub fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.remove(token).map(|(_, session)| session)
    }

    /// Number of sessions currently logged in
    pub fn authenticated_count(&self) -> usize {
        self.sessions.iter().filter(|entry| entry.value().logged_in).count()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> UserRecord {
        UserRecord::new("admin", "pw1", true, "A", "A")
    }

    #[test]
    fn test_session_defaults_anonymous() {
        let session = Session::anonymous();
        assert!(!session.logged_in);
        assert!(session.authenticated_user.is_none());
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(session.user().is_none());
    }

    #[test]
    fn test_session_establish_and_logout() {
        let mut session = Session::anonymous();
        session.establish(admin());
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("admin"));

        session.logout();
        assert_eq!(session, Session::anonymous());
    }

    #[test]
    fn test_new_token_is_random_hex() {
        let a = SessionStore::new_token();
        let b = SessionStore::new_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_token_is_anonymous() {
        let store = SessionStore::new();
        assert_eq!(store.get(None), Session::anonymous());
        assert_eq!(store.get(Some("missing")), Session::anonymous());
    }

    #[test]
    fn test_put_get_remove() {
        let store = SessionStore::new();
        let token = SessionStore::new_token();

        let mut session = Session::anonymous();
        session.establish(admin());
        store.put(&token, session.clone());

        assert!(store.contains(&token));
        assert_eq!(store.get(Some(token.as_str())), session);
        assert_eq!(store.authenticated_count(), 1);

        let removed = store.remove(&token);
        assert_eq!(removed, Some(session));
        assert!(store.is_empty());
        assert_eq!(store.get(Some(token.as_str())), Session::anonymous());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let mut session = Session::anonymous();
        session.establish(admin());
        store.put("one", session);
        store.put("two", Session::anonymous());

        assert!(store.get(Some("one")).logged_in);
        assert!(!store.get(Some("two")).logged_in);
        assert_eq!(store.len(), 2);
        assert_eq!(store.authenticated_count(), 1);
    }
}
