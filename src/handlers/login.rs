use crate::auth::authenticator::{login, LoginOutcome};
use crate::core::error::DashboardError;
use crate::core::state::AppState;
use crate::models::admin::SuccessResponse;
use crate::models::dashboard::{LoginForm, LoginResponse, SessionResponse};
use crate::stores::session_store::{Session, SessionStore};
use crate::utils::cookie::{clear_session_cookie, session_cookie, session_token};
use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Login to Dashboard</title></head>
<body>
<h1>Login to Dashboard</h1>
<form method="post" action="/login">
  <label>Username <input name="username" autocomplete="username"></label>
  <label>Password <input name="password" type="password" autocomplete="current-password"></label>
  <button type="submit">Login</button>
</form>
</body>
</html>
"#;

/// Login page
///
/// GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// Check submitted credentials and open a session
///
/// POST /login (form: username, password)
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, DashboardError> {
    state.metrics.increment_login_attempts();

    let active_users = state.credentials.load_active_users()?;

    let user = match login(&form.username, &form.password, &active_users) {
        LoginOutcome::Granted(user) => user,
        LoginOutcome::InvalidCredentials => {
            state.metrics.increment_invalid_credentials();
            warn!(username = %form.username, "Login rejected: invalid credentials");
            return Err(DashboardError::InvalidCredentials);
        }
        LoginOutcome::NotAuthorized => {
            state.metrics.increment_not_authorized();
            warn!(username = %form.username, "Login rejected: not authorized for dashboard");
            return Err(DashboardError::NotAuthorized);
        }
    };

    // a fresh token on every login; the old one is dropped
    if let Some(previous) = session_token(&headers) {
        state.sessions.remove(&previous);
    }
    let token = SessionStore::new_token();

    let mut session = Session::anonymous();
    session.establish(user.clone());
    state.sessions.put(&token, session);

    state.metrics.increment_granted();
    info!(username = %user.username, user_type = %user.user_type, "Login successful");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            username: user.username,
            user_type: user.user_type,
        }),
    )
        .into_response())
}

/// End the caller's session
///
/// POST /logout
pub async fn logout_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if let Some(session) = state.sessions.remove(&token) {
            if let Some(user) = session.user() {
                info!(username = %user.username, "Logged out");
            }
        }
    }

    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(SuccessResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
        .into_response()
}

/// Who the caller is logged in as
///
/// GET /session
pub async fn session_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<SessionResponse> {
    let token = session_token(&headers);
    let session = state.sessions.get(token.as_deref());
    let user = session.user();

    Json(SessionResponse {
        logged_in: user.is_some(),
        username: user.map(|u| u.username.clone()),
        user_type: user.map(|u| u.user_type.clone()),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::state::tests::create_test_state;
    use crate::models::admin::ErrorResponse;
    use crate::utils::cookie::SESSION_COOKIE;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use http_body_util::BodyExt;

    pub(crate) fn form(username: &str, password: &str) -> Form<LoginForm> {
        Form(LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub(crate) fn cookie_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, token)).unwrap(),
        );
        headers
    }

    /// Token from a login response's Set-Cookie header
    pub(crate) fn issued_token(response: &Response) -> String {
        let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        let pair = set_cookie.split(';').next().unwrap();
        pair.split_once('=').unwrap().1.to_string()
    }

    pub(crate) async fn login_as(state: &Arc<AppState>, username: &str, password: &str) -> String {
        let response = login_handler(State(state.clone()), HeaderMap::new(), form(username, password))
            .await
            .unwrap();
        issued_token(&response)
    }

    async fn error_body(error: DashboardError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = Body::new(response.into_body()).collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_index_serves_login_form() {
        let Html(page) = index_handler().await;
        assert!(page.contains("Login to Dashboard"));
        assert!(page.contains("name=\"password\""));
    }

    #[tokio::test]
    async fn test_login_granted_sets_session() {
        let (_dir, state) = create_test_state();

        let response = login_handler(State(state.clone()), HeaderMap::new(), form("ADMIN", "pw1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let token = issued_token(&response);
        let session = state.sessions.get(Some(token.as_str()));
        assert!(session.logged_in);
        assert_eq!(session.user().unwrap().username, "admin");

        let bytes = Body::new(response.into_body()).collect().await.unwrap().to_bytes();
        let body: LoginResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(body.success);
        assert_eq!(body.username, "admin");
        assert_eq!(body.user_type, "A");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (_dir, state) = create_test_state();

        let result = login_handler(State(state.clone()), HeaderMap::new(), form("admin", "wrong")).await;
        let (status, body) = error_body(result.unwrap_err()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error, "Invalid username or password");
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_login_unknown_user_same_message() {
        let (_dir, state) = create_test_state();

        let unknown = login_handler(State(state.clone()), HeaderMap::new(), form("nobody", "pw1")).await;
        let wrong = login_handler(State(state.clone()), HeaderMap::new(), form("admin", "nope")).await;

        let (s1, b1) = error_body(unknown.unwrap_err()).await;
        let (s2, b2) = error_body(wrong.unwrap_err()).await;
        assert_eq!(s1, s2);
        assert_eq!(b1.error, b2.error);
    }

    #[tokio::test]
    async fn test_login_not_authorized() {
        let (_dir, state) = create_test_state();

        let result = login_handler(State(state.clone()), HeaderMap::new(), form("viewer", "pw2")).await;
        let (status, body) = error_body(result.unwrap_err()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.error.contains("permission"));
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_login_inactive_user_rejected() {
        let (_dir, state) = create_test_state();

        let result = login_handler(State(state.clone()), HeaderMap::new(), form("retired", "pw3")).await;
        assert!(matches!(result, Err(DashboardError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_password_case_sensitive() {
        let (_dir, state) = create_test_state();

        assert!(login_handler(State(state.clone()), HeaderMap::new(), form("alice", "Secret1")).await.is_ok());
        let result = login_handler(State(state.clone()), HeaderMap::new(), form("alice", "secret1")).await;
        assert!(matches!(result, Err(DashboardError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_store_unavailable() {
        let (dir, state) = create_test_state();
        std::fs::remove_file(dir.path().join("authentication.csv")).unwrap();

        let result = login_handler(State(state), HeaderMap::new(), form("admin", "pw1")).await;
        let (status, body) = error_body(result.unwrap_err()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.error.contains("authentication.csv"));
    }

    #[tokio::test]
    async fn test_login_replaces_previous_token() {
        let (_dir, state) = create_test_state();
        let first = login_as(&state, "admin", "pw1").await;

        let response = login_handler(State(state.clone()), cookie_headers(&first), form("alice", "Secret1"))
            .await
            .unwrap();
        let second = issued_token(&response);

        assert_ne!(first, second);
        assert!(!state.sessions.contains(&first));
        assert_eq!(state.sessions.get(Some(second.as_str())).user().unwrap().username, "Alice");
    }

    #[tokio::test]
    async fn test_login_counts_metrics() {
        let (_dir, state) = create_test_state();
        let _ = login_handler(State(state.clone()), HeaderMap::new(), form("admin", "pw1")).await;
        let _ = login_handler(State(state.clone()), HeaderMap::new(), form("admin", "bad")).await;
        let _ = login_handler(State(state.clone()), HeaderMap::new(), form("viewer", "pw2")).await;

        let snapshot = state.metrics.get_snapshot(&state.sessions);
        assert_eq!(snapshot.login_attempts, 3);
        assert_eq!(snapshot.logins_granted, 1);
        assert_eq!(snapshot.invalid_credentials, 1);
        assert_eq!(snapshot.not_authorized, 1);
    }

    #[tokio::test]
    async fn test_logout_resets_session() {
        let (_dir, state) = create_test_state();
        let token = login_as(&state, "admin", "pw1").await;

        let response = logout_handler(State(state.clone()), cookie_headers(&token)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.contains("Max-Age=0"));

        assert_eq!(state.sessions.get(Some(token.as_str())), Session::anonymous());
    }

    #[tokio::test]
    async fn test_logout_without_session() {
        let (_dir, state) = create_test_state();
        let response = logout_handler(State(state), HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_session_handler() {
        let (_dir, state) = create_test_state();

        let Json(anon) = session_handler(State(state.clone()), HeaderMap::new()).await;
        assert!(!anon.logged_in);
        assert!(anon.username.is_none());

        let token = login_as(&state, "admin", "pw1").await;
        let Json(current) = session_handler(State(state.clone()), cookie_headers(&token)).await;
        assert!(current.logged_in);
        assert_eq!(current.username.as_deref(), Some("admin"));
        assert_eq!(current.user_type.as_deref(), Some("A"));
    }
}
